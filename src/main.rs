use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use lejet_booking::api::ApiClient;
use lejet_booking::app::App;
use lejet_booking::config::AppConfig;
use lejet_booking::services::session::{Session, TokenStore};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env();
    let client = ApiClient::new(config.api_url.clone());

    // Restore a previous login before the first screen renders
    let mut session = Session::new(client.clone(), TokenStore::new(config.token_path.clone()));
    session.initialize().await;

    App::new(client, session).run().await;
}
