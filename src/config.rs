use std::env;
use std::path::PathBuf;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TOKEN_FILE: &str = ".lejet_token";

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the booking backend, no trailing slash.
    pub api_url: String,
    /// Where the bearer token is persisted between runs.
    pub token_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_url = env::var("LEJET_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let token_path = env::var("LEJET_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_FILE));

        AppConfig {
            api_url,
            token_path,
        }
    }
}
