use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::models::user::{LoginRequest, RegisterRequest, Role, User};
use crate::utils::error::AppResult;

/// File-backed persistence for the bearer token, so a login survives
/// process restarts. IO trouble degrades to logged-out, never to a crash.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        TokenStore { path }
    }

    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                if token.is_empty() {
                    None
                } else {
                    Some(token)
                }
            }
            Err(_) => None,
        }
    }

    pub fn save(&self, token: &str) {
        if let Err(e) = fs::write(&self.path, token) {
            warn!(path = %self.path.display(), error = %e, "could not persist token");
        }
    }

    pub fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %e, "could not clear stored token");
            }
        }
    }
}

/// Process-wide session context: the current identity and its credential.
/// Explicit init (verify any stored token) and explicit teardown (logout
/// clears both the token and the in-memory identity).
pub struct Session {
    client: ApiClient,
    store: TokenStore,
    user: Option<User>,
}

impl Session {
    pub fn new(client: ApiClient, store: TokenStore) -> Self {
        Session {
            client,
            store,
            user: None,
        }
    }

    /// Restore a previous login if a stored token still verifies.
    pub async fn initialize(&mut self) {
        let Some(token) = self.store.load() else {
            return;
        };
        self.client.set_token(Some(token));
        match self.client.verify().await {
            Ok(user) => {
                info!(email = %user.email, "session restored");
                self.user = Some(user);
            }
            Err(e) => {
                warn!(error = %e, "stored token rejected");
                self.logout();
            }
        }
    }

    pub async fn login(&mut self, email: String, password: String) -> AppResult<&User> {
        let response = self.client.login(&LoginRequest { email, password }).await?;
        self.store.save(&response.token);
        self.client.set_token(Some(response.token));
        info!(email = %response.user.email, "logged in");
        Ok(self.user.insert(response.user))
    }

    /// Register, then log straight in with the same credentials.
    pub async fn signup(&mut self, email: String, password: String, role: Role) -> AppResult<&User> {
        self.client
            .register(&RegisterRequest {
                email: email.clone(),
                password: password.clone(),
                role,
            })
            .await?;
        self.login(email, password).await
    }

    pub fn logout(&mut self) {
        self.store.clear();
        self.client.set_token(None);
        self.user = None;
    }

    /// Handler for any 401/403 from the backend: drop the credential and
    /// send the user back through login.
    pub fn force_reauth(&mut self) {
        warn!("credential rejected by backend, forcing re-authentication");
        self.logout();
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.user.as_ref(), Some(user) if user.role == Role::Admin)
    }
}
