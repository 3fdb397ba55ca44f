use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // Message returned by the backend, surfaced verbatim
    #[error("{0}")]
    Api(String),

    #[error("Response parsing failed: {0}")]
    Decode(String),

    #[error("Cannot {action} while {stage}")]
    Workflow {
        stage: &'static str,
        action: &'static str,
    },
}

// Convert reqwest::Error (transport failure) to AppError::Network
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl AppError {
    /// True for rejections that must force re-authentication.
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }
}

// Define a type alias for the result type
pub type AppResult<T> = Result<T, AppError>;
