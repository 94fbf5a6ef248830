use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Text for the alert or inline message shown to the shopper.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Please check the highlighted fields.".to_string(),
            AppError::Network(_) => {
                "Cannot reach the server. Please check your connection and try again.".to_string()
            }
            AppError::Timeout => "The server took too long to respond. Please try again.".to_string(),
            AppError::Unauthorized(message) | AppError::Forbidden(message) => message.clone(),
            AppError::Server { message, .. } => message.clone(),
            AppError::Decode(_) | AppError::Config(_) | AppError::Internal(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, AppError::Unauthorized(_) | AppError::Forbidden(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout
        } else if err.is_decode() {
            AppError::Decode(err.to_string())
        } else if err.is_builder() {
            AppError::Config(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
