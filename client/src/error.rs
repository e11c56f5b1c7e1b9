//! Error handling for the air quality API client
//!
//! Every failure maps to a stable code the UI can switch on when it picks
//! an error placeholder.

use reqwest::StatusCode;
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Transport errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    // Authentication errors
    #[error("Unauthorized")]
    Unauthorized,

    #[error("This request requires a signed-in session")]
    MissingSession,

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Payload errors
    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Http(e) if e.is_timeout() => "TIMEOUT",
            ClientError::Http(_) => "HTTP_ERROR",
            ClientError::Status { .. } => "BACKEND_ERROR",
            ClientError::Unauthorized => "UNAUTHORIZED",
            ClientError::MissingSession => "MISSING_SESSION",
            ClientError::NotFound(_) => "NOT_FOUND",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Configuration(_) | ClientError::InvalidBaseUrl(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Message suitable for the dashboard's error placeholder
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unauthorized | ClientError::MissingSession => {
                "Please sign in to continue.".to_string()
            }
            ClientError::NotFound(resource) => format!("{} not found", resource),
            ClientError::Validation(msg) => msg.clone(),
            _ => "Failed to load air quality data. Please try again later.".to_string(),
        }
    }

    /// Map a non-success status to an error
    pub fn from_status(status: StatusCode, path: &str, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(path.to_string()),
            _ => ClientError::Status { status, body },
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::Validation(errors.to_string())
    }
}

/// Result type alias for client calls
pub type ClientResult<T> = Result<T, ClientError>;
