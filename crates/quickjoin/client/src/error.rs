//! Client error types

use quickjoin_engine::ApiError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API error response
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or rejected credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(what) => ApiError::NotFound(what),
            ClientError::Unauthorized(why) => ApiError::Unauthorized(why),
            ClientError::Api { status, message } => ApiError::Status { status, message },
            ClientError::Http(e) if e.is_decode() => ApiError::Decode(e.to_string()),
            ClientError::Http(e) => ApiError::Transport(e.to_string()),
            ClientError::Json(e) => ApiError::Decode(e.to_string()),
            ClientError::Url(e) => ApiError::Transport(e.to_string()),
        }
    }
}
