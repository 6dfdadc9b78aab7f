//! Engine error types

use thiserror::Error;

/// Failure reported by a [`PlatformApi`](crate::api::PlatformApi)
/// implementation
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested record does not exist or is not visible
    #[error("Not found: {0}")]
    NotFound(String),

    /// The session is not (or no longer) authenticated
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Non-success HTTP status
    #[error("API error: {status} - {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Connection, TLS or timeout failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Result type for platform API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of the launch phase
#[derive(Debug, Error)]
pub enum EngineError {
    /// Remote call made by the dispatcher failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The configured base deep link is not a valid URI
    #[error("Invalid game URI {uri:?}: {source}")]
    InvalidGameUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    /// The OS refused to open the link or start a process
    #[error("Launch failed: {0}")]
    Launch(#[from] std::io::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
