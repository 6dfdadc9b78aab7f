//! CLI error types

use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login did not produce a session
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Platform client error
    #[error(transparent)]
    Client(#[from] quickjoin_client::ClientError),

    /// Launch phase error
    #[error(transparent)]
    Engine(#[from] quickjoin_engine::EngineError),

    /// Interactive prompt error
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
