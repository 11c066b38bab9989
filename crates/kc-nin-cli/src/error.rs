//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid fixture content.
    #[error("invalid fixture {path}: {message}")]
    Fixture {
        /// Fixture path.
        path: String,
        /// What is wrong with it.
        message: String,
    },

    /// Auto-link engine error.
    #[error(transparent)]
    Engine(#[from] kc_nin_autolink::AutoLinkError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
