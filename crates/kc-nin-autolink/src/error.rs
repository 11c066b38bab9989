//! Error types for the auto-link authenticator.
//!
//! None of these errors ever reach the host flow engine. Lookup faults are
//! absorbed by the resolver and the credential gate; anything else is turned
//! into an abstain outcome by the decision engine.

use thiserror::Error;

/// Errors raised by the auto-link engine and its collaborators.
#[derive(Debug, Error)]
pub enum AutoLinkError {
    /// The authentication session could not be read.
    #[error("session state unavailable: {0}")]
    SessionState(String),

    /// The account directory lookup failed.
    #[error("account directory error: {0}")]
    Directory(String),

    /// The credential store query failed.
    #[error("credential store error: {0}")]
    CredentialStore(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl AutoLinkError {
    /// Creates a session state error.
    #[must_use]
    pub fn session_state(message: impl Into<String>) -> Self {
        Self::SessionState(message.into())
    }

    /// Creates a directory error.
    #[must_use]
    pub fn directory(message: impl Into<String>) -> Self {
        Self::Directory(message.into())
    }

    /// Creates a credential store error.
    #[must_use]
    pub fn credential_store(message: impl Into<String>) -> Self {
        Self::CredentialStore(message.into())
    }
}

/// Result type for auto-link operations.
pub type AutoLinkResult<T> = Result<T, AutoLinkError>;
