//! Error types for the profile persistence and sync engine

use thiserror::Error;

/// Errors raised by the store, the remote directory, the engine and the registry
#[derive(Error, Debug)]
pub enum ProfilerError {
    /// Local documents are missing or unreadable. Fixed by running `init`.
    #[error("local profile data is missing or corrupt ({0}); run `shprof init` to reset it")]
    Integrity(String),

    /// Bad user input: missing value, invalid index, empty field.
    #[error("{0}")]
    Validation(String),

    /// Network failure, unexpected status or malformed response.
    #[error("remote error: {0}")]
    Remote(String),

    /// A remote call was attempted without the credentials it needs.
    #[error("not authenticated: {0}")]
    Unauthenticated(String),

    /// A profile document failed to parse or validate.
    #[error("invalid profile document: {0}")]
    InvalidDocument(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProfilerError {
    pub fn validation(message: impl Into<String>) -> Self {
        ProfilerError::Validation(message.into())
    }

    pub fn remote(message: impl Into<String>) -> Self {
        ProfilerError::Remote(message.into())
    }

    /// Validation errors leave a prompt-driven flow where it was
    pub fn is_validation(&self) -> bool {
        matches!(self, ProfilerError::Validation(_))
    }
}

/// Result alias used across the core modules
pub type Result<T> = std::result::Result<T, ProfilerError>;
