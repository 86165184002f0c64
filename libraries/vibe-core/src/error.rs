/// Core error types for Vibe
use thiserror::Error;

/// Result type alias using `VibeError`
pub type Result<T> = std::result::Result<T, VibeError>;

/// Core error type for Vibe
///
/// Tier implementations convert their own errors into this type so the
/// reconciler can classify a failure without knowing which backend raised it.
#[derive(Error, Debug)]
pub enum VibeError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Local storage ran out of space; the write was dropped
    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Network error (unreachable, non-success status, bad payload)
    #[error("Network error: {0}")]
    Network(String),

    /// Remote call did not finish within its deadline
    #[error("Timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl VibeError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a quota exceeded error
    pub fn quota_exceeded(msg: impl Into<String>) -> Self {
        Self::QuotaExceeded(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error comes from the connection rather than the data
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}
