//! Error types for local cache operations.

use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// No cached body for this id.
    #[error("preset not cached: {0}")]
    NotFound(String),

    /// A stored value exists but cannot be decoded.
    #[error("corrupt cache entry {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// Serialization failure while writing.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from a file-backed substrate.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    /// Returns `true` for [`CacheError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Convenience type alias for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;
