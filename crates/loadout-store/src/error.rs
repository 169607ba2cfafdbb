use loadout_types::PresetId;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No object exists at the id-derived path.
    #[error("preset not found: {0}")]
    NotFound(PresetId),

    /// Network or remote failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Object bytes do not hash to the id they are filed under.
    #[error("hash mismatch for {id}: computed {computed}")]
    HashMismatch { id: PresetId, computed: PresetId },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from a local backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend has no write path configured.
    #[error("store is read-only")]
    ReadOnly,
}

impl StoreError {
    /// Returns `true` for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<loadout_crypto::HasherError> for StoreError {
    fn from(e: loadout_crypto::HasherError) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
