use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The payload was rejected before anything was written.
    #[error("invalid preset payload: {0}")]
    Validation(String),

    /// The object store write failed; nothing was recorded locally.
    #[error("failed to save preset: {0}")]
    SaveFailed(#[from] loadout_store::StoreError),

    #[error("cache error: {0}")]
    Cache(#[from] loadout_cache::CacheError),
}

pub type ResolveResult<T> = Result<T, ResolveError>;
