use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid preset id {id:?}: {reason}")]
    InvalidPresetId { id: String, reason: String },

    #[error("unknown slot type: {0}")]
    UnknownSlotType(String),
}
