use bytes::Bytes;
use loadout_crypto::{canonical_bytes, pretty_bytes, ContentAddresser};
use loadout_types::{PresetId, SavedPreset};
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// Directory (or URL path segment) that holds stored presets.
pub const STORAGE_PREFIX: &str = "presets";

/// A stored preset: its id plus the pretty-printed canonical JSON bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub id: PresetId,
    pub bytes: Bytes,
}

impl StoredObject {
    /// Build the stored form of a preset.
    ///
    /// The id is the address of the compact canonical form; the bytes are the
    /// pretty canonical form of the same value. Every writer goes through
    /// here so all of them hash identically.
    pub fn seal(preset: &SavedPreset) -> StoreResult<Self> {
        let value =
            serde_json::to_value(preset).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Self::seal_value(&value)
    }

    /// [`StoredObject::seal`] for an already-serialized value.
    pub fn seal_value(value: &Value) -> StoreResult<Self> {
        let id = ContentAddresser::PRESET.address_value(value);
        let bytes = pretty_bytes(value)?;
        Ok(Self {
            id,
            bytes: Bytes::from(bytes),
        })
    }

    /// Wrap bytes read back from a store.
    pub fn from_parts(id: PresetId, bytes: impl Into<Bytes>) -> Self {
        Self {
            id,
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Parse the stored JSON.
    pub fn to_value(&self) -> StoreResult<Value> {
        serde_json::from_slice(&self.bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Check that the bytes hash to the id.
    ///
    /// Ids that are not content addresses (legacy random ids) cannot be
    /// verified and always pass.
    pub fn verify(&self) -> StoreResult<()> {
        if !self.id.is_content_address() {
            return Ok(());
        }
        let canonical = canonical_bytes(&self.to_value()?);
        let computed = ContentAddresser::PRESET.address(&canonical);
        if computed != self.id {
            return Err(StoreError::HashMismatch {
                id: self.id.clone(),
                computed,
            });
        }
        Ok(())
    }

    /// Store-relative path, `presets/<id>.json`.
    pub fn path(&self) -> String {
        format!("{STORAGE_PREFIX}/{}", self.id.file_name())
    }
}
