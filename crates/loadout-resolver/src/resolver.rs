use loadout_cache::{KeyValueStore, LocalCache};
use loadout_schema::{normalize, normalize_preset};
use loadout_store::{PresetStore, StoreError, StoredObject};
use loadout_types::{
    Document, PresetId, PresetSource, PresetSummary, SavedPreset, UNTITLED_PRESET_NAME,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ResolveError, ResolveResult};

/// Outcome of [`Resolver::load`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    /// Always well-formed; blank when nothing was found.
    pub document: Document,
    /// Id the document was found under. `None` for the blank fallback.
    pub preset_id: Option<PresetId>,
    /// Tier that produced the document. `None` for the blank fallback.
    pub source: Option<PresetSource>,
}

impl Resolved {
    fn found(document: Document, preset_id: PresetId, source: PresetSource) -> Self {
        Self {
            document,
            preset_id: Some(preset_id),
            source: Some(source),
        }
    }

    fn blank() -> Self {
        Self {
            document: Document::blank(),
            preset_id: None,
            source: None,
        }
    }

    /// Returns `true` unless this is the blank fallback.
    pub fn is_found(&self) -> bool {
        self.source.is_some()
    }
}

/// Tiered preset resolver over an object store and a local cache.
pub struct Resolver<S, K> {
    store: S,
    cache: LocalCache<K>,
}

impl<S: PresetStore, K: KeyValueStore> Resolver<S, K> {
    pub fn new(store: S, cache: LocalCache<K>) -> Self {
        Self { store, cache }
    }

    /// Resolver with a default-capacity cache over `kv`.
    pub fn with_kv(store: S, kv: K) -> Self {
        Self::new(store, LocalCache::new(kv))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &LocalCache<K> {
        &self.cache
    }

    /// Resolve `id` to a document.
    ///
    /// Tries the local cache, then the object store. Never fails: every miss
    /// or error is logged and the next tier is tried, ending in a blank
    /// document with no source. A document fetched from the store is cached
    /// and promoted in the recent index.
    pub async fn load(&self, id: &str) -> Resolved {
        let preset_id = match PresetId::parse(id) {
            Ok(preset_id) => preset_id,
            Err(e) => {
                warn!(id, error = %e, "invalid preset id, using blank preset");
                return Resolved::blank();
            }
        };

        match self.cache.get(preset_id.as_str()) {
            Ok(document) => return Resolved::found(document, preset_id, PresetSource::Local),
            Err(e) if e.is_not_found() => debug!(id = %preset_id, "not in local cache"),
            Err(e) => warn!(id = %preset_id, error = %e, "local cache read failed, trying store"),
        }

        match self.fetch(&preset_id).await {
            Ok(document) => {
                if let Err(e) = self.record(&preset_id, &document.preset, PresetSource::Cloud) {
                    warn!(id = %preset_id, error = %e, "failed to cache fetched preset");
                }
                Resolved::found(document, preset_id, PresetSource::Cloud)
            }
            Err(e) if e.is_not_found() => {
                warn!(id = %preset_id, "preset not found, using blank preset");
                Resolved::blank()
            }
            Err(e) => {
                warn!(id = %preset_id, error = %e, "failed to load preset, using blank preset");
                Resolved::blank()
            }
        }
    }

    /// Persist the document and return its content address.
    ///
    /// The store write is create-if-absent, so saving unchanged content again
    /// yields the same id without a second object. If the store write fails
    /// nothing is recorded locally.
    pub async fn save(&self, document: &Document) -> ResolveResult<PresetId> {
        let value = serde_json::to_value(document.snapshot())
            .map_err(|e| ResolveError::Validation(e.to_string()))?;
        self.save_preset(normalize_preset(&value)).await
    }

    /// Save an untrusted JSON payload.
    ///
    /// Anything but a JSON object is rejected before any write. Objects are
    /// normalized first, so legacy shapes address the same as their
    /// normalized equivalents.
    pub async fn save_raw(&self, raw: &Value) -> ResolveResult<PresetId> {
        if !raw.is_object() {
            return Err(ResolveError::Validation(format!(
                "expected a JSON object, got {}",
                json_kind(raw)
            )));
        }
        self.save_preset(normalize_preset(raw)).await
    }

    /// Recent presets, most recent first.
    pub fn recent(&self) -> ResolveResult<Vec<PresetSummary>> {
        Ok(self.cache.list()?)
    }

    /// Drop a preset from the recent index and the local cache. The stored
    /// object is untouched.
    pub fn forget(&self, id: &str) -> ResolveResult<bool> {
        Ok(self.cache.remove(id)?)
    }

    async fn save_preset(&self, preset: SavedPreset) -> ResolveResult<PresetId> {
        let object = StoredObject::seal(&preset)?;
        let id = self.store.put_if_absent(&object).await?;
        info!(%id, name = %preset.preset_name, "saved preset");
        if let Err(e) = self.record(&id, &preset, PresetSource::Cloud) {
            warn!(%id, error = %e, "preset saved but local cache update failed");
        }
        Ok(id)
    }

    async fn fetch(&self, id: &PresetId) -> Result<Document, StoreError> {
        let bytes = self.store.get(id).await?;
        let raw: Value = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(normalize(&raw))
    }

    fn record(
        &self,
        id: &PresetId,
        preset: &SavedPreset,
        source: PresetSource,
    ) -> loadout_cache::CacheResult<()> {
        let name = if preset.preset_name.trim().is_empty() {
            UNTITLED_PRESET_NAME
        } else {
            preset.preset_name.as_str()
        };
        // Index first: a body is only written once something references it.
        self.cache.put(PresetSummary::new(id.as_str(), name, source))?;
        self.cache.put_document(id, preset)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
