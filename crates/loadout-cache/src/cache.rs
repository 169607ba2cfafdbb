//! [`LocalCache`]: cached bodies plus the persisted recent index.

use std::sync::Mutex;

use loadout_schema::normalize;
use loadout_types::{Document, PresetId, PresetSummary, SavedPreset};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{CacheError, CacheResult};
use crate::kv::KeyValueStore;
use crate::recent::RecentIndex;

/// Key under which the recent index is persisted.
pub const RECENT_PRESETS_KEY: &str = "recentPresets";

/// Default bound of the recent index.
pub const DEFAULT_RECENT_CAPACITY: usize = 20;

const BODY_KEY_PREFIX: &str = "preset:";

fn body_key(preset_id: &str) -> String {
    format!("{BODY_KEY_PREFIX}{preset_id}")
}

/// On-device preset cache.
///
/// Single-writer from the core's point of view; the internal mutex only
/// keeps index read-modify-write cycles from interleaving inside one
/// process.
pub struct LocalCache<K> {
    kv: K,
    capacity: usize,
    index_lock: Mutex<()>,
}

impl<K: KeyValueStore> LocalCache<K> {
    /// Cache with the default index bound.
    pub fn new(kv: K) -> Self {
        Self::with_capacity(kv, DEFAULT_RECENT_CAPACITY)
    }

    pub fn with_capacity(kv: K, capacity: usize) -> Self {
        Self {
            kv,
            capacity: capacity.max(1),
            index_lock: Mutex::new(()),
        }
    }

    /// The underlying substrate.
    pub fn store(&self) -> &K {
        &self.kv
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached document for `preset_id`, normalized.
    ///
    /// Bodies may have been written by an older client, so they go through
    /// the normalizer like remote content does. A body that is not JSON at
    /// all is reported as corrupt so the caller can fall through to the
    /// remote store.
    pub fn get(&self, preset_id: &str) -> CacheResult<Document> {
        let key = body_key(preset_id);
        let raw = self
            .kv
            .get(&key)?
            .ok_or_else(|| CacheError::NotFound(preset_id.to_string()))?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| CacheError::Corrupt {
            key,
            reason: e.to_string(),
        })?;
        debug!(id = preset_id, "local cache hit");
        Ok(normalize(&value))
    }

    /// Store the body of a preset.
    pub fn put_document(&self, preset_id: &PresetId, preset: &SavedPreset) -> CacheResult<()> {
        let body =
            serde_json::to_string(preset).map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.kv.set(&body_key(preset_id.as_str()), &body)
    }

    /// Promote `summary` to the front of the recent index, evicting (and
    /// pruning the bodies of) whatever falls off the end.
    ///
    /// If the stored index was unreadable, bodies it no longer references
    /// are pruned once the rebuilt index is written.
    pub fn put(&self, summary: PresetSummary) -> CacheResult<()> {
        let _guard = self.index_lock.lock().expect("lock poisoned");
        let (mut index, corrupt) = self.load_index()?;
        let evicted = index.promote(summary);
        self.save_index(&index)?;
        for entry in evicted {
            debug!(id = %entry.preset_id, "evicted from recent presets");
            self.kv.remove(&body_key(&entry.preset_id))?;
        }
        if corrupt {
            self.prune_orphans(&index)?;
        }
        Ok(())
    }

    /// Recent presets, most recent first.
    pub fn list(&self) -> CacheResult<Vec<PresetSummary>> {
        let (index, _) = self.load_index()?;
        Ok(index.entries().to_vec())
    }

    /// Drop a preset from the index and delete its body.
    /// Returns `true` if either existed.
    pub fn remove(&self, preset_id: &str) -> CacheResult<bool> {
        let _guard = self.index_lock.lock().expect("lock poisoned");
        let (mut index, corrupt) = self.load_index()?;
        let was_indexed = index.remove(preset_id).is_some();
        if was_indexed || corrupt {
            self.save_index(&index)?;
        }
        let had_body = self.kv.remove(&body_key(preset_id))?;
        if corrupt {
            self.prune_orphans(&index)?;
        }
        Ok(was_indexed || had_body)
    }

    /// The persisted index, and whether it had to be discarded as corrupt.
    fn load_index(&self) -> CacheResult<(RecentIndex, bool)> {
        let (entries, corrupt) = match self.kv.get(RECENT_PRESETS_KEY)? {
            None => (Vec::new(), false),
            Some(raw) => match serde_json::from_str::<Vec<PresetSummary>>(&raw) {
                Ok(entries) => (entries, false),
                Err(e) => {
                    warn!(error = %e, "recent presets index is corrupt, starting empty");
                    (Vec::new(), true)
                }
            },
        };
        Ok((RecentIndex::from_entries(entries, self.capacity), corrupt))
    }

    /// Delete every body whose id is not in `index`.
    fn prune_orphans(&self, index: &RecentIndex) -> CacheResult<()> {
        for key in self.kv.keys()? {
            let Some(preset_id) = key.strip_prefix(BODY_KEY_PREFIX) else {
                continue;
            };
            if !index.contains(preset_id) {
                debug!(id = preset_id, "pruning body missing from recent presets");
                self.kv.remove(&key)?;
            }
        }
        Ok(())
    }

    fn save_index(&self, index: &RecentIndex) -> CacheResult<()> {
        let raw = serde_json::to_string(index.as_slice())
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.kv.set(RECENT_PRESETS_KEY, &raw)
    }
}

impl<K> std::fmt::Debug for LocalCache<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCache")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::InMemoryKeyValueStore;
    use loadout_types::{PresetSource, Slot, INVENTORY_SLOT_COUNT};

    fn id(s: &str) -> PresetId {
        PresetId::parse(s).unwrap()
    }

    fn preset(name: &str) -> SavedPreset {
        let mut p = SavedPreset::blank();
        p.preset_name = name.into();
        p.inventory_slots[0] = Slot::new("sword");
        p
    }

    fn save(cache: &LocalCache<InMemoryKeyValueStore>, preset_id: &str, name: &str) {
        cache.put_document(&id(preset_id), &preset(name)).unwrap();
        cache
            .put(PresetSummary::new(preset_id, name, PresetSource::Cloud))
            .unwrap();
    }

    fn listed_ids(cache: &LocalCache<InMemoryKeyValueStore>) -> Vec<String> {
        cache
            .list()
            .unwrap()
            .into_iter()
            .map(|s| s.preset_id)
            .collect()
    }

    #[test]
    fn get_returns_cached_document() {
        let cache = LocalCache::new(InMemoryKeyValueStore::new());
        save(&cache, "p1", "Boss Setup");
        let doc = cache.get("p1").unwrap();
        assert_eq!(doc.preset, preset("Boss Setup"));
    }

    #[test]
    fn get_missing_is_not_found() {
        let cache = LocalCache::new(InMemoryKeyValueStore::new());
        assert!(cache.get("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn get_normalizes_legacy_bodies() {
        let kv = InMemoryKeyValueStore::new();
        kv.set("preset:old", r#"{"presetName":"Old","inventorySlots":[{"id":"axe"}]}"#)
            .unwrap();
        let cache = LocalCache::new(kv);
        let doc = cache.get("old").unwrap();
        assert_eq!(doc.preset.inventory_slots.len(), INVENTORY_SLOT_COUNT);
        assert_eq!(doc.preset.inventory_slots[0].id, "axe");
    }

    #[test]
    fn get_unparsable_body_is_corrupt() {
        let kv = InMemoryKeyValueStore::new();
        kv.set("preset:bad", "{truncated").unwrap();
        let cache = LocalCache::new(kv);
        assert!(matches!(
            cache.get("bad"),
            Err(CacheError::Corrupt { .. })
        ));
    }

    #[test]
    fn list_is_most_recent_first_and_deduplicated() {
        let cache = LocalCache::new(InMemoryKeyValueStore::new());
        save(&cache, "a", "A");
        save(&cache, "b", "B");
        save(&cache, "a", "A again");
        assert_eq!(listed_ids(&cache), ["a", "b"]);
        assert_eq!(cache.list().unwrap()[0].preset_name, "A again");
    }

    #[test]
    fn eviction_prunes_bodies() {
        let cache = LocalCache::with_capacity(InMemoryKeyValueStore::new(), 2);
        save(&cache, "a", "A");
        save(&cache, "b", "B");
        save(&cache, "c", "C");
        assert_eq!(listed_ids(&cache), ["c", "b"]);
        assert!(cache.get("a").unwrap_err().is_not_found());
        assert!(cache.get("b").is_ok());
        // index key + two bodies
        assert_eq!(cache.store().len(), 3);
    }

    #[test]
    fn default_capacity_is_twenty() {
        let cache = LocalCache::new(InMemoryKeyValueStore::new());
        for i in 0..25 {
            save(&cache, &format!("p{i}"), "x");
        }
        let listed = listed_ids(&cache);
        assert_eq!(listed.len(), DEFAULT_RECENT_CAPACITY);
        assert_eq!(listed[0], "p24");
        assert_eq!(listed[19], "p5");
        assert_eq!(cache.store().len(), DEFAULT_RECENT_CAPACITY + 1);
    }

    #[test]
    fn remove_drops_index_entry_and_body() {
        let cache = LocalCache::new(InMemoryKeyValueStore::new());
        save(&cache, "a", "A");
        assert!(cache.remove("a").unwrap());
        assert!(!cache.remove("a").unwrap());
        assert!(cache.list().unwrap().is_empty());
        assert!(cache.get("a").unwrap_err().is_not_found());
    }

    #[test]
    fn corrupt_index_reads_as_empty() {
        let kv = InMemoryKeyValueStore::new();
        kv.set(RECENT_PRESETS_KEY, "not json").unwrap();
        let cache = LocalCache::new(kv);
        assert!(cache.list().unwrap().is_empty());
        save(&cache, "a", "A");
        assert_eq!(listed_ids(&cache), ["a"]);
    }

    #[test]
    fn corrupt_index_prunes_unreferenced_bodies() {
        let cache = LocalCache::with_capacity(InMemoryKeyValueStore::new(), 2);
        save(&cache, "a", "A");
        save(&cache, "b", "B");
        cache.store().set(RECENT_PRESETS_KEY, "garbage").unwrap();
        for i in 0..10 {
            save(&cache, &format!("n{i}"), "x");
        }
        assert_eq!(listed_ids(&cache), ["n9", "n8"]);
        assert_eq!(
            cache.store().keys().unwrap(),
            ["preset:n8", "preset:n9", RECENT_PRESETS_KEY]
        );
    }

    #[test]
    fn remove_after_corrupt_index_prunes_bodies() {
        let cache = LocalCache::new(InMemoryKeyValueStore::new());
        save(&cache, "a", "A");
        save(&cache, "b", "B");
        cache.store().set(RECENT_PRESETS_KEY, "{}").unwrap();
        assert!(cache.remove("a").unwrap());
        assert!(cache.get("b").unwrap_err().is_not_found());
        assert_eq!(cache.store().get(RECENT_PRESETS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn index_wire_format() {
        let cache = LocalCache::new(InMemoryKeyValueStore::new());
        cache
            .put(PresetSummary::new("a", "A", PresetSource::Local))
            .unwrap();
        let raw = cache.store().get(RECENT_PRESETS_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"presetId":"a","presetName":"A","source":"local"}]"#
        );
    }

    #[test]
    fn file_backed_cache_survives_reopen() {
        use crate::kv::FileKeyValueStore;
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = LocalCache::new(FileKeyValueStore::open(dir.path()).unwrap());
            cache.put_document(&id("p1"), &preset("Saved")).unwrap();
            cache
                .put(PresetSummary::new("p1", "Saved", PresetSource::Cloud))
                .unwrap();
        }
        let cache = LocalCache::new(FileKeyValueStore::open(dir.path()).unwrap());
        assert_eq!(cache.list().unwrap().len(), 1);
        assert_eq!(cache.get("p1").unwrap().preset.preset_name, "Saved");
    }
}
