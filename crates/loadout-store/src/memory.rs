use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use loadout_types::PresetId;

use crate::error::{StoreError, StoreResult};
use crate::object::{StoredObject, STORAGE_PREFIX};
use crate::traits::PresetStore;

/// In-memory, HashMap-based preset store.
///
/// Intended for tests and embedding. Counts physical writes so callers can
/// observe the dedup short-circuit, and can be switched offline to simulate
/// transport failures.
pub struct InMemoryPresetStore {
    objects: RwLock<HashMap<PresetId, Bytes>>,
    writes: AtomicUsize,
    offline: AtomicBool,
}

impl InMemoryPresetStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            writes: AtomicUsize::new(0),
            offline: AtomicBool::new(false),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Number of physical writes performed so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// When offline, every operation fails with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Insert bytes directly, bypassing hashing. Used to seed legacy or
    /// conflicting content.
    pub fn insert_raw(&self, id: PresetId, bytes: impl Into<Bytes>) {
        self.objects
            .write()
            .expect("lock poisoned")
            .insert(id, bytes.into());
    }

    /// Return a sorted list of all ids in the store.
    pub fn all_ids(&self) -> Vec<PresetId> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<PresetId> = map.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("store offline".into()));
        }
        Ok(())
    }
}

impl Default for InMemoryPresetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresetStore for InMemoryPresetStore {
    async fn exists(&self, id: &PresetId) -> StoreResult<bool> {
        self.check_online()?;
        Ok(self.objects.read().expect("lock poisoned").contains_key(id))
    }

    async fn write(&self, object: &StoredObject) -> StoreResult<()> {
        self.check_online()?;
        self.objects
            .write()
            .expect("lock poisoned")
            .insert(object.id.clone(), object.bytes.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get(&self, id: &PresetId) -> StoreResult<Bytes> {
        self.check_online()?;
        self.objects
            .read()
            .expect("lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn location(&self, id: &PresetId) -> String {
        format!("{STORAGE_PREFIX}/{}", id.file_name())
    }
}

impl std::fmt::Debug for InMemoryPresetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPresetStore")
            .field("object_count", &self.len())
            .field("writes", &self.write_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_types::{SavedPreset, Slot};
    use std::sync::Arc;

    fn preset(name: &str) -> StoredObject {
        let mut p = SavedPreset::blank();
        p.preset_name = name.into();
        p.inventory_slots[0] = Slot::new("sword");
        StoredObject::seal(&p).unwrap()
    }

    #[tokio::test]
    async fn put_and_get() {
        let store = InMemoryPresetStore::new();
        let obj = preset("Boss Setup");
        let id = store.put_if_absent(&obj).await.unwrap();
        assert_eq!(id, obj.id);
        assert_eq!(store.get(&id).await.unwrap(), obj.bytes);
    }

    #[tokio::test]
    async fn put_if_absent_is_idempotent() {
        let store = InMemoryPresetStore::new();
        let obj = preset("Boss Setup");
        let id1 = store.put_if_absent(&obj).await.unwrap();
        let id2 = store.put_if_absent(&obj).await.unwrap();
        assert_eq!(id1, id2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn existing_object_is_not_overwritten() {
        let store = InMemoryPresetStore::new();
        let obj = preset("Boss Setup");
        store.insert_raw(obj.id.clone(), Bytes::from_static(b"{\"seeded\":true}"));
        store.put_if_absent(&obj).await.unwrap();
        assert_eq!(store.write_count(), 0);
        assert_eq!(
            store.get(&obj.id).await.unwrap(),
            Bytes::from_static(b"{\"seeded\":true}")
        );
    }

    #[tokio::test]
    async fn different_content_different_ids() {
        let store = InMemoryPresetStore::new();
        let a = store.put_if_absent(&preset("a")).await.unwrap();
        let b = store.put_if_absent(&preset("b")).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.all_ids().len(), 2);
    }

    #[tokio::test]
    async fn missing_is_not_found() {
        let store = InMemoryPresetStore::new();
        let id = PresetId::parse("nonexistent-id").unwrap();
        let err = store.get(&id).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!store.exists(&id).await.unwrap());
    }

    #[tokio::test]
    async fn offline_is_transport_error() {
        let store = InMemoryPresetStore::new();
        store.set_offline(true);
        let obj = preset("x");
        let err = store.put_if_absent(&obj).await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
        let err = store.get(&obj.id).await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn rejects_mismatched_object() {
        let store = InMemoryPresetStore::new();
        let good = preset("good");
        let forged = StoredObject::from_parts(good.id.clone(), preset("forged").bytes);
        let err = store.put_if_absent(&forged).await.unwrap_err();
        assert!(matches!(err, StoreError::HashMismatch { .. }));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn concurrent_first_writers_converge() {
        let store = Arc::new(InMemoryPresetStore::new());
        let obj = preset("race");
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let obj = obj.clone();
                tokio::spawn(async move { store.put_if_absent(&obj).await.unwrap() })
            })
            .collect();
        for h in handles {
            assert_eq!(h.await.unwrap(), obj.id);
        }
        assert_eq!(store.len(), 1);
        assert!(store.write_count() >= 1);
        assert_eq!(store.get(&obj.id).await.unwrap(), obj.bytes);
    }

    #[tokio::test]
    async fn shared_trait_object_sees_writes() {
        let inner = Arc::new(InMemoryPresetStore::new());
        let shared: Arc<dyn PresetStore> = inner.clone();
        let obj = preset("shared");
        shared.put_if_absent(&obj).await.unwrap();
        assert!(inner.exists(&obj.id).await.unwrap());
        assert_eq!(inner.write_count(), 1);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryPresetStore::new();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryPresetStore"));
        assert!(debug.contains("object_count"));
    }
}
