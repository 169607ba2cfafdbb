use async_trait::async_trait;
use bytes::Bytes;
use loadout_types::PresetId;
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::object::StoredObject;

/// Content-addressed preset store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. The same content always produces
///   the same id, so a path is only ever written with one byte sequence.
/// - `get` returns [`StoreError::NotFound`](crate::StoreError::NotFound) for
///   a missing object and a different variant for every other failure.
/// - Writes become visible to readers after the backend's own consistency
///   window; callers do not wait for or verify propagation.
#[async_trait]
pub trait PresetStore: Send + Sync {
    /// Check whether an object exists at the id-derived path.
    async fn exists(&self, id: &PresetId) -> StoreResult<bool>;

    /// Write an object to its id-derived path unconditionally.
    async fn write(&self, object: &StoredObject) -> StoreResult<()>;

    /// Read the stored bytes of an object.
    async fn get(&self, id: &PresetId) -> StoreResult<Bytes>;

    /// Where the object for `id` lives: a URL for remote stores, a file path
    /// for local ones.
    fn location(&self, id: &PresetId) -> String;

    /// Create-if-absent write. Returns the object's id.
    ///
    /// If the object already exists nothing is written; this short-circuit is
    /// also what makes retries idempotent.
    ///
    /// The existence check and the write are separate round-trips and are
    /// **not atomic**. Two first-writers of the same content can both observe
    /// "absent" and both write. Both write identical bytes to the identical
    /// path, so the outcome converges and the race is benign. No lock or
    /// transaction is taken because the remote store offers none.
    async fn put_if_absent(&self, object: &StoredObject) -> StoreResult<PresetId> {
        object.verify()?;
        if self.exists(&object.id).await? {
            debug!(id = %object.id, "preset already stored, skipping write");
            return Ok(object.id.clone());
        }
        self.write(object).await?;
        info!(id = %object.id, size = object.size(), "stored preset");
        Ok(object.id.clone())
    }
}

#[async_trait]
impl<T: PresetStore + ?Sized> PresetStore for std::sync::Arc<T> {
    async fn exists(&self, id: &PresetId) -> StoreResult<bool> {
        (**self).exists(id).await
    }

    async fn write(&self, object: &StoredObject) -> StoreResult<()> {
        (**self).write(object).await
    }

    async fn get(&self, id: &PresetId) -> StoreResult<Bytes> {
        (**self).get(id).await
    }

    fn location(&self, id: &PresetId) -> String {
        (**self).location(id)
    }

    async fn put_if_absent(&self, object: &StoredObject) -> StoreResult<PresetId> {
        (**self).put_if_absent(object).await
    }
}
