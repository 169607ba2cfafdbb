//! Content-addressed object storage for loadout presets.
//!
//! Every saved preset is an immutable JSON object stored at
//! `<prefix>/<id>.json`, where `id` is the truncated SHA-256 of the preset's
//! canonical form. The store is append-only: an id is never rewritten with
//! different content.
//!
//! # Storage Backends
//!
//! All backends implement the async [`PresetStore`] trait:
//!
//! - [`InMemoryPresetStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsPresetStore`] -- one file per preset under a directory root
//! - [`HttpPresetStore`] -- anonymous reads from a storage root URL, writes
//!   through the save endpoint
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Writes are create-if-absent. The existence check and the write are two
//!    separate steps and are not atomic; see [`PresetStore::put_if_absent`].
//! 3. A missing object is [`StoreError::NotFound`], distinct from every
//!    transport or decoding failure.
//! 4. The store never interprets object contents beyond hash verification.

pub mod error;
pub mod fs;
pub mod http;
pub mod memory;
pub mod object;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsPresetStore;
pub use http::HttpPresetStore;
pub use memory::InMemoryPresetStore;
pub use object::{StoredObject, STORAGE_PREFIX};
pub use traits::PresetStore;
