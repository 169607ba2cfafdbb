//! Preset resolution for the loadout vault.
//!
//! [`Resolver`] is the entry point applications use. It turns a bare id into
//! a normalized [`Document`](loadout_types::Document) by trying the local
//! cache, then the object store, then falling back to a blank document, and
//! it drives the save path (snapshot, canonicalize, address, create-if-absent
//! write, record in the recent index).

pub mod error;
pub mod resolver;

pub use error::{ResolveError, ResolveResult};
pub use resolver::{Resolved, Resolver};

pub use loadout_cache::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, LocalCache};
pub use loadout_store::{FsPresetStore, HttpPresetStore, InMemoryPresetStore, PresetStore};
pub use loadout_types::{Document, PresetId, PresetSource, PresetSummary, SavedPreset};
