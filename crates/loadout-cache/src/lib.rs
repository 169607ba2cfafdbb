//! Local preset cache.
//!
//! The cache keeps full preset bodies on the device so that a preset the user
//! saved or opened recently resolves without a network round-trip, and keeps
//! a bounded, most-recently-used-first index of those presets for the
//! "recent presets" menu.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] is the device storage substrate (browser local
//!   storage in a web deployment). Two backends ship:
//!   [`InMemoryKeyValueStore`] and [`FileKeyValueStore`].
//! - [`RecentIndex`] is the bounded recency list with explicit
//!   promote/evict semantics.
//! - [`LocalCache`] ties them together. The index is persisted as one JSON
//!   array under [`RECENT_PRESETS_KEY`]; bodies live under `preset:<id>`.
//!
//! # Body retention
//!
//! Only the index is bounded. A body is deleted exactly when its id leaves
//! the index, by eviction or by [`LocalCache::remove`]. When the stored
//! index is unreadable it is rebuilt empty, and the next write through it
//! prunes every body the rebuilt index does not reference. Callers write the
//! index entry before the body, so a failed index write leaves no body
//! behind.

pub mod cache;
pub mod error;
pub mod kv;
pub mod recent;

pub use cache::{LocalCache, DEFAULT_RECENT_CAPACITY, RECENT_PRESETS_KEY};
pub use error::{CacheError, CacheResult};
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
pub use recent::RecentIndex;
