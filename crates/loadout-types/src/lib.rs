//! Foundation types for the loadout preset vault.
//!
//! Every other loadout crate depends on `loadout-types`. The types here
//! describe the *current* strict schema of a preset; older or malformed
//! shapes are coerced into them by `loadout-schema`.
//!
//! # Key Types
//!
//! - [`Document`] -- the in-memory loadout being edited (persisted fields plus
//!   transient editor selection)
//! - [`SavedPreset`] -- the subset of a document written to the object store
//! - [`Slot`] -- a single inventory/equipment/relic/familiar cell
//! - [`BreakdownEntry`] -- a per-slot annotation keyed by [`SlotKey`]
//! - [`PresetId`] -- path-safe identifier of a stored preset
//! - [`PresetSummary`] -- an entry of the recent-presets index

pub mod error;
pub mod id;
pub mod preset;
pub mod slot;
pub mod summary;

pub use error::TypeError;
pub use id::{PresetId, CONTENT_ID_HEX_LEN};
pub use preset::{
    Document, Familiars, Relics, SavedPreset, EQUIPMENT_SLOT_COUNT, INVENTORY_SLOT_COUNT,
    PRIMARY_FAMILIAR_COUNT, PRIMARY_RELIC_COUNT,
};
pub use slot::{BreakdownEntry, Slot, SlotKey, SlotType};
pub use summary::{PresetSource, PresetSummary, UNTITLED_PRESET_NAME};
