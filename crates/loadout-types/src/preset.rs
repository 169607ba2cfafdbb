use serde::{Deserialize, Serialize};

use crate::slot::{BreakdownEntry, Slot, SlotKey};

/// Nominal length of the inventory grid.
pub const INVENTORY_SLOT_COUNT: usize = 28;
/// Nominal length of the equipment grid.
pub const EQUIPMENT_SLOT_COUNT: usize = 13;
/// Nominal length of the primary relic row.
pub const PRIMARY_RELIC_COUNT: usize = 3;
/// Nominal length of the primary familiar row.
pub const PRIMARY_FAMILIAR_COUNT: usize = 1;

fn empty_slots(n: usize) -> Vec<Slot> {
    vec![Slot::empty(); n]
}

/// Relic group: a fixed primary row plus any number of alternatives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relics {
    pub primary_relics: Vec<Slot>,
    pub alternative_relics: Vec<Slot>,
}

impl Default for Relics {
    fn default() -> Self {
        Self {
            primary_relics: empty_slots(PRIMARY_RELIC_COUNT),
            alternative_relics: Vec::new(),
        }
    }
}

/// Familiar group: same shape as [`Relics`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Familiars {
    pub primary_familiars: Vec<Slot>,
    pub alternative_familiars: Vec<Slot>,
}

impl Default for Familiars {
    fn default() -> Self {
        Self {
            primary_familiars: empty_slots(PRIMARY_FAMILIAR_COUNT),
            alternative_familiars: Vec::new(),
        }
    }
}

/// The persisted shape of a preset.
///
/// This is exactly what gets canonicalized, hashed and written to the object
/// store. `Default` is the blank preset with every fixed row at its nominal
/// length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPreset {
    pub preset_name: String,
    pub preset_notes: String,
    pub inventory_slots: Vec<Slot>,
    pub equipment_slots: Vec<Slot>,
    pub relics: Relics,
    pub familiars: Familiars,
    pub breakdown: Vec<BreakdownEntry>,
}

impl Default for SavedPreset {
    fn default() -> Self {
        Self {
            preset_name: String::new(),
            preset_notes: String::new(),
            inventory_slots: empty_slots(INVENTORY_SLOT_COUNT),
            equipment_slots: empty_slots(EQUIPMENT_SLOT_COUNT),
            relics: Relics::default(),
            familiars: Familiars::default(),
            breakdown: Vec::new(),
        }
    }
}

impl SavedPreset {
    /// The blank preset.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Set (or replace) the annotation for a slot. Last write wins; the
    /// entry keeps its original position when replaced.
    pub fn set_breakdown(&mut self, entry: BreakdownEntry) {
        match self.breakdown.iter_mut().find(|e| e.key() == entry.key()) {
            Some(existing) => *existing = entry,
            None => self.breakdown.push(entry),
        }
    }

    /// Annotation for a slot, if any.
    pub fn breakdown_for(&self, key: SlotKey) -> Option<&BreakdownEntry> {
        self.breakdown.iter().find(|e| e.key() == key)
    }
}

/// The in-memory loadout being edited.
///
/// Holds the persisted fields plus transient editor state that never leaves
/// the process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub preset: SavedPreset,
    /// Slot currently selected in the editor.
    pub selection: Option<SlotKey>,
}

impl Document {
    pub fn blank() -> Self {
        Self::default()
    }

    /// Take the persisted snapshot, stripping transient editor state.
    pub fn snapshot(&self) -> SavedPreset {
        self.preset.clone()
    }

    pub fn name(&self) -> &str {
        &self.preset.preset_name
    }
}

impl From<SavedPreset> for Document {
    fn from(preset: SavedPreset) -> Self {
        Self {
            preset,
            selection: None,
        }
    }
}
