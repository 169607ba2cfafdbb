use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A single cell of a loadout.
///
/// Identity is the `id` alone; the empty string marks an empty slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
}

impl Slot {
    /// The empty slot sentinel.
    pub fn empty() -> Self {
        Self { id: String::new() }
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Which slot collection a breakdown entry (or editor selection) refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotType {
    Inventory,
    Equipment,
    Relic,
    RelicAlternative,
    Familiar,
    FamiliarAlternative,
}

impl SlotType {
    pub const ALL: [SlotType; 6] = [
        Self::Inventory,
        Self::Equipment,
        Self::Relic,
        Self::RelicAlternative,
        Self::Familiar,
        Self::FamiliarAlternative,
    ];

    /// Wire name, as it appears in stored presets.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Equipment => "equipment",
            Self::Relic => "relic",
            Self::RelicAlternative => "relicAlternative",
            Self::Familiar => "familiar",
            Self::FamiliarAlternative => "familiarAlternative",
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TypeError::UnknownSlotType(s.to_string()))
    }
}

/// Address of one slot: collection plus position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotKey {
    pub slot_type: SlotType,
    pub slot_index: u32,
}

impl SlotKey {
    pub fn new(slot_type: SlotType, slot_index: u32) -> Self {
        Self {
            slot_type,
            slot_index,
        }
    }
}

/// Free-text annotation attached to one slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub slot_type: SlotType,
    pub slot_index: u32,
    pub description: String,
}

impl BreakdownEntry {
    pub fn new(slot_type: SlotType, slot_index: u32, description: impl Into<String>) -> Self {
        Self {
            slot_type,
            slot_index,
            description: description.into(),
        }
    }

    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.slot_type, self.slot_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_type_wire_names_match_serde() {
        for ty in SlotType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
            assert_eq!(ty.as_str().parse::<SlotType>().unwrap(), ty);
        }
    }

    #[test]
    fn unknown_slot_type() {
        assert_eq!(
            "pocket".parse::<SlotType>(),
            Err(TypeError::UnknownSlotType("pocket".into()))
        );
    }

    #[test]
    fn breakdown_entry_wire_shape() {
        let entry = BreakdownEntry::new(SlotType::RelicAlternative, 2, "swap for phase 3");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "slotType": "relicAlternative",
                "slotIndex": 2,
                "description": "swap for phase 3",
            })
        );
        assert_eq!(entry.key(), SlotKey::new(SlotType::RelicAlternative, 2));
    }

    #[test]
    fn empty_slot() {
        assert!(Slot::empty().is_empty());
        assert!(!Slot::new("sword").is_empty());
        assert_eq!(Slot::default(), Slot::empty());
    }
}
