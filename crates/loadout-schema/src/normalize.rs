use loadout_types::{
    BreakdownEntry, Document, Familiars, Relics, SavedPreset, Slot, SlotType,
    EQUIPMENT_SLOT_COUNT, INVENTORY_SLOT_COUNT, PRIMARY_FAMILIAR_COUNT, PRIMARY_RELIC_COUNT,
};
use serde_json::{Map, Value};
use tracing::debug;

/// Decode any JSON value into a well-formed document.
///
/// Never fails. A non-object root yields the blank document.
pub fn normalize(raw: &Value) -> Document {
    Document::from(normalize_preset(raw))
}

/// Parse `bytes` as JSON and normalize. Unparsable input yields the blank
/// document.
pub fn normalize_json(bytes: &[u8]) -> Document {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(raw) => normalize(&raw),
        Err(e) => {
            debug!(error = %e, "unparsable preset json, using blank document");
            Document::blank()
        }
    }
}

/// Decode the persisted part of a preset.
pub fn normalize_preset(raw: &Value) -> SavedPreset {
    let Some(obj) = raw.as_object() else {
        return SavedPreset::blank();
    };

    let (primary_relics, alternative_relics) =
        read_group(obj.get("relics"), "primaryRelics", "alternativeRelics", PRIMARY_RELIC_COUNT);
    let (primary_familiars, alternative_familiars) = read_group(
        obj.get("familiars"),
        "primaryFamiliars",
        "alternativeFamiliars",
        PRIMARY_FAMILIAR_COUNT,
    );

    SavedPreset {
        preset_name: read_string(obj, "presetName"),
        preset_notes: read_notes(obj),
        inventory_slots: read_fixed(obj.get("inventorySlots"), INVENTORY_SLOT_COUNT),
        equipment_slots: read_fixed(obj.get("equipmentSlots"), EQUIPMENT_SLOT_COUNT),
        relics: Relics {
            primary_relics,
            alternative_relics,
        },
        familiars: Familiars {
            primary_familiars,
            alternative_familiars,
        },
        breakdown: read_breakdown(obj.get("breakdown")),
    }
}

fn read_string(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

// Early editors stored notes under `notes`.
fn read_notes(obj: &Map<String, Value>) -> String {
    obj.get("presetNotes")
        .and_then(Value::as_str)
        .or_else(|| obj.get("notes").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_default()
}

fn read_slot(raw: Option<&Value>) -> Slot {
    match raw {
        Some(Value::Object(entry)) => match entry.get("id") {
            Some(Value::String(id)) => Slot::new(id.clone()),
            _ => Slot::empty(),
        },
        // Legacy rows held bare id strings.
        Some(Value::String(id)) => Slot::new(id.clone()),
        _ => Slot::empty(),
    }
}

/// Exactly `len` slots: copy what exists, pad the rest, drop overflow.
fn read_fixed(raw: Option<&Value>, len: usize) -> Vec<Slot> {
    let items = raw.and_then(Value::as_array);
    (0..len)
        .map(|i| read_slot(items.and_then(|a| a.get(i))))
        .collect()
}

/// Variable-length row: keep order, drop empty or malformed entries.
fn read_alternatives(raw: Option<&Value>) -> Vec<Slot> {
    raw.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| read_slot(Some(item)))
                .filter(|slot| !slot.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn read_group(
    raw: Option<&Value>,
    primary_key: &str,
    alternative_key: &str,
    primary_len: usize,
) -> (Vec<Slot>, Vec<Slot>) {
    match raw {
        Some(Value::Object(group)) => (
            read_fixed(group.get(primary_key), primary_len),
            read_alternatives(group.get(alternative_key)),
        ),
        // Pre-group schema: a bare array is the primary row.
        Some(row @ Value::Array(_)) => (read_fixed(Some(row), primary_len), Vec::new()),
        _ => (read_fixed(None, primary_len), Vec::new()),
    }
}

fn read_breakdown(raw: Option<&Value>) -> Vec<BreakdownEntry> {
    let Some(items) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut preset = SavedPreset::blank();
    let mut dropped = 0usize;
    for item in items {
        match read_breakdown_entry(item) {
            Some(entry) => preset.set_breakdown(entry),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, "dropped invalid breakdown entries");
    }
    preset.breakdown
}

fn read_breakdown_entry(raw: &Value) -> Option<BreakdownEntry> {
    let entry = raw.as_object()?;
    let slot_type: SlotType = entry.get("slotType")?.as_str()?.parse().ok()?;
    let slot_index = read_slot_index(entry.get("slotIndex")?)?;
    let description = read_string(entry, "description");
    Some(BreakdownEntry::new(slot_type, slot_index, description))
}

/// Non-negative integer that fits a `u32`. Integral floats are accepted.
fn read_slot_index(raw: &Value) -> Option<u32> {
    if let Some(n) = raw.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = raw.as_f64()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) {
        Some(f as u32)
    } else {
        None
    }
}
