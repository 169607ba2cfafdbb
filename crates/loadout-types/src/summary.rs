use std::fmt;

use serde::{Deserialize, Serialize};

/// Name recorded in the recent index when a preset has none.
pub const UNTITLED_PRESET_NAME: &str = "Untitled Preset";

/// Where a resolved preset came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetSource {
    /// On-device cache.
    Local,
    /// Shared object store.
    Cloud,
}

impl fmt::Display for PresetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Cloud => write!(f, "cloud"),
        }
    }
}

/// One entry of the recent-presets index.
///
/// The id is kept as a plain string so an index written by an older client
/// with an id this version would reject still deserializes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSummary {
    pub preset_id: String,
    pub preset_name: String,
    pub source: PresetSource,
}

impl PresetSummary {
    pub fn new(
        preset_id: impl Into<String>,
        preset_name: impl Into<String>,
        source: PresetSource,
    ) -> Self {
        Self {
            preset_id: preset_id.into(),
            preset_name: preset_name.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_wire_shape() {
        let s = PresetSummary::new("abc", "Boss Setup", PresetSource::Cloud);
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            serde_json::json!({"presetId": "abc", "presetName": "Boss Setup", "source": "cloud"})
        );
    }

    #[test]
    fn source_display() {
        assert_eq!(PresetSource::Local.to_string(), "local");
        assert_eq!(PresetSource::Cloud.to_string(), "cloud");
    }
}
