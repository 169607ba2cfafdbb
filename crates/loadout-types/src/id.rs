use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Number of hex characters in a content-derived preset id.
pub const CONTENT_ID_HEX_LEN: usize = 32;

/// Longest id accepted by [`PresetId::parse`].
const MAX_ID_LEN: usize = 64;

/// Identifier of a stored preset.
///
/// Ids minted by the content addresser are 32 lowercase hex characters.
/// Presets written by older versions of the write endpoint carry random
/// UUIDs instead, and those must still resolve, so any path-safe token is
/// accepted: non-empty, at most 64 characters, ASCII alphanumerics plus `-`
/// and `_`. The id is used verbatim as a file name in the object store, which
/// is why separators and dots are rejected.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PresetId(String);

impl PresetId {
    /// Parse and validate an id.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let invalid = |reason: &str| TypeError::InvalidPresetId {
            id: s.to_string(),
            reason: reason.to_string(),
        };
        if s.is_empty() {
            return Err(invalid("empty"));
        }
        if s.len() > MAX_ID_LEN {
            return Err(invalid("too long"));
        }
        if !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(invalid("contains characters outside [A-Za-z0-9_-]"));
        }
        Ok(Self(s.to_string()))
    }

    /// Wrap a digest prefix produced by the content addresser.
    ///
    /// The caller guarantees `hex` is lowercase hex of the right length.
    pub fn from_content_hex(hex: String) -> Self {
        debug_assert_eq!(hex.len(), CONTENT_ID_HEX_LEN);
        Self(hex)
    }

    /// Returns `true` if this id has the shape of a content address.
    pub fn is_content_address(&self) -> bool {
        self.0.len() == CONTENT_ID_HEX_LEN
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this preset inside the storage prefix.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Debug for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PresetId({})", self.0)
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PresetId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PresetId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PresetId> for String {
    fn from(id: PresetId) -> Self {
        id.0
    }
}

impl AsRef<str> for PresetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
