use loadout_types::{PresetId, CONTENT_ID_HEX_LEN};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical::canonical_bytes;

/// SHA-256 content addresser.
///
/// The externally visible id is the first 32 hex characters (128 bits) of the
/// digest. That is short enough for a shareable link and plenty for a
/// low-value, non-adversarial document store; it is not a cryptographic
/// commitment.
pub struct ContentAddresser {
    hex_len: usize,
}

impl ContentAddresser {
    /// The addresser used for every stored preset.
    pub const PRESET: Self = Self {
        hex_len: CONTENT_ID_HEX_LEN,
    };

    /// Address canonical bytes.
    pub fn address(&self, canonical: &[u8]) -> PresetId {
        let mut full = Self::digest_hex(canonical);
        full.truncate(self.hex_len);
        PresetId::from_content_hex(full)
    }

    /// Canonicalize `value` and address the result.
    pub fn address_value(&self, value: &Value) -> PresetId {
        self.address(&canonical_bytes(value))
    }

    /// Address any serializable value via its canonical JSON form.
    pub fn address_json<T: serde::Serialize>(&self, value: &T) -> Result<PresetId, HasherError> {
        let value =
            serde_json::to_value(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(self.address_value(&value))
    }

    /// Check that canonical bytes produce the expected id.
    pub fn verify(&self, canonical: &[u8], expected: &PresetId) -> bool {
        self.address(canonical) == *expected
    }

    /// Full 64-character hex SHA-256 digest, untruncated.
    pub fn digest_hex(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }
}

/// Errors from canonicalization and hashing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn address_is_deterministic() {
        let id1 = ContentAddresser::PRESET.address(b"hello world");
        let id2 = ContentAddresser::PRESET.address(b"hello world");
        assert_eq!(id1, id2);
    }

    #[test]
    fn address_is_truncated_sha256() {
        // SHA-256("abc") = ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad
        let id = ContentAddresser::PRESET.address(b"abc");
        assert_eq!(id.as_str(), "ba7816bf8f01cfea414140de5dae2223");
        assert_eq!(
            ContentAddresser::digest_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn address_shape() {
        let id = ContentAddresser::PRESET.address(b"{}");
        assert_eq!(id.as_str().len(), 32);
        assert!(id.is_content_address());
    }

    #[test]
    fn truncated_ids_share_full_digest_prefix() {
        let data = b"prefix property";
        let id = ContentAddresser::PRESET.address(data);
        assert!(ContentAddresser::digest_hex(data).starts_with(id.as_str()));
    }

    #[test]
    fn value_address_ignores_key_order() {
        let a: Value = serde_json::from_str(r#"{"a":1,"b":2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        assert_eq!(
            ContentAddresser::PRESET.address_value(&a),
            ContentAddresser::PRESET.address_value(&b)
        );
    }

    #[test]
    fn verify_correct_and_tampered() {
        let id = ContentAddresser::PRESET.address(b"original");
        assert!(ContentAddresser::PRESET.verify(b"original", &id));
        assert!(!ContentAddresser::PRESET.verify(b"tampered", &id));
    }

    #[test]
    fn address_json_matches_address_value() {
        let v = json!({"presetName": "Boss Setup"});
        assert_eq!(
            ContentAddresser::PRESET.address_json(&v).unwrap(),
            ContentAddresser::PRESET.address_value(&v)
        );
    }
}
