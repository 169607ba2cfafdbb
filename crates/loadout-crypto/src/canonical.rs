//! Deterministic JSON serialization.
//!
//! Canonical form:
//! - object keys sorted by byte order, written as `{"k1":v1,"k2":v2}`
//! - array elements in positional order (slot order is meaningful)
//! - scalars as standard JSON literals, no insignificant whitespace
//!
//! Canonical bytes are only dedup-safe for normalized input: a raw document
//! with a missing key and one with an explicit `null` canonicalize
//! differently.

use serde_json::{Map, Value};

use crate::hasher::HasherError;

/// Return a copy of `value` whose objects are rebuilt in sorted key order.
///
/// The result serializes identically whether or not `serde_json` was built
/// with `preserve_order`.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            let mut out = Map::with_capacity(entries.len());
            for (key, child) in entries {
                out.insert(key.clone(), canonicalize(child));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        _ => value.clone(),
    }
}

/// Compact canonical bytes of `value`. This is what gets hashed.
pub fn canonical_bytes(value: &Value) -> Vec<u8> {
    canonical_string(value).into_bytes()
}

/// [`canonical_bytes`] as a string.
pub fn canonical_string(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

/// Pretty-printed (2-space indent) canonical bytes. This is the stored form.
pub fn pretty_bytes(value: &Value) -> Result<Vec<u8>, HasherError> {
    serde_json::to_vec_pretty(&canonicalize(value))
        .map_err(|e| HasherError::Serialization(e.to_string()))
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_scalar(&Value::String(key.clone()), out);
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => write_scalar(scalar, out),
    }
}

fn write_scalar(value: &Value, out: &mut String) {
    out.push_str(&value.to_string());
}
