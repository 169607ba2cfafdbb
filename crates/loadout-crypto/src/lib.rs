//! Canonical serialization and content addressing for loadout presets.
//!
//! Two documents that mean the same thing must hash to the same id. The
//! [`canonical`] module fixes the byte form (sorted object keys, positional
//! arrays, no whitespace) and [`ContentAddresser`] turns those bytes into a
//! short SHA-256 based [`PresetId`](loadout_types::PresetId).
//!
//! All crypto operations wrap established libraries; nothing here is custom
//! cryptography.

pub mod canonical;
pub mod hasher;

pub use canonical::{canonical_bytes, canonical_string, canonicalize, pretty_bytes};
pub use hasher::{ContentAddresser, HasherError};
