//! Schema normalization for loadout presets.
//!
//! Stored presets were written by many versions of the editor. Rather than a
//! strict parse that fails on drift, [`normalize`] is a total function: every
//! input, however malformed, decodes to a well-formed [`Document`] with all
//! fixed rows at their nominal length. Normalization is idempotent.
//!
//! [`Document`]: loadout_types::Document

pub mod normalize;

pub use normalize::{normalize, normalize_json, normalize_preset};
