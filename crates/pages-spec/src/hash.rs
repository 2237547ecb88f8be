//! Canonical hashing and seed derivation.
//!
//! - Canonical JSON (sorted object keys, compact) for stable hashes
//! - BLAKE3 hashing of generated page sequences
//! - Component seed derivation so each sampler owns an independent stream

use serde::Serialize;

use crate::error::SpecError;

/// Serializes a value to canonical JSON.
///
/// Object keys come out sorted because `serde_json::Value` maps are ordered,
/// and the output is compact, so equal values always yield equal strings.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, SpecError> {
    let value = serde_json::to_value(value)?;
    Ok(serde_json::to_string(&value)?)
}

/// Computes the canonical BLAKE3 hash of a serializable value.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
pub fn canonical_value_hash<T: Serialize>(value: &T) -> Result<String, SpecError> {
    let canonical = canonical_json(value)?;
    Ok(blake3_hash(canonical.as_bytes()))
}

/// Derives a seed for a named component from the run seed.
///
/// ```text
/// component_seed = truncate_u32(BLAKE3(base_seed_le || key))
/// ```
///
/// # Example
/// ```
/// use pages_spec::hash::derive_component_seed;
///
/// let counts = derive_component_seed(42, "event_counts");
/// let widths = derive_component_seed(42, "segment_widths");
/// assert_ne!(counts, widths);
/// ```
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);

    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Computes a BLAKE3 hash of arbitrary data as lowercase hex.
pub fn blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
