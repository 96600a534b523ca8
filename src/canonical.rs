//! Canonical serialization for deterministic fingerprints.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: struct fields serialize in declaration order
//! - Stable Vec order: versions and events serialize in derivation order
//! - Step dictionaries are `BTreeMap`, so key order is sorted

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes for hashing.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// Compute canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), 0)
}

/// Compute canonical hash and return as hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimelineEvent;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_determinism() {
        let event = TimelineEvent::new("Preprint posted", Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap());

        assert_eq!(canonical_hash(&event), canonical_hash(&event.clone()));
    }

    #[test]
    fn test_hex_width() {
        assert_eq!(canonical_hash_hex(&"x").len(), 16);
    }
}
