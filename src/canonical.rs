//! Stable hashing of metagraph declarations.
//!
//! Values are rendered to JSON and hashed with xxh64, so two metagraphs with
//! the same relations and abbreviations always share a fingerprint.
//!
//! Hashed values must iterate deterministically: collections are `Vec`s in a
//! fixed order or `BTreeMap`s, never `HashMap`s.

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// JSON bytes of a value, as fed to the hasher.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// xxh64 of the canonical bytes.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    let bytes = to_canonical_bytes(value);
    xxh64(&bytes, 0)
}

/// [`canonical_hash`] as 16 lowercase hex digits.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}
