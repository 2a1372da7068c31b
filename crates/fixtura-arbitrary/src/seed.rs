//! Seed derivation helpers for deterministic tree construction.
//!
//! Every node derives its own seed from its parent's seed plus its field
//! name or element index, so regenerating the same node under the same base
//! seed is deterministic.

/// Mix a string key into a base seed (FNV-1a style).
pub fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Mix a zero-based element index into a parent seed.
pub fn hash_index_seed(seed: u64, index: u64) -> u64 {
    let mut hash = seed ^ index.wrapping_mul(0x9e3779b97f4a7c15);
    hash = hash.wrapping_mul(0x100000001b3);
    hash
}
