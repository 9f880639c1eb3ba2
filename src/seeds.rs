//! Seed management for cave generation.
//!
//! Maps a user-supplied seed string to the u64 state that drives the
//! pipeline's ChaCha8 generator, and derives a throwaway seed string from
//! the wall clock for "random seed" mode.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hash a seed string into generator state.
///
/// Uses the standard library's `DefaultHasher`, so identical strings map
/// to identical seeds within a given Rust release. Reproducibility is
/// guaranteed per build, not across toolchain versions.
pub fn seed_from_string(seed: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    hasher.finish()
}

/// Derive a fresh seed string from the current local time.
///
/// Random-seed mode is non-deterministic by design; the timestamp string
/// is kept (rather than raw entropy) so a run's seed can be logged and
/// replayed later as a fixed seed.
pub fn random_seed_string() -> String {
    chrono::Local::now().to_string()
}
