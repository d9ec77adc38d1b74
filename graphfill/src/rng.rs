//! Random source provisioning.
//!
//! Every top-level call draws a fresh random source; sources are never shared
//! across calls or threads.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Create a new RNG: reproducible when a seed is given, entropy-seeded otherwise
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
