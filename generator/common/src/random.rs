//! Random number generator handles.
//!
//! The generator is always passed explicitly so that a run can be reproduced from its seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a fresh seed value from the thread-local generator.
pub fn generate_seed() -> u64 {
    rand::thread_rng().gen()
}

/// Create the generator for a run.
///
/// Uses `seed` when given and a freshly generated one otherwise.
/// Returns the generator together with the seed that was used.
pub fn seeded_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(generate_seed);
    (StdRng::seed_from_u64(seed), seed)
}
