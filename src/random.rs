//! Seeded random number generation.
//!
//! All stochastic steps of a run (initialization, selection, crossover,
//! mutation) draw from a single generator created here, so a seed fully
//! determines the run.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator type used by the engine.
pub type Rng = ChaCha8Rng;

/// Creates a reproducible generator from a 64-bit seed.
///
/// ChaCha8 produces the same stream on every platform and across `rand`
/// releases, unlike `StdRng`.
pub fn create_rng(seed: u64) -> Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
