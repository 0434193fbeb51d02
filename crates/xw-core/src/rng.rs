//! Deterministic simulation-level RNG wrapper.
//!
//! Agents never draw random numbers: every decision is a pure function of the
//! tick snapshot.  The only randomness is in the scheduler's spawn phase, so a
//! single `SimRng` seeded from `SimConfig::seed` makes a whole run
//! reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG used for spawn draws.
///
/// Used only in the single-threaded spawn phase.  Replicate runs use
/// different `SimConfig::seed` values.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// One Bernoulli trial: `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.  `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
