//! Seeded random source shared by every stochastic choice of a run

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
///
/// All randomness of a generation run flows through one selector in a fixed
/// call order, so equal seeds give equal output.
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
    seed: u64,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a selector from a fresh seed drawn from the thread RNG
    pub fn unseeded() -> Self {
        Self::new(rand::rng().random())
    }

    /// Seed the selector was created with
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `[0, len)`, `None` when `len` is zero
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniform integer in `[0, bound)`, `None` when `bound` is zero
    pub fn draw_below(&mut self, bound: u64) -> Option<u64> {
        (bound > 0).then(|| self.rng.random_range(0..bound))
    }
}
