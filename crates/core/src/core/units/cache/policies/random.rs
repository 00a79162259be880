//! Random Replacement Policy.
//!
//! This policy evicts a random way from the set. It uses a xorshift64 generator,
//! seeded from the configuration so that runs are reproducible. The generator is the
//! only state; accesses do not affect victim selection.

use super::ReplacementPolicy;
use crate::core::units::cache::block::CacheSet;

/// Seed substituted for zero, which is a fixed point of xorshift.
const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Random Policy state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    /// Number of ways in the cache.
    ways: usize,
    /// Internal state for the pseudo-random number generator.
    state: u64,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets (unused in this policy but required by interface).
    /// * `ways` - The associativity (number of ways) of the cache.
    /// * `seed` - Initial generator state; zero is replaced by a fixed non-zero seed.
    pub const fn new(_sets: usize, ways: usize, seed: u64) -> Self {
        Self {
            ways,
            state: if seed == 0 { FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the generator and returns the next value.
    #[inline]
    const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl ReplacementPolicy for RandomPolicy {
    /// Generates a pseudo-random number and maps it to a valid way index.
    fn choose_victim(&mut self, _set: usize, _blocks: &CacheSet) -> usize {
        (self.next_u64() % self.ways as u64) as usize
    }

    /// Access patterns do not affect the state, so this is a no-op.
    fn mark_accessed(&mut self, _set: usize, _way: usize, _blocks: &mut CacheSet) {}
}
