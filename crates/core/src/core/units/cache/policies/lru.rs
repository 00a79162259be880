//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the block that has not been accessed for the longest time.
//! It keeps no side table: the order of blocks inside the set is the usage stack.
//! When a block is accessed it is moved to the back of the set (Most Recently Used
//! position), so the front is always the Least Recently Used block.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `mark_accessed()`: O(W) where W is the number of ways (associativity)
//!   - `choose_victim()`: O(1)
//! - **Space Complexity:** O(1) beyond the set itself
//! - **Best Case:** Working sets that fit in the cache
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::ReplacementPolicy;
use crate::core::units::cache::block::CacheSet;

/// LRU Policy state.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    /// Number of ways per set.
    ways: usize,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets (unused; the sets carry their own order).
    /// * `ways` - The associativity (number of ways) of the cache.
    pub const fn new(_sets: usize, ways: usize) -> Self {
        Self { ways }
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Identifies the victim way to evict.
    ///
    /// Returns the front of the set (LRU position).
    fn choose_victim(&mut self, _set: usize, blocks: &CacheSet) -> usize {
        debug_assert_eq!(blocks.ways(), self.ways);
        0
    }

    /// Moves the accessed `way` to the back of the set (MRU position),
    /// shifting the blocks behind it forward.
    fn mark_accessed(&mut self, _set: usize, way: usize, blocks: &mut CacheSet) {
        blocks.move_to_back(way);
    }
}
