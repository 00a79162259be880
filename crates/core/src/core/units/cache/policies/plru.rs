//! Pseudo-LRU (PLRU) Replacement Policy.
//!
//! PLRU approximates Least Recently Used with a complete binary tree per set, stored
//! as a flat array of `2 * ways - 1` cells:
//!
//! - cells `0 .. ways - 1` are internal direction bits, initially 0;
//! - cells `ways - 1 .. 2 * ways - 1` are leaves, one per way, initially -1.
//!
//! To find a victim the tree is walked from the root, going left on 0 and right on 1,
//! until a leaf is reached. On access every ancestor of the way's leaf is inverted,
//! whichever child the path came from. This is a plain toggle, not the textbook
//! "point away from the accessed subtree" update, and it decides which blocks
//! get evicted.
//!
//! Leaves record the tag of the block last accessed in that way. They are kept for
//! diagnostics (`PlruPolicy::tree`) and are never read by the victim walk.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `mark_accessed()`: O(log W)
//!   - `choose_victim()`: O(log W)
//! - **Space Complexity:** O(S × W) where S is sets, W is ways
//! - **Hardware Cost:** Low - simple bit operations

use super::ReplacementPolicy;
use crate::core::units::cache::block::CacheSet;

/// Leaf value before a way has been accessed.
const EMPTY_LEAF: i64 = -1;

/// PLRU Policy state.
#[derive(Debug, Clone)]
pub struct PlruPolicy {
    /// One tree per set.
    trees: Vec<Vec<i64>>,
    /// Number of ways in the cache.
    ways: usize,
}

impl PlruPolicy {
    /// Creates a new PLRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        let internal = ways.saturating_sub(1);
        let mut tree = vec![0; internal];
        tree.resize(internal + ways, EMPTY_LEAF);
        Self {
            trees: vec![tree; sets],
            ways,
        }
    }

    /// The tree array of `set`: internal bits followed by leaves.
    ///
    /// # Panics
    ///
    /// Panics if `set` is out of range.
    pub fn tree(&self, set: usize) -> &[i64] {
        &self.trees[set]
    }

    /// Index of the first leaf cell.
    #[inline]
    const fn first_leaf(&self) -> usize {
        self.ways - 1
    }
}

impl ReplacementPolicy for PlruPolicy {
    /// Walks the direction bits from the root to a leaf and returns its way.
    fn choose_victim(&mut self, set: usize, _blocks: &CacheSet) -> usize {
        let tree = &self.trees[set];
        let first_leaf = self.first_leaf();
        let mut node = 0;
        while node < first_leaf {
            node = if tree[node] == 0 { 2 * node + 1 } else { 2 * node + 2 };
        }
        node - first_leaf
    }

    /// Stores the block's tag in its leaf and inverts every ancestor bit.
    fn mark_accessed(&mut self, set: usize, way: usize, blocks: &mut CacheSet) {
        assert!(way < self.ways, "way {way} out of range for {}-way set", self.ways);
        let first_leaf = self.first_leaf();
        let tree = &mut self.trees[set];

        let mut node = first_leaf + way;
        tree[node] = i64::from(blocks.block(way).tag);
        while node > 0 {
            node = (node - 1) / 2;
            tree[node] = i64::from(tree[node] == 0);
        }
    }
}
