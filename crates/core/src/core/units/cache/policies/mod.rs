//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim ways in associative caches.
//!
//! # Policies
//!
//! - `Random`: Uniformly random selection.
//! - `Lru`: Least Recently Used, encoded by the storage order of the set.
//! - `Plru`: Pseudo-LRU (tree-based).
//!
//! Direct-mapped caches have one candidate per set and never consult a policy.

/// Least Recently Used replacement policy.
pub mod lru;

/// Pseudo-LRU (tree-based) replacement policy.
pub mod plru;

/// Random replacement policy.
pub mod random;

pub use lru::LruPolicy;
pub use plru::PlruPolicy;
pub use random::RandomPolicy;

use super::block::CacheSet;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Defines the interface for selecting victim ways and updating usage state.
pub trait ReplacementPolicy: Send + Sync {
    /// Selects the way to evict from a full set.
    ///
    /// Recency metadata is left untouched; calling this twice without an intervening
    /// `mark_accessed` names the same way for every policy except `Random`.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `blocks` - The current contents of that set.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn choose_victim(&mut self, set: usize, blocks: &CacheSet) -> usize;

    /// Records that `way` in `set` was just used.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way index within the set that was accessed.
    /// * `blocks` - The set's contents; LRU reorders them.
    fn mark_accessed(&mut self, set: usize, way: usize, blocks: &mut CacheSet);
}

/// Replacement policy chosen once at cache construction.
#[derive(Debug, Clone)]
pub enum Policy {
    /// Random victim selection.
    Random(RandomPolicy),
    /// True LRU.
    Lru(LruPolicy),
    /// Tree pseudo-LRU.
    Plru(PlruPolicy),
}

impl Policy {
    /// Builds the policy selected by `kind` for a cache of `sets` x `ways`.
    ///
    /// # Arguments
    ///
    /// * `kind` - Configured policy.
    /// * `sets` - Number of sets.
    /// * `ways` - Ways per set.
    /// * `seed` - Generator seed, used by `Random` only.
    pub fn new(kind: PolicyType, sets: usize, ways: usize, seed: u64) -> Self {
        match kind {
            PolicyType::Random => Self::Random(RandomPolicy::new(sets, ways, seed)),
            PolicyType::Lru => Self::Lru(LruPolicy::new(sets, ways)),
            PolicyType::Plru => Self::Plru(PlruPolicy::new(sets, ways)),
        }
    }

    /// The configured policy type.
    pub const fn kind(&self) -> PolicyType {
        match self {
            Self::Random(_) => PolicyType::Random,
            Self::Lru(_) => PolicyType::Lru,
            Self::Plru(_) => PolicyType::Plru,
        }
    }

    /// Pseudo-LRU tree of `set`, or `None` for the other policies.
    pub fn tree(&self, set: usize) -> Option<&[i64]> {
        match self {
            Self::Plru(plru) => Some(plru.tree(set)),
            Self::Random(_) | Self::Lru(_) => None,
        }
    }
}

impl ReplacementPolicy for Policy {
    #[inline]
    fn choose_victim(&mut self, set: usize, blocks: &CacheSet) -> usize {
        match self {
            Self::Random(p) => p.choose_victim(set, blocks),
            Self::Lru(p) => p.choose_victim(set, blocks),
            Self::Plru(p) => p.choose_victim(set, blocks),
        }
    }

    #[inline]
    fn mark_accessed(&mut self, set: usize, way: usize, blocks: &mut CacheSet) {
        match self {
            Self::Random(p) => p.mark_accessed(set, way, blocks),
            Self::Lru(p) => p.mark_accessed(set, way, blocks),
            Self::Plru(p) => p.mark_accessed(set, way, blocks),
        }
    }
}
