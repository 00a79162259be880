//! Access history.
//!
//! Remembers every distinct block address the cache has been asked for. A miss on an
//! address not yet in the history is compulsory; the history never forgets, so an
//! address is compulsory at most once.

use std::collections::HashSet;

/// Set of block addresses seen so far.
#[derive(Debug, Clone, Default)]
pub struct AccessHistory {
    seen: HashSet<u32>,
}

impl AccessHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `block_address` and reports whether it had been seen before.
    ///
    /// The membership test and the insertion are a single `HashSet::insert`.
    #[inline]
    pub fn record_and_check(&mut self, block_address: u32) -> bool {
        !self.seen.insert(block_address)
    }

    /// Whether `block_address` has been recorded.
    #[inline]
    pub fn contains(&self, block_address: u32) -> bool {
        self.seen.contains(&block_address)
    }

    /// Number of distinct block addresses recorded.
    #[inline]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
