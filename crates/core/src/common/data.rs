//! Memory Access Types.
//!
//! This module defines the classification of memory accesses presented to the cache.
//! The kind decides which counters an access increments and whether the resolved
//! block is marked dirty.

use serde::{Deserialize, Serialize};

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// Data read access.
    ///
    /// Counted in `read_access`; a miss is counted in `read_misses`.
    Read,

    /// Data write access.
    ///
    /// Counted in `write_access`; a miss is counted in `write_misses`. The block
    /// that services the write is always left dirty.
    Write,
}

impl AccessKind {
    /// Maps a trace operation character to an access kind.
    ///
    /// `r` is a read; every other character is a write.
    #[inline]
    pub const fn from_op(op: char) -> Self {
        if op == 'r' { Self::Read } else { Self::Write }
    }

    /// Returns true for `AccessKind::Write`.
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}
