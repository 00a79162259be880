//! Cache access statistics collection and reporting.
//!
//! This module tracks the counters maintained by the access protocol. It provides:
//! 1. **Accesses:** Total, read, and write access counts.
//! 2. **Misses:** Total misses split by access kind and by category (compulsory, capacity, conflict).
//! 3. **Write-back:** Dirty blocks evicted (simulated write-backs).
//! 4. **Reporting:** Derived hit/miss rates and a plain-text report.

use std::io::{self, Write};

use serde::Serialize;

use crate::common::AccessKind;

/// Miss categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissKind {
    /// First-ever touch of a block address.
    Compulsory,
    /// Eviction-driven miss in an associative cache.
    Capacity,
    /// Eviction-driven miss in a direct-mapped cache.
    Conflict,
}

/// Access and miss counters for one cache.
///
/// All counters start at zero and only ever increase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Total accesses.
    pub cache_access: u64,
    /// Read accesses.
    pub read_access: u64,
    /// Write accesses.
    pub write_access: u64,
    /// Total misses.
    pub cache_misses: u64,
    /// Misses on never-before-seen block addresses.
    pub compulsory_misses: u64,
    /// Eviction-driven misses in associative caches.
    pub capacity_misses: u64,
    /// Eviction-driven misses in direct-mapped caches.
    pub conflict_misses: u64,
    /// Misses caused by reads.
    pub read_misses: u64,
    /// Misses caused by writes.
    pub write_misses: u64,
    /// Dirty blocks written back on eviction.
    pub dirty_blocks_evicted: u64,
}

impl CacheStats {
    /// Counts one access of the given kind.
    #[inline]
    pub(crate) const fn record_access(&mut self, kind: AccessKind) {
        self.cache_access += 1;
        match kind {
            AccessKind::Read => self.read_access += 1,
            AccessKind::Write => self.write_access += 1,
        }
    }

    /// Counts one miss of the given kind and category.
    #[inline]
    pub(crate) const fn record_miss(&mut self, kind: AccessKind, category: MissKind) {
        self.cache_misses += 1;
        match kind {
            AccessKind::Read => self.read_misses += 1,
            AccessKind::Write => self.write_misses += 1,
        }
        match category {
            MissKind::Compulsory => self.compulsory_misses += 1,
            MissKind::Capacity => self.capacity_misses += 1,
            MissKind::Conflict => self.conflict_misses += 1,
        }
    }

    /// Counts one dirty block written back.
    #[inline]
    pub(crate) const fn record_dirty_eviction(&mut self) {
        self.dirty_blocks_evicted += 1;
    }

    /// Accesses that did not miss.
    ///
    /// An aliased block can be counted as a compulsory miss and still find a
    /// matching tag, so this is not the number of tag hits.
    pub const fn hits(&self) -> u64 {
        self.cache_access.saturating_sub(self.cache_misses)
    }

    /// Fraction of accesses that missed, or 0.0 before the first access.
    pub fn miss_rate(&self) -> f64 {
        if self.cache_access == 0 {
            0.0
        } else {
            self.cache_misses as f64 / self.cache_access as f64
        }
    }

    /// Fraction of accesses that hit, or 0.0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        if self.cache_access == 0 {
            0.0
        } else {
            self.hits() as f64 / self.cache_access as f64
        }
    }

    /// Writes the statistics report to `out`.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "==========================================================")?;
        writeln!(out, "CACHE SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        writeln!(out, "Cache Access :{}", self.cache_access)?;
        writeln!(out, "Read Access :{}", self.read_access)?;
        writeln!(out, "Write Access :{}", self.write_access)?;
        writeln!(out, "Cache Misses :{}", self.cache_misses)?;
        writeln!(out, "Compulsory Misses :{}", self.compulsory_misses)?;
        writeln!(out, "Capacity Misses :{}", self.capacity_misses)?;
        writeln!(out, "Conflict Misses :{}", self.conflict_misses)?;
        writeln!(out, "Read Misses :{}", self.read_misses)?;
        writeln!(out, "Write Misses :{}", self.write_misses)?;
        writeln!(out, "Dirty Blocks evicted :{}", self.dirty_blocks_evicted)?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "miss_rate                {:.4}", self.miss_rate())?;
        writeln!(out, "hit_rate                 {:.4}", self.hit_rate())?;
        writeln!(out, "==========================================================")
    }

    /// Prints the statistics report to stdout.
    pub fn print(&self) {
        let stdout = io::stdout();
        let _ = self.write_report(&mut stdout.lock());
    }
}
