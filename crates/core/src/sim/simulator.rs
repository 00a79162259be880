//! Simulator: owns a cache and replays traces against it.

use std::io::BufRead;

use tracing::info;

use super::trace::{TraceReader, TraceRecord};
use crate::common::{ConfigError, TraceError};
use crate::config::CacheConfig;
use crate::core::units::cache::Cache;
use crate::stats::CacheStats;

/// Top-level trace runner.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// The simulated cache.
    pub cache: Cache,
}

impl Simulator {
    /// Creates a simulator around a freshly built cache.
    ///
    /// # Errors
    ///
    /// Propagates `ConfigError` from `Cache::new`.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            cache: Cache::new(config)?,
        })
    }

    /// Applies one record.
    #[inline]
    pub fn step(&mut self, record: TraceRecord) {
        self.cache.access(record.kind, record.address);
    }

    /// Applies every record in order.
    pub fn run(&mut self, records: &[TraceRecord]) {
        for &record in records {
            self.step(record);
        }
    }

    /// Streams a trace from `reader`, applying each record as it is parsed.
    ///
    /// Records before a malformed line have already been applied when the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// The first `TraceError` encountered.
    ///
    /// # Returns
    ///
    /// The number of records applied.
    pub fn run_reader<R: BufRead>(&mut self, reader: R) -> Result<usize, TraceError> {
        let mut applied = 0;
        for record in TraceReader::new(reader) {
            self.step(record?);
            applied += 1;
        }
        info!(records = applied, "trace replayed");
        Ok(applied)
    }

    /// Snapshot of the cache statistics.
    #[inline]
    pub const fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
