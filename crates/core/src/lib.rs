//! Trace-driven cache simulator library.
//!
//! This crate models a single cache level under a sequential stream of reads and writes:
//! 1. **Organizations:** Direct-mapped, fully associative, and N-way set associative caches.
//! 2. **Replacement:** Random, true LRU, and binary-tree pseudo-LRU victim selection.
//! 3. **Classification:** Compulsory, capacity, and conflict miss attribution.
//! 4. **Simulation:** Trace parsing, configuration, and statistics reporting.

/// Common types (address decoding, access kinds, errors).
pub mod common;
/// Cache configuration (organization, geometry, replacement policy).
pub mod config;
/// Simulated hardware units (the cache and its replacement policies).
pub mod core;
/// Trace reader and trace runner.
pub mod sim;
/// Access and miss statistics.
pub mod stats;

/// Root configuration type; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// The simulated cache; construct with `Cache::new`.
pub use crate::core::units::cache::Cache;
/// Trace runner owning a cache.
pub use crate::sim::simulator::Simulator;
/// Counter snapshot returned by `Cache::stats`.
pub use crate::stats::CacheStats;
