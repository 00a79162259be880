//! Functional units.
//!
//! This module contains the cache implementation: block storage, access history,
//! the per-access protocol, and the replacement policies it consults on eviction.

/// Single-level cache with direct-mapped, fully associative, and set-associative organizations.
pub mod cache;
