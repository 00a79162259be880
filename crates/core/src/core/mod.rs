//! Simulated hardware.
//!
//! Holds the functional units modelled by the simulator. There is a single unit today,
//! the cache, together with its replacement policies.

/// Functional units (cache and replacement policies).
pub mod units;

pub use self::units::cache::Cache;
