//! Configuration system for the cache simulator.
//!
//! This module defines the structures and enums used to parameterize a cache. It provides:
//! 1. **Defaults:** Baseline geometry used when a field is omitted.
//! 2. **Structures:** `CacheConfig` (user-facing) and `Geometry` (validated, derived once).
//! 3. **Enums:** Cache organization and replacement policy.
//!
//! Configuration is supplied as JSON (`CacheConfig::from_json` / `from_file`), built by the
//! CLI from its flags, or taken from `CacheConfig::default()`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{AddressDecoder, ConfigError};
use crate::stats::MissKind;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache size in bytes (1 KiB).
    pub const CACHE_SIZE: u32 = 1024;

    /// Default block size in bytes (64 bytes).
    pub const CACHE_LINE: u32 = 64;

    /// Default associativity for set-associative caches.
    pub const CACHE_WAYS: u32 = 2;

    /// Default seed for the random replacement generator.
    pub const RANDOM_SEED: u64 = 123456789;
}

/// Associativities accepted for set-associative caches.
pub const VALID_WAYS: [u32; 5] = [2, 4, 8, 16, 32];

/// Cache organization.
///
/// Decides how many sets the cache has, how many ways each set holds, and how an
/// eviction-driven miss on a previously seen block is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Organization {
    /// One way per set, `num_blocks` sets, no replacement policy.
    #[default]
    #[serde(alias = "direct", alias = "direct_mapped")]
    DirectMapped,
    /// One set holding every block.
    #[serde(alias = "full", alias = "fully_associative")]
    FullyAssociative,
    /// `num_blocks / ways` sets of `ways` blocks.
    #[serde(alias = "set", alias = "set_associative")]
    SetAssociative,
}

impl Organization {
    /// Miss category assigned when a previously seen block has to evict another.
    ///
    /// Direct-mapped caches call it a conflict miss; associative caches call it a
    /// capacity miss. No reference model is consulted.
    #[inline]
    pub const fn eviction_miss(self) -> MissKind {
        match self {
            Self::DirectMapped => MissKind::Conflict,
            Self::FullyAssociative | Self::SetAssociative => MissKind::Capacity,
        }
    }

    /// Whether victims are chosen by a replacement policy.
    #[inline]
    pub const fn uses_policy(self) -> bool {
        !matches!(self, Self::DirectMapped)
    }
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which block to evict when a new block must
/// be installed in a full set. Ignored by direct-mapped caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Uniformly random victim.
    #[serde(alias = "Random", alias = "random")]
    Random,
    /// True least-recently-used, encoded by the physical order of the set.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// Binary-tree pseudo-LRU.
    #[serde(alias = "Plru", alias = "plru", alias = "PSEUDO_LRU")]
    Plru,
}

/// Configuration for a single cache.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, Organization, ReplacementPolicy};
///
/// let json = r#"{
///     "organization": "SetAssociative",
///     "size_bytes": 32768,
///     "line_bytes": 64,
///     "ways": 4,
///     "policy": "PLRU"
/// }"#;
///
/// let config = CacheConfig::from_json(json).unwrap();
/// assert_eq!(config.organization, Organization::SetAssociative);
/// assert_eq!(config.policy, ReplacementPolicy::Plru);
/// assert_eq!(config.geometry().unwrap().num_sets, 128);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache organization
    #[serde(default)]
    pub organization: Organization,

    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: u32,

    /// Block (line) size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: u32,

    /// Associativity; only read for `Organization::SetAssociative`
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: u32,

    /// Replacement policy; ignored for `Organization::DirectMapped`
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Seed for `ReplacementPolicy::Random`
    #[serde(default = "CacheConfig::default_seed")]
    pub seed: u64,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> u32 {
        defaults::CACHE_SIZE
    }

    /// Returns the default block size in bytes.
    fn default_line() -> u32 {
        defaults::CACHE_LINE
    }

    /// Returns the default associativity.
    fn default_ways() -> u32 {
        defaults::CACHE_WAYS
    }

    /// Returns the default random replacement seed.
    fn default_seed() -> u64 {
        defaults::RANDOM_SEED
    }

    /// Direct-mapped cache of `size_bytes` with `line_bytes` blocks.
    pub fn direct_mapped(size_bytes: u32, line_bytes: u32) -> Self {
        Self {
            organization: Organization::DirectMapped,
            size_bytes,
            line_bytes,
            ..Self::default()
        }
    }

    /// Fully associative cache of `size_bytes` with `line_bytes` blocks.
    pub fn fully_associative(size_bytes: u32, line_bytes: u32, policy: ReplacementPolicy) -> Self {
        Self {
            organization: Organization::FullyAssociative,
            size_bytes,
            line_bytes,
            policy,
            ..Self::default()
        }
    }

    /// `ways`-way set-associative cache of `size_bytes` with `line_bytes` blocks.
    pub fn set_associative(
        size_bytes: u32,
        line_bytes: u32,
        ways: u32,
        policy: ReplacementPolicy,
    ) -> Self {
        Self {
            organization: Organization::SetAssociative,
            size_bytes,
            line_bytes,
            ways,
            policy,
            ..Self::default()
        }
    }

    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the document does not describe a `CacheConfig`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and `ConfigError::Parse`
    /// if its contents are not a valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validates the configuration and derives the cache geometry.
    ///
    /// # Errors
    ///
    /// * `NotPowerOfTwo` if either size is zero or not a power of two.
    /// * `BlockLargerThanCache` if a block does not fit in the cache.
    /// * `InvalidWays` / `WaysExceedBlocks` for an unusable set-associative layout.
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        if !self.size_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "size_bytes",
                value: self.size_bytes,
            });
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "line_bytes",
                value: self.line_bytes,
            });
        }
        if self.line_bytes > self.size_bytes {
            return Err(ConfigError::BlockLargerThanCache {
                size_bytes: self.size_bytes,
                line_bytes: self.line_bytes,
            });
        }

        let num_blocks = self.size_bytes / self.line_bytes;
        let (num_sets, ways) = match self.organization {
            Organization::DirectMapped => (num_blocks, 1),
            Organization::FullyAssociative => (1, num_blocks),
            Organization::SetAssociative => {
                if !VALID_WAYS.contains(&self.ways) {
                    return Err(ConfigError::InvalidWays(self.ways));
                }
                if self.ways > num_blocks {
                    return Err(ConfigError::WaysExceedBlocks {
                        ways: self.ways,
                        blocks: num_blocks,
                    });
                }
                (num_blocks / self.ways, self.ways)
            }
        };

        Ok(Geometry {
            organization: self.organization,
            cache_size: self.size_bytes,
            block_size: self.line_bytes,
            num_blocks,
            num_sets,
            ways,
            line_bits: self.line_bytes.trailing_zeros(),
            index_bits: num_blocks.trailing_zeros(),
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            organization: Organization::default(),
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
            seed: defaults::RANDOM_SEED,
        }
    }
}

/// Validated cache geometry, fixed for the lifetime of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Organization the geometry was derived for.
    pub organization: Organization,
    /// Total cache size in bytes.
    pub cache_size: u32,
    /// Block size in bytes.
    pub block_size: u32,
    /// `cache_size / block_size`.
    pub num_blocks: u32,
    /// Number of sets.
    pub num_sets: u32,
    /// Ways per set.
    pub ways: u32,
    /// `log2(block_size)`.
    pub line_bits: u32,
    /// `log2(num_blocks)`, used for the tag split of every organization.
    pub index_bits: u32,
}

impl Geometry {
    /// Address decoder for this geometry.
    #[inline]
    pub const fn decoder(&self) -> AddressDecoder {
        AddressDecoder::new(self.line_bits, self.index_bits, self.num_sets)
    }
}
