//! Single-Level Cache Simulator.
//!
//! This module implements a cache that can be organized as direct-mapped, fully
//! associative, or N-way set associative. All three share one access protocol:
//! the organization only fixes the set/way shape, whether a replacement policy is
//! consulted, and how an eviction-driven miss is labelled. Every access updates the
//! access history and the statistics and mutates block state; nothing is returned.

/// Cache blocks and sets.
pub mod block;

/// Record of every block address presented to the cache.
pub mod history;

/// Cache replacement policy implementations (LRU, PLRU, Random).
pub mod policies;

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use self::block::{Block, CacheSet, Lookup};
use self::history::AccessHistory;
use self::policies::{Policy, ReplacementPolicy};
use crate::common::{AccessKind, AddressDecoder, ConfigError, DecodedAddress};
use crate::config::{CacheConfig, Geometry, Organization, ReplacementPolicy as PolicyType};
use crate::stats::{CacheStats, MissKind};

/// Cache simulator for one organization and replacement policy.
///
/// Owns its sets, replacement policy, access history, and statistics. Accesses are
/// processed one at a time; wrap the whole cache in a lock to share it.
#[derive(Debug, Clone)]
pub struct Cache {
    geometry: Geometry,
    decoder: AddressDecoder,
    sets: Vec<CacheSet>,
    policy: Option<Policy>,
    history: AccessHistory,
    stats: CacheStats,
}

impl Cache {
    /// Creates a cache from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Organization, sizes, associativity, and replacement policy.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` produced by `CacheConfig::geometry` when the
    /// geometry is not usable.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        Ok(Self::with_geometry(geometry, config.policy, config.seed))
    }

    /// Creates a cache from an already validated geometry.
    ///
    /// `policy` and `seed` are ignored for direct-mapped caches.
    pub fn with_geometry(geometry: Geometry, policy: PolicyType, seed: u64) -> Self {
        let num_sets = geometry.num_sets as usize;
        let ways = geometry.ways as usize;
        let policy = geometry
            .organization
            .uses_policy()
            .then(|| Policy::new(policy, num_sets, ways, seed));

        debug!(
            organization = ?geometry.organization,
            cache_size = geometry.cache_size,
            block_size = geometry.block_size,
            num_sets,
            ways,
            policy = ?policy.as_ref().map(Policy::kind),
            "cache constructed"
        );

        Self {
            decoder: geometry.decoder(),
            sets: (0..num_sets).map(|_| CacheSet::new(ways)).collect(),
            geometry,
            policy,
            history: AccessHistory::new(),
            stats: CacheStats::default(),
        }
    }

    /// The cache organization.
    #[inline]
    pub const fn organization(&self) -> Organization {
        self.geometry.organization
    }

    /// The validated geometry.
    #[inline]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The replacement policy, or `None` for a direct-mapped cache.
    #[inline]
    pub const fn policy(&self) -> Option<&Policy> {
        self.policy.as_ref()
    }

    /// The block addresses seen so far.
    #[inline]
    pub const fn history(&self) -> &AccessHistory {
        &self.history
    }

    /// Snapshot of the statistics counters.
    #[inline]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// The sets in index order.
    #[inline]
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Whether a valid block currently holds `address`. Has no side effects.
    pub fn contains(&self, address: u32) -> bool {
        let DecodedAddress { set_index, tag, .. } = self.decoder.decode(address);
        matches!(self.sets[set_index].lookup(tag), Lookup::Hit(_))
    }

    /// Reads the byte at `address`.
    #[inline]
    pub fn read(&mut self, address: u32) {
        self.access(AccessKind::Read, address);
    }

    /// Writes the byte at `address`.
    #[inline]
    pub fn write(&mut self, address: u32) {
        self.access(AccessKind::Write, address);
    }

    /// Runs one access through the cache.
    ///
    /// Counts the access, classifies a first touch as a compulsory miss, then resolves
    /// the target set: a valid tag match is a hit, otherwise the first invalid way is
    /// filled, otherwise a victim is evicted. On eviction of a previously seen block the
    /// miss is labelled by `Organization::eviction_miss`. Writes leave the resolved
    /// block dirty.
    pub fn access(&mut self, kind: AccessKind, address: u32) {
        self.stats.record_access(kind);

        let DecodedAddress {
            block_address,
            set_index,
            tag,
        } = self.decoder.decode(address);

        let previously_accessed = self.history.record_and_check(block_address);
        if !previously_accessed {
            self.stats.record_miss(kind, MissKind::Compulsory);
        }

        let set = &mut self.sets[set_index];
        let way = match set.lookup(tag) {
            Lookup::Hit(way) => {
                trace!(address, set_index, way, tag, ?kind, "hit");
                way
            }
            Lookup::Fill(way) => {
                let block = set.block_mut(way);
                block.valid = true;
                block.tag = tag;
                trace!(address, set_index, way, tag, ?kind, "fill");
                way
            }
            Lookup::Evict => {
                if previously_accessed {
                    self.stats
                        .record_miss(kind, self.geometry.organization.eviction_miss());
                }
                let way = self
                    .policy
                    .as_mut()
                    .map_or(0, |policy| policy.choose_victim(set_index, set));
                let victim = set.block_mut(way);
                let write_back = victim.dirty;
                if write_back {
                    self.stats.record_dirty_eviction();
                    victim.dirty = false;
                }
                debug!(
                    address,
                    set_index,
                    way,
                    evicted_tag = victim.tag,
                    tag,
                    write_back,
                    "evict"
                );
                victim.tag = tag;
                way
            }
        };

        if kind.is_write() {
            set.block_mut(way).dirty = true;
        }
        if let Some(policy) = self.policy.as_mut() {
            policy.mark_accessed(set_index, way, set);
        }
    }

    /// Read-only snapshot of every block, for diagnostics.
    pub fn dump(&self) -> CacheDump {
        CacheDump {
            organization: self.geometry.organization,
            sets: self.sets.iter().map(|set| set.blocks().to_vec()).collect(),
        }
    }
}

/// Snapshot of block state returned by `Cache::dump`.
///
/// Displays one `index V valid D dirty T tag` line per block. Set-associative
/// caches get a `**** Set n` header before each set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheDump {
    /// Organization of the dumped cache.
    pub organization: Organization,
    /// Blocks of each set, in storage order.
    pub sets: Vec<Vec<Block>>,
}

impl fmt::Display for CacheDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = |f: &mut fmt::Formatter<'_>, index: usize, block: &Block| {
            writeln!(
                f,
                "{index} V {} D {} T {}",
                u8::from(block.valid),
                u8::from(block.dirty),
                block.tag
            )
        };
        match self.organization {
            Organization::SetAssociative => {
                for (set_index, set) in self.sets.iter().enumerate() {
                    writeln!(f, "**** Set {set_index}")?;
                    for (way, block) in set.iter().enumerate() {
                        line(f, way, block)?;
                    }
                }
            }
            Organization::DirectMapped | Organization::FullyAssociative => {
                for (index, block) in self.sets.iter().flatten().enumerate() {
                    line(f, index, block)?;
                }
            }
        }
        Ok(())
    }
}
