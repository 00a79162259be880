//! Access Protocol Tests.
//!
//! Verifies the per-access state machine shared by every organization: counter
//! updates, compulsory classification, empty-slot fills versus evictions, and dirty
//! bit handling.
//!
//! Geometry used throughout: 1 KiB cache, 64-byte blocks (16 blocks).
//!   - line_bits  = 6
//!   - index_bits = 4
//!   - tag        = addr >> 10

use crate::common::harness::{assert_consistent, build, r, replay, valid_tags, w};
use cachesim_core::CacheStats;
use cachesim_core::config::{CacheConfig, ReplacementPolicy as PolicyType};
use pretty_assertions::assert_eq;

const SIZE: u32 = 1024;
const LINE: u32 = 64;

// ══════════════════════════════════════════════════════════
// 1. Counters
// ══════════════════════════════════════════════════════════

/// Direct-mapped `[r 0x0, r 0x40, r 0x0]`: two compulsory misses then a hit.
#[test]
fn two_blocks_then_rehit() {
    let mut cache = build(&CacheConfig::direct_mapped(SIZE, LINE));
    replay(&mut cache, &[r(0x0), r(0x40), r(0x0)]);

    assert_eq!(
        cache.stats(),
        CacheStats {
            cache_access: 3,
            read_access: 3,
            cache_misses: 2,
            compulsory_misses: 2,
            read_misses: 2,
            ..CacheStats::default()
        }
    );
    assert_eq!(cache.stats().hits(), 1);
}

/// Write misses land in the write counters only.
#[test]
fn write_miss_counts_as_write() {
    let mut cache = build(&CacheConfig::direct_mapped(SIZE, LINE));
    cache.write(0x80);

    let stats = cache.stats();
    assert_eq!(stats.write_access, 1);
    assert_eq!(stats.write_misses, 1);
    assert_eq!(stats.read_access, 0);
    assert_eq!(stats.read_misses, 0);
    assert_consistent(&stats);
}

/// Offsets within one block never produce a second miss.
#[test]
fn same_block_different_offsets_hit() {
    let mut cache = build(&CacheConfig::direct_mapped(SIZE, LINE));
    replay(&mut cache, &[r(0x100), r(0x101), r(0x13f), w(0x120)]);

    assert_eq!(cache.stats().cache_misses, 1);
    assert_eq!(cache.history().len(), 1);
}

/// The statistics snapshot is a copy; reading it changes nothing.
#[test]
fn stats_snapshot_is_side_effect_free() {
    let mut cache = build(&CacheConfig::direct_mapped(SIZE, LINE));
    cache.read(0x0);
    let first = cache.stats();
    let second = cache.stats();
    assert_eq!(first, second);
    assert_eq!(cache.dump(), cache.dump());
}

// ══════════════════════════════════════════════════════════
// 2. Dirty bits
// ══════════════════════════════════════════════════════════

/// Write then read the same block: one miss, block stays dirty.
#[test]
fn write_then_read_keeps_dirty() {
    for config in [
        CacheConfig::direct_mapped(SIZE, LINE),
        CacheConfig::fully_associative(SIZE, LINE, PolicyType::Lru),
        CacheConfig::set_associative(SIZE, LINE, 4, PolicyType::Plru),
    ] {
        let mut cache = build(&config);
        replay(&mut cache, &[w(0x2000), r(0x2000), r(0x2010)]);

        assert_eq!(cache.stats().cache_misses, 1, "{config:?}");
        let dirty: Vec<bool> = cache
            .sets()
            .iter()
            .flat_map(|set| set.blocks())
            .filter(|block| block.valid)
            .map(|block| block.dirty)
            .collect();
        assert_eq!(dirty, vec![true], "{config:?}");
    }
}

/// A read fill leaves the block clean.
#[test]
fn read_fill_is_clean() {
    let mut cache = build(&CacheConfig::direct_mapped(SIZE, LINE));
    cache.read(0x40);
    let block = cache.sets()[1].block(0);
    assert!(block.valid);
    assert!(!block.dirty);
}

/// Filling an empty way never counts a write-back, even for writes.
#[test]
fn empty_fill_is_not_an_eviction() {
    let mut cache = build(&CacheConfig::fully_associative(SIZE, LINE, PolicyType::Lru));
    for i in 0..16 {
        cache.write(i * SIZE);
    }
    let stats = cache.stats();
    assert_eq!(stats.dirty_blocks_evicted, 0);
    assert_eq!(stats.capacity_misses, 0);
    assert_eq!(stats.compulsory_misses, 16);
}

/// Evicting a dirty block counts one write-back and the new occupant of a read is clean.
#[test]
fn dirty_victim_is_written_back_and_cleaned() {
    let mut cache = build(&CacheConfig::direct_mapped(SIZE, LINE));
    replay(&mut cache, &[w(0x0), r(0x400)]);

    assert_eq!(cache.stats().dirty_blocks_evicted, 1);
    let block = cache.sets()[0].block(0);
    assert_eq!(block.tag, 1);
    assert!(!block.dirty);
}

/// Evicting a clean block counts no write-back.
#[test]
fn clean_victim_is_not_written_back() {
    let mut cache = build(&CacheConfig::direct_mapped(SIZE, LINE));
    replay(&mut cache, &[r(0x0), w(0x400)]);

    assert_eq!(cache.stats().dirty_blocks_evicted, 0);
    assert!(cache.sets()[0].block(0).dirty);
}

// ══════════════════════════════════════════════════════════
// 3. Tag split
// ══════════════════════════════════════════════════════════

/// The tag drops `log2(num_blocks)` bits in every organization, so two blocks that
/// share a set can share a tag. The second is counted compulsory yet resolves as a hit.
#[test]
fn aliased_tag_in_set_associative_cache() {
    // 16 blocks, 2-way: 8 sets. Blocks 0 and 8 share set 0 and tag 0.
    let mut cache = build(&CacheConfig::set_associative(SIZE, LINE, 2, PolicyType::Lru));
    replay(&mut cache, &[r(0x000), r(0x200)]);

    let stats = cache.stats();
    assert_eq!(stats.compulsory_misses, 2);
    assert_eq!(valid_tags(&cache, 0), vec![0]);
    assert_consistent(&stats);
}

/// `contains` reports residency without touching any state.
#[test]
fn contains_has_no_side_effects() {
    let mut cache = build(&CacheConfig::direct_mapped(SIZE, LINE));
    cache.read(0x440);
    let before = (cache.stats(), cache.dump(), cache.history().len());

    assert!(cache.contains(0x440));
    assert!(cache.contains(0x47f));
    assert!(!cache.contains(0x040));

    assert_eq!(before, (cache.stats(), cache.dump(), cache.history().len()));
}
