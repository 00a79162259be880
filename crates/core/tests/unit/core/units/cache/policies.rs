//! Cache Replacement Policy Tests.
//!
//! Verifies the victim selection logic for the LRU, PLRU, and Random policies in
//! isolation. Each policy implements `ReplacementPolicy` with
//! `choose_victim(set, blocks) -> usize` and `mark_accessed(set, way, blocks)`.

use cachesim_core::config::ReplacementPolicy as PolicyType;
use cachesim_core::core::units::cache::block::CacheSet;
use cachesim_core::core::units::cache::policies::{
    LruPolicy, PlruPolicy, Policy, RandomPolicy, ReplacementPolicy,
};
use proptest::prelude::*;

// ══════════════════════════════════════════════════════════
// 1. LRU Policy
// ══════════════════════════════════════════════════════════

/// The victim is always the front of the set.
#[test]
fn lru_victim_is_front() {
    let mut policy = LruPolicy::new(1, 4);
    let set = CacheSet::new(4);
    assert_eq!(policy.choose_victim(0, &set), 0);
}

// ══════════════════════════════════════════════════════════
// 2. PLRU Policy
// ══════════════════════════════════════════════════════════

/// Fresh tree: all direction bits zero, so the walk goes left to way 0.
#[test]
fn plru_initial_victim_is_way_zero() {
    for ways in [2, 4, 8, 16, 32] {
        let mut policy = PlruPolicy::new(1, ways);
        let set = CacheSet::new(ways);
        assert_eq!(policy.choose_victim(0, &set), 0, "{ways} ways");
        assert_eq!(policy.tree(0).len(), 2 * ways - 1);
    }
}

/// Ancestors are inverted on every access, so touching the same way twice
/// restores the tree bits and points the walk back at that way.
#[test]
fn plru_toggle_is_unconditional() {
    let mut policy = PlruPolicy::new(1, 2);
    let mut set = CacheSet::new(2);

    policy.mark_accessed(0, 0, &mut set);
    assert_eq!(policy.choose_victim(0, &set), 1);

    policy.mark_accessed(0, 0, &mut set);
    assert_eq!(policy.choose_victim(0, &set), 0);
}

/// Eight ways: accessing way 5 flips nodes 0, 2, and 5 (leaf 12's ancestors).
#[test]
fn plru_mark_flips_path_to_root() {
    let mut policy = PlruPolicy::new(1, 8);
    let mut set = CacheSet::new(8);
    policy.mark_accessed(0, 5, &mut set);

    let tree = policy.tree(0);
    assert_eq!(&tree[..7], &[1, 0, 1, 0, 0, 1, 0]);
    // Leaf 12 holds the (default) tag of way 5; the other leaves are untouched.
    assert_eq!(tree[7 + 5], 0);
    assert_eq!(tree[7], -1);

    // Root 1 -> node 2; node 2 is 1 -> node 6; node 6 is 0 -> leaf 13 (way 6).
    assert_eq!(policy.choose_victim(0, &set), 6);
}

/// Sets keep independent trees.
#[test]
fn plru_independent_sets() {
    let mut policy = PlruPolicy::new(2, 4);
    let mut set = CacheSet::new(4);
    policy.mark_accessed(1, 0, &mut set);

    assert_eq!(policy.tree(0), &[0, 0, 0, -1, -1, -1, -1]);
    assert_eq!(policy.choose_victim(0, &set), 0);
    assert_eq!(policy.choose_victim(1, &set), 2);
}

proptest! {
    /// Without an intervening access the walk always names the same way.
    #[test]
    fn plru_victim_is_idempotent(
        ways_log in 1u32..=5,
        touches in prop::collection::vec(any::<usize>(), 0..64),
    ) {
        let ways = 1usize << ways_log;
        let mut policy = PlruPolicy::new(1, ways);
        let mut set = CacheSet::new(ways);
        for way in touches {
            policy.mark_accessed(0, way % ways, &mut set);
        }
        let tree_before = policy.tree(0).to_vec();
        let first = policy.choose_victim(0, &set);
        let second = policy.choose_victim(0, &set);
        prop_assert_eq!(first, second);
        prop_assert!(first < ways);
        prop_assert_eq!(tree_before, policy.tree(0).to_vec());
    }

    /// Random victims always fall inside the set.
    #[test]
    fn random_victim_in_range(seed in any::<u64>(), ways_log in 1u32..=5) {
        let ways = 1usize << ways_log;
        let mut policy = RandomPolicy::new(1, ways, seed);
        let set = CacheSet::new(ways);
        for _ in 0..64 {
            prop_assert!(policy.choose_victim(0, &set) < ways);
        }
    }
}

// ══════════════════════════════════════════════════════════
// 3. Random Policy
// ══════════════════════════════════════════════════════════

/// Same seed, same sequence.
#[test]
fn random_is_deterministic_per_seed() {
    let set = CacheSet::new(8);
    let draw = |seed| {
        let mut policy = RandomPolicy::new(1, 8, seed);
        (0..16).map(|_| policy.choose_victim(0, &set)).collect::<Vec<_>>()
    };
    assert_eq!(draw(99), draw(99));
}

/// Over many draws every way of a 4-way set is chosen.
#[test]
fn random_covers_all_ways() {
    let mut policy = RandomPolicy::new(1, 4, 123456789);
    let set = CacheSet::new(4);
    let mut seen = [false; 4];
    for _ in 0..1000 {
        seen[policy.choose_victim(0, &set)] = true;
    }
    assert_eq!(seen, [true; 4]);
}

/// Marking accesses does not change the random sequence.
#[test]
fn random_mark_is_noop() {
    let mut touched = RandomPolicy::new(1, 8, 5);
    let mut untouched = RandomPolicy::new(1, 8, 5);
    let mut set = CacheSet::new(8);
    for way in 0..8 {
        touched.mark_accessed(0, way, &mut set);
    }
    for _ in 0..16 {
        assert_eq!(
            touched.choose_victim(0, &set),
            untouched.choose_victim(0, &set)
        );
    }
}

// ══════════════════════════════════════════════════════════
// 4. Dispatch
// ══════════════════════════════════════════════════════════

#[test]
fn policy_kind_round_trips() {
    for kind in [PolicyType::Random, PolicyType::Lru, PolicyType::Plru] {
        let policy = Policy::new(kind, 4, 4, 1);
        assert_eq!(policy.kind(), kind);
        assert_eq!(policy.tree(0).is_some(), kind == PolicyType::Plru);
    }
}
