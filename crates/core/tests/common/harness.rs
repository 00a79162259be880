use cachesim_core::Cache;
use cachesim_core::CacheStats;
use cachesim_core::common::AccessKind;
use cachesim_core::config::CacheConfig;
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a cache, panicking on an invalid test geometry.
pub fn build(config: &CacheConfig) -> Cache {
    init_tracing();
    Cache::new(config).expect("test geometry must be valid")
}

/// Shorthand for a read access.
pub const fn r(address: u32) -> (AccessKind, u32) {
    (AccessKind::Read, address)
}

/// Shorthand for a write access.
pub const fn w(address: u32) -> (AccessKind, u32) {
    (AccessKind::Write, address)
}

/// Applies every access in order.
pub fn replay(cache: &mut Cache, trace: &[(AccessKind, u32)]) {
    for &(kind, address) in trace {
        cache.access(kind, address);
    }
}

/// Asserts the counter identities that must hold after any sequence of accesses.
pub fn assert_consistent(stats: &CacheStats) {
    assert_eq!(
        stats.cache_access,
        stats.read_access + stats.write_access,
        "accesses must split into reads and writes: {stats:?}"
    );
    assert_eq!(
        stats.cache_misses,
        stats.read_misses + stats.write_misses,
        "misses must split into read and write misses: {stats:?}"
    );
    assert_eq!(
        stats.cache_misses,
        stats.compulsory_misses + stats.capacity_misses + stats.conflict_misses,
        "misses must split into compulsory, capacity, and conflict: {stats:?}"
    );
    assert!(
        stats.cache_misses <= stats.cache_access,
        "an access misses at most once: {stats:?}"
    );
}

/// Tags of the valid blocks of `set`, in storage order.
pub fn valid_tags(cache: &Cache, set: usize) -> Vec<u32> {
    cache.sets()[set]
        .blocks()
        .iter()
        .filter(|block| block.valid)
        .map(|block| block.tag)
        .collect()
}
