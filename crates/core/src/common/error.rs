//! Error definitions.
//!
//! The access protocol itself cannot fail on a well-formed cache. Errors only arise at
//! the edges of the simulator:
//! 1. **Configuration:** Geometry that is not a power of two or an unsupported associativity.
//! 2. **Trace input:** Unreadable files and lines that are not `0xHEX OP` records.

use std::io;

use thiserror::Error;

/// Errors raised while loading or validating a cache configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size field is zero or not an exact power of two.
    #[error("{field} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied for it.
        value: u32,
    },

    /// The block size is larger than the whole cache.
    #[error("line size {line_bytes} exceeds cache size {size_bytes}")]
    BlockLargerThanCache {
        /// Configured cache size in bytes.
        size_bytes: u32,
        /// Configured block size in bytes.
        line_bytes: u32,
    },

    /// Associativity outside {2, 4, 8, 16, 32}.
    #[error("unsupported associativity {0}; expected one of 2, 4, 8, 16, 32")]
    InvalidWays(u32),

    /// More ways than the cache has blocks.
    #[error("{ways}-way cache needs at least {ways} blocks, geometry has {blocks}")]
    WaysExceedBlocks {
        /// Requested associativity.
        ways: u32,
        /// Blocks available in the geometry.
        blocks: u32,
    },

    /// The configuration document is not valid JSON for `CacheConfig`.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace source could not be read.
    #[error("cannot read trace: {0}")]
    Io(#[from] io::Error),

    /// A line is not of the form `0xHEXADDRESS OPCHAR`.
    #[error("malformed trace record at line {line}: {content:?}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// The offending line with surrounding whitespace removed.
        content: String,
    },
}
