//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the cache, the trace reader,
//! and the configuration layer. It includes:
//! 1. **Address Decoding:** Splitting a raw address into block address, set index, and tag.
//! 2. **Memory Access:** The read/write classification of a trace record.
//! 3. **Error Handling:** Configuration and trace errors.

/// Address decoding (block address, set index, tag).
pub mod addr;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration and trace handling.
pub mod error;

pub use addr::{AddressDecoder, DecodedAddress};
pub use data::AccessKind;
pub use error::{ConfigError, TraceError};
