//! Simulation utilities and trace loading.
//!
//! Provides the trace reader that turns `0xHEX OP` lines into access records and the
//! simulator that replays them against a cache.

/// Top-level trace runner.
pub mod simulator;

/// Trace file parsing.
pub mod trace;
