//! Shared helpers for cache simulator tests.

/// Cache construction, trace replay, and assertions shared across test modules.
pub mod harness;
