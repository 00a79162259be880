//! Tests for the simulated hardware units.
