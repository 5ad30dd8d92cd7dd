//! Deterministic, pure scenario logic.
//!
//! Core modules must be free of I/O side effects and independent of the rule
//! engine. They operate on plain values and return deterministic outputs
//! suitable for tests.

pub mod matcher;
pub mod scenario;
