//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm. All randomness in the crate goes through
//! this module so that a seed fully determines a workload.

mod xorshift;

pub use xorshift::RngManager;
