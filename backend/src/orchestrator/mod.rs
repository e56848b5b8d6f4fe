//! Orchestrator - the simulation engine and its run-level helpers
//!
//! See `engine.rs` for the tick loop.

pub mod digest;
pub mod engine;

// Re-export main types for convenience
pub use digest::compute_digest;
pub use engine::{
    run_simulation, ChefAssignment, Engine, RunConfig, RunResult, SimulationError, TickOutcome,
};
