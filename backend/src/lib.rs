//! Ratatouille Simulator Core - Rust Engine
//!
//! Discrete-event simulator of chefs (workers) contending for a single stove
//! (a mutually exclusive resource), with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Logical simulation clock
//! - **models**: Domain types (Job, Event, EventLog)
//! - **policy**: Queue disciplines (FCFS, SJF)
//! - **orchestrator**: Main simulation loop and run digest
//! - **metrics**: Waiting, turnaround, throughput and queue-depth statistics
//! - **rng**: Deterministic random number generation
//! - **arrivals**: Seeded workload generator
//! - **scenarios**: Preset workloads and the policy/semaphore comparison matrix
//!
//! # Critical Invariants
//!
//! 1. Time only moves forward; nothing reads a wall clock
//! 2. Equal `(jobs, config)` always yield an identical `RunResult`
//! 3. A finished job satisfies `ready <= start <= finish` and
//!    `finish - start == cook_time`

// Module declarations
pub mod arrivals;
pub mod core;
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod rng;
pub mod scenarios;

// Re-exports for convenience
pub use arrivals::{
    generate_jobs, ArrivalPattern, CookTimeDistribution, WorkloadConfig, WorkloadError,
};
pub use crate::core::time::SimClock;
pub use metrics::{estimate_max_queue, job_records, summarize, JobRecord, MetricsSummary};
pub use models::{ChefId, Event, EventKind, EventLog, Job, JobHandle, JobId};
pub use orchestrator::{
    run_simulation, ChefAssignment, Engine, RunConfig, RunResult, SimulationError, TickOutcome,
};
pub use policy::{JobQueue, Scheduler, SchedulerKind};
pub use rng::RngManager;
pub use scenarios::{run_matrix, ExperimentRow, Scenario, VariantOutcome, VARIANTS};
