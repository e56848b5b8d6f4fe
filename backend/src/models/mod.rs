//! Domain models for the kitchen simulator

pub mod event;
pub mod job;

// Re-exports
pub use event::{ChefId, Event, EventKind, EventLog};
pub use job::{Job, JobHandle, JobId};
