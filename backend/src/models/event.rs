//! Event logging for simulation replay and analysis.
//!
//! The engine appends one `Event` per observable step of a run:
//! - **ChefPick**: a chef took a job out of the scheduler
//! - **JobStart**: the job acquired the stove
//! - **JobFinish**: the job released the stove
//! - **Collision**: more than one job was granted the stove in the same round
//!
//! Events are appended in emission order and each one is stamped with an
//! explicit sequence number. At the end of a run the log is sorted once by
//! `(timestamp, seq)`, so events sharing a timestamp keep their emission order
//! and the final ordering never depends on the sort algorithm.
//!
//! # Example
//!
//! ```rust
//! use ratatouille_core_rs::models::{EventKind, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(2.0, EventKind::JobFinish, Some(1), None);
//! log.log(0.0, EventKind::JobStart, Some(1), None);
//!
//! let events = log.into_sorted();
//! assert_eq!(events[0].kind, EventKind::JobStart);
//! assert_eq!(events[1].seq, 0);
//! ```

use super::job::JobId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Logical chef (worker) identifier
pub type ChefId = usize;

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ChefPick,
    JobStart,
    JobFinish,
    Collision,
}

impl EventKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ChefPick => "chef_pick",
            EventKind::JobStart => "job_start",
            EventKind::JobFinish => "job_finish",
            EventKind::Collision => "collision",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of one step of a run
///
/// `job_id` and `chef_id` are absent for aggregate events such as
/// `Collision`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Emission sequence number, unique within a run
    pub seq: u64,
    pub timestamp: f64,
    pub kind: EventKind,
    pub job_id: Option<JobId>,
    pub chef_id: Option<ChefId>,
}

impl Event {
    /// Total order used for the final log: timestamp, then emission order
    pub fn log_order(&self, other: &Self) -> Ordering {
        self.timestamp
            .total_cmp(&other.timestamp)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:10.3} {}", self.timestamp, self.kind)?;
        if let Some(job_id) = self.job_id {
            write!(f, " job={}", job_id)?;
        }
        if let Some(chef_id) = self.chef_id {
            write!(f, " chef={}", chef_id)?;
        }
        Ok(())
    }
}

/// Append-only event accumulator.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
    next_seq: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_seq: 0,
        }
    }

    /// Append an event, stamping it with the next sequence number
    pub fn log(
        &mut self,
        timestamp: f64,
        kind: EventKind,
        job_id: Option<JobId>,
        chef_id: Option<ChefId>,
    ) {
        self.events.push(Event {
            seq: self.next_seq,
            timestamp,
            kind,
            job_id,
            chef_id,
        });
        self.next_seq += 1;
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in emission order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events stamped exactly at `timestamp`
    pub fn events_at(&self, timestamp: f64) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.timestamp == timestamp)
            .collect()
    }

    /// Events of a specific kind
    pub fn events_of_kind(&self, kind: EventKind) -> Vec<&Event> {
        self.events.iter().filter(|e| e.kind == kind).collect()
    }

    /// Events for a specific job
    pub fn events_for_job(&self, job_id: JobId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.job_id == Some(job_id))
            .collect()
    }

    /// Consume the log, returning events ordered by `(timestamp, seq)`
    pub fn into_sorted(mut self) -> Vec<Event> {
        self.events.sort_by(Event::log_order);
        self.events
    }
}
