//! Scheduler Policy Module
//!
//! This module defines the queue discipline the engine uses to decide which
//! ready job a chef picks up next.
//!
//! # Overview
//!
//! A scheduler is a transient container of jobs that have arrived but have
//! not yet taken the stove. The engine owns it for the whole run and drops it
//! at the end. Jobs are referenced by `JobHandle`, never by pointer, so the
//! scheduler cannot touch job timestamps.
//!
//! Available policies:
//! 1. **Fcfs**: first-come-first-served, strict insertion order
//! 2. **Sjf**: shortest-job-first on `(cook_time, id)`
//!
//! # Policy Interface
//!
//! ```rust
//! use ratatouille_core_rs::policy::{JobQueue, QueuedJob, Scheduler, SchedulerKind};
//! use ratatouille_core_rs::Job;
//!
//! let jobs = vec![Job::new(1, 0.0, 3.0), Job::new(2, 0.0, 1.0)];
//! let mut queue = JobQueue::new(SchedulerKind::Sjf);
//! for (index, job) in jobs.iter().enumerate() {
//!     queue.push(QueuedJob::from_job(index, job));
//! }
//!
//! assert_eq!(queue.pop().map(|q| q.id), Some(2));
//! assert_eq!(queue.len(), 1);
//! ```

use crate::models::{Job, JobHandle, JobId};
use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod fcfs;
pub mod sjf;

pub use fcfs::FcfsScheduler;
pub use sjf::SjfScheduler;

/// A ready job as seen by a scheduler
///
/// Carries the fields a policy may order by, plus the handle the engine uses
/// to find the job again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedJob {
    pub handle: JobHandle,
    pub id: JobId,
    pub cook_time: f64,
}

impl QueuedJob {
    /// Snapshot the ordering fields of the job stored at `index`
    pub fn from_job(index: usize, job: &Job) -> Self {
        Self {
            handle: JobHandle::new(index),
            id: job.id(),
            cook_time: job.cook_time(),
        }
    }
}

/// Common capability of every queue discipline
pub trait Scheduler {
    /// Insert a job that just became ready
    fn push(&mut self, job: QueuedJob);

    /// Remove the job this policy serves next
    fn pop(&mut self) -> Option<QueuedJob>;

    /// Return jobs that were popped this round but lost the stove
    ///
    /// `rejected` is in pop order. After requeueing, the jobs must be served
    /// before anything that was behind them, in the same relative order.
    fn requeue(&mut self, rejected: Vec<QueuedJob>);

    /// Number of pending jobs
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerKind {
    Fcfs,
    Sjf,
}

impl SchedulerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulerKind::Fcfs => "fcfs",
            SchedulerKind::Sjf => "sjf",
        }
    }
}

impl fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchedulerKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(SchedulerKind::Fcfs),
            "sjf" => Ok(SchedulerKind::Sjf),
            _ => Err(SimulationError::UnknownScheduler(s.to_string())),
        }
    }
}

/// The scheduler instance for one run
///
/// A closed set of policies: adding a policy means adding a variant here.
#[derive(Debug, Clone)]
pub enum JobQueue {
    Fcfs(FcfsScheduler),
    Sjf(SjfScheduler),
}

impl JobQueue {
    pub fn new(kind: SchedulerKind) -> Self {
        match kind {
            SchedulerKind::Fcfs => JobQueue::Fcfs(FcfsScheduler::new()),
            SchedulerKind::Sjf => JobQueue::Sjf(SjfScheduler::new()),
        }
    }

    pub fn kind(&self) -> SchedulerKind {
        match self {
            JobQueue::Fcfs(_) => SchedulerKind::Fcfs,
            JobQueue::Sjf(_) => SchedulerKind::Sjf,
        }
    }
}

impl Scheduler for JobQueue {
    fn push(&mut self, job: QueuedJob) {
        match self {
            JobQueue::Fcfs(s) => s.push(job),
            JobQueue::Sjf(s) => s.push(job),
        }
    }

    fn pop(&mut self) -> Option<QueuedJob> {
        match self {
            JobQueue::Fcfs(s) => s.pop(),
            JobQueue::Sjf(s) => s.pop(),
        }
    }

    fn requeue(&mut self, rejected: Vec<QueuedJob>) {
        match self {
            JobQueue::Fcfs(s) => s.requeue(rejected),
            JobQueue::Sjf(s) => s.requeue(rejected),
        }
    }

    fn len(&self) -> usize {
        match self {
            JobQueue::Fcfs(s) => s.len(),
            JobQueue::Sjf(s) => s.len(),
        }
    }
}
