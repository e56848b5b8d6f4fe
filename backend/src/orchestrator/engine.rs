//! Simulation Engine
//!
//! Main loop of a kitchen run: jobs arrive, chefs pick them from the
//! scheduler, and the picked jobs contend for the single stove.
//!
//! # Architecture
//!
//! Each iteration ("tick") runs at a fixed `current_time`:
//!
//! ```text
//! 1. Admit every pending job with arrival_time <= now into the scheduler
//! 2. Pop up to num_workers jobs (one attempt per chef)
//!    - nothing popped, arrivals pending: jump to the next arrival, retry
//!    - nothing popped, nothing pending: done
//! 3. Resolve contention for the stove
//!    - semaphore: first popped job cooks alone, the rest are requeued,
//!      the clock advances by its cook time
//!    - no semaphore: every popped job cooks at once, overlaps are counted
//!      as collisions, the clock advances to the latest finish
//! ```
//!
//! The loop terminates for any valid input: `pending` only shrinks, every
//! popped job is either finished or requeued, and the clock moves forward
//! whenever nothing was dispatched.
//!
//! # Example
//!
//! ```rust
//! use ratatouille_core_rs::{run_simulation, Job, RunConfig, SchedulerKind};
//!
//! let jobs = vec![
//!     Job::new(1, 0.0, 2.0),
//!     Job::new(2, 0.0, 1.0),
//!     Job::new(3, 0.0, 3.0),
//! ];
//! let config = RunConfig::new(3, SchedulerKind::Sjf, true);
//!
//! let result = run_simulation(jobs, &config).unwrap();
//! assert_eq!(result.collisions, 0);
//! assert_eq!(result.stove_utilization, 1.0);
//! assert_eq!(result.job_by_id(3).unwrap().start_time(), Some(3.0));
//! ```

use crate::core::time::SimClock;
use crate::models::{ChefId, Event, EventKind, EventLog, Job, JobHandle, JobId};
use crate::orchestrator::digest::compute_digest;
use crate::policy::{JobQueue, QueuedJob, Scheduler, SchedulerKind};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// How chef ids are reported on `ChefPick` events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChefAssignment {
    /// Every pick is attributed to chef 0
    #[default]
    Collapsed,

    /// The k-th job popped in a round is attributed to chef k
    PerSlot,
}

impl ChefAssignment {
    fn chef_for(&self, slot: usize) -> ChefId {
        match self {
            ChefAssignment::Collapsed => 0,
            ChefAssignment::PerSlot => slot,
        }
    }
}

/// Per-run parameters
///
/// # Fields
///
/// * `num_workers` - Chefs popping from the scheduler each round (>= 1)
/// * `scheduler` - Queue discipline
/// * `use_semaphore` - Whether the stove is guarded by mutual exclusion
/// * `chef_ids` - Attribution of picks to chefs on the event log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub num_workers: usize,
    pub scheduler: SchedulerKind,
    pub use_semaphore: bool,
    #[serde(default)]
    pub chef_ids: ChefAssignment,
}

impl RunConfig {
    pub fn new(num_workers: usize, scheduler: SchedulerKind, use_semaphore: bool) -> Self {
        Self {
            num_workers,
            scheduler,
            use_semaphore,
            chef_ids: ChefAssignment::Collapsed,
        }
    }

    /// Build a config from a policy name (`"fcfs"` or `"sjf"`)
    ///
    /// # Errors
    /// `SimulationError::UnknownScheduler` for any other name.
    pub fn from_names(
        num_workers: usize,
        scheduler: &str,
        use_semaphore: bool,
    ) -> Result<Self, SimulationError> {
        Ok(Self::new(num_workers, scheduler.parse()?, use_semaphore))
    }

    /// Set the chef attribution (builder pattern)
    pub fn with_chef_ids(mut self, chef_ids: ChefAssignment) -> Self {
        self.chef_ids = chef_ids;
        self
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Complete output of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Event log ordered by `(timestamp, seq)`
    pub events: Vec<Event>,

    /// The input jobs, in input order, with every timestamp filled
    pub jobs: Vec<Job>,

    /// Extra jobs granted the stove in overlapping rounds
    pub collisions: usize,

    /// `sum(cook_time) / makespan`, 0 when the makespan is 0
    ///
    /// Overlapping occupancy is summed as is, so this exceeds 1.0 when the
    /// stove was shared without a semaphore.
    pub stove_utilization: f64,
}

impl RunResult {
    /// Latest finish time, 0 for an empty run
    pub fn makespan(&self) -> f64 {
        makespan(&self.jobs)
    }

    pub fn job(&self, handle: JobHandle) -> Option<&Job> {
        self.jobs.get(handle.index())
    }

    pub fn job_by_id(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id() == id)
    }

    pub fn events_of_kind(&self, kind: EventKind) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// SHA-256 fingerprint of the whole result
    ///
    /// Equal inputs always produce equal digests.
    pub fn digest(&self) -> Result<String, SimulationError> {
        compute_digest(self)
    }
}

/// Simulation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("Unknown scheduler: {0:?} (expected \"fcfs\" or \"sjf\")")]
    UnknownScheduler(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid job {id}: {reason}")]
    InvalidJob { id: JobId, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// What one call to `Engine::tick` did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Jobs took the stove in this round
    Dispatched { time: f64, jobs: usize },

    /// Nothing was ready; the clock jumped to the next arrival
    Idle { advanced_to: f64 },

    /// Every job has finished
    Complete,
}

// ============================================================================
// Engine
// ============================================================================

/// Discrete-event engine for a single run
///
/// The engine owns the jobs for the run's duration and is the only writer of
/// their timestamps. Jobs are addressed by `JobHandle` (their input index).
pub struct Engine {
    config: RunConfig,
    jobs: Vec<Job>,

    /// Not yet arrived, sorted by arrival time (stable)
    pending: VecDeque<JobHandle>,

    queue: JobQueue,
    clock: SimClock,
    event_log: EventLog,
    collisions: usize,
    rounds: usize,
}

impl Engine {
    /// Validate the config and jobs and prepare a run
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` - `num_workers` is 0
    /// * `InvalidJob` - a job has invalid times, a duplicate id, or was
    ///   already scheduled
    pub fn new(jobs: Vec<Job>, config: RunConfig) -> Result<Self, SimulationError> {
        Self::validate(&jobs, &config)?;

        let mut pending: Vec<JobHandle> = (0..jobs.len()).map(JobHandle::new).collect();
        // Stable: equal arrivals keep input order.
        pending.sort_by(|a, b| {
            jobs[a.index()]
                .arrival_time()
                .total_cmp(&jobs[b.index()].arrival_time())
        });

        Ok(Self {
            queue: JobQueue::new(config.scheduler),
            config,
            jobs,
            pending: pending.into(),
            clock: SimClock::new(),
            event_log: EventLog::new(),
            collisions: 0,
            rounds: 0,
        })
    }

    fn validate(jobs: &[Job], config: &RunConfig) -> Result<(), SimulationError> {
        if config.num_workers == 0 {
            return Err(SimulationError::InvalidConfig(
                "num_workers must be >= 1".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(jobs.len());
        for job in jobs {
            if let Some(reason) = job.validation_error() {
                return Err(SimulationError::InvalidJob {
                    id: job.id(),
                    reason,
                });
            }
            if !seen.insert(job.id()) {
                return Err(SimulationError::InvalidJob {
                    id: job.id(),
                    reason: "duplicate job id".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Dispatch rounds executed so far
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Events emitted so far, in emission order
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty() && self.queue.is_empty() && self.jobs.iter().all(Job::is_finished)
    }

    /// Execute one tick
    pub fn tick(&mut self) -> TickOutcome {
        self.admit_arrivals();

        let picked = self.pick_jobs();
        if picked.is_empty() {
            return match self.pending.front() {
                Some(&next) => {
                    let arrival = self.jobs[next.index()].arrival_time();
                    debug!("t={:.3}: stove idle, advancing to {:.3}", self.clock.now(), arrival);
                    self.clock.advance_to(arrival);
                    TickOutcome::Idle {
                        advanced_to: arrival,
                    }
                }
                None => TickOutcome::Complete,
            };
        }

        let time = self.clock.now();
        let jobs = picked.len();
        self.rounds += 1;
        debug!(
            "t={:.3}: {} chef(s) picked a job ({})",
            time,
            jobs,
            if self.config.use_semaphore { "semaphore" } else { "no semaphore" }
        );

        if self.config.use_semaphore {
            self.dispatch_exclusive(picked);
        } else {
            self.dispatch_concurrent(picked);
        }

        TickOutcome::Dispatched { time, jobs }
    }

    /// Run to completion
    pub fn run(mut self) -> RunResult {
        while self.tick() != TickOutcome::Complete {}

        debug_assert!(self.is_complete(), "engine stopped with unfinished jobs");

        let makespan = makespan(&self.jobs);
        let busy: f64 = self.jobs.iter().map(Job::cook_time).sum();
        let stove_utilization = if makespan > 0.0 { busy / makespan } else { 0.0 };

        info!(
            "run complete: scheduler={} semaphore={} jobs={} rounds={} collisions={} makespan={:.3} utilization={:.3}",
            self.config.scheduler,
            self.config.use_semaphore,
            self.jobs.len(),
            self.rounds,
            self.collisions,
            makespan,
            stove_utilization
        );

        RunResult {
            events: self.event_log.into_sorted(),
            jobs: self.jobs,
            collisions: self.collisions,
            stove_utilization,
        }
    }

    fn admit_arrivals(&mut self) {
        let now = self.clock.now();
        while let Some(&handle) = self.pending.front() {
            let job = &mut self.jobs[handle.index()];
            if job.arrival_time() > now {
                break;
            }
            self.pending.pop_front();

            job.mark_ready(job.arrival_time().max(now));
            trace!("t={:.3}: job {} ready", now, job.id());
            self.queue.push(QueuedJob::from_job(handle.index(), job));
        }
    }

    /// One pop attempt per chef
    fn pick_jobs(&mut self) -> Vec<QueuedJob> {
        // num_workers may be far larger than the queue
        let mut picked = Vec::with_capacity(self.config.num_workers.min(self.queue.len()));
        for _ in 0..self.config.num_workers {
            match self.queue.pop() {
                Some(job) => picked.push(job),
                None => break,
            }
        }
        picked
    }

    /// Mutual exclusion: the first picked job cooks alone
    fn dispatch_exclusive(&mut self, mut picked: Vec<QueuedJob>) {
        let winner = picked.remove(0);
        self.queue.requeue(picked);

        let now = self.clock.now();
        let chef = self.config.chef_ids.chef_for(0);
        self.start_job(winner, now, chef);

        self.clock.advance_by(winner.cook_time);
        let finish = self.clock.now();
        self.finish_job(winner, finish);
    }

    /// No mutual exclusion: every picked job takes the stove at once
    fn dispatch_concurrent(&mut self, picked: Vec<QueuedJob>) {
        let now = self.clock.now();
        let mut max_finish = now;

        for (slot, entry) in picked.iter().enumerate() {
            let chef = self.config.chef_ids.chef_for(slot);
            self.start_job(*entry, now, chef);

            let finish = now + entry.cook_time;
            self.finish_job(*entry, finish);
            max_finish = max_finish.max(finish);
        }

        if picked.len() > 1 {
            self.collisions += picked.len() - 1;
            self.event_log.log(now, EventKind::Collision, None, None);
        }

        self.clock.advance_to(max_finish);
    }

    fn start_job(&mut self, entry: QueuedJob, time: f64, chef: ChefId) {
        self.event_log
            .log(time, EventKind::ChefPick, Some(entry.id), Some(chef));
        self.jobs[entry.handle.index()].mark_started(time);
        self.event_log
            .log(time, EventKind::JobStart, Some(entry.id), None);
    }

    fn finish_job(&mut self, entry: QueuedJob, time: f64) {
        self.jobs[entry.handle.index()].mark_finished(time);
        self.event_log
            .log(time, EventKind::JobFinish, Some(entry.id), None);
    }
}

/// Latest finish time over `jobs`, 0 if none finished
pub(crate) fn makespan(jobs: &[Job]) -> f64 {
    jobs.iter()
        .filter_map(Job::finish_time)
        .fold(0.0, f64::max)
}

/// Run a complete simulation
///
/// # Errors
///
/// Fails before any job is touched if the config or a job is invalid.
pub fn run_simulation(jobs: Vec<Job>, config: &RunConfig) -> Result<RunResult, SimulationError> {
    Ok(Engine::new(jobs, *config)?.run())
}
