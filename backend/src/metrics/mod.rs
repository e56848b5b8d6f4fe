//! Run metrics
//!
//! Pure functions over a finished job list. Nothing here looks at the event
//! log; the engine's aggregate counters (utilization, collisions) are passed
//! through unchanged.
//!
//! # Example
//!
//! ```rust
//! use ratatouille_core_rs::{run_simulation, summarize, Job, RunConfig, SchedulerKind};
//!
//! let jobs = vec![Job::new(1, 0.0, 1.0), Job::new(2, 0.0, 1.0)];
//! let result = run_simulation(jobs, &RunConfig::new(1, SchedulerKind::Fcfs, true)).unwrap();
//! let summary = summarize(&result.jobs, result.stove_utilization, result.collisions);
//!
//! assert_eq!(summary.avg_waiting_time, 0.5);
//! assert_eq!(summary.throughput, 1.0);
//! ```

use crate::models::{Job, JobId};
use crate::orchestrator::engine::makespan;
use serde::{Deserialize, Serialize};

/// Summary statistics for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Mean of `start_time - ready_time`
    pub avg_waiting_time: f64,

    /// Mean of `finish_time - arrival_time`
    pub avg_turnaround_time: f64,

    /// Jobs per unit of simulated time over the makespan
    pub throughput: f64,

    /// Stove utilization as reported by the engine
    pub utilization: f64,

    /// Estimated peak number of jobs waiting, see `estimate_max_queue`
    pub max_queue: usize,

    /// Collisions as reported by the engine
    pub collisions: usize,
}

/// One row of the per-job table consumed by external writers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub arrival_time: f64,
    pub cook_time: f64,
    pub ready_time: Option<f64>,
    pub start_time: Option<f64>,
    pub finish_time: Option<f64>,
    pub waiting_time: Option<f64>,
    pub turnaround_time: Option<f64>,
}

impl From<&Job> for JobRecord {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id(),
            arrival_time: job.arrival_time(),
            cook_time: job.cook_time(),
            ready_time: job.ready_time(),
            start_time: job.start_time(),
            finish_time: job.finish_time(),
            waiting_time: job.waiting_time(),
            turnaround_time: job.turnaround_time(),
        }
    }
}

/// Per-job rows in job order
pub fn job_records(jobs: &[Job]) -> Vec<JobRecord> {
    jobs.iter().map(JobRecord::from).collect()
}

/// Summarize a finished run
///
/// Jobs whose waiting or turnaround time is undefined are left out of the
/// corresponding mean. An empty job list yields all zeros apart from the
/// passed-through values.
pub fn summarize(jobs: &[Job], utilization: f64, collisions: usize) -> MetricsSummary {
    let makespan = makespan(jobs);
    let throughput = if makespan > 0.0 {
        jobs.len() as f64 / makespan
    } else {
        0.0
    };

    MetricsSummary {
        avg_waiting_time: mean(jobs.iter().filter_map(Job::waiting_time)),
        avg_turnaround_time: mean(jobs.iter().filter_map(Job::turnaround_time)),
        throughput,
        utilization,
        max_queue: estimate_max_queue(jobs),
        collisions,
    }
}

/// Estimate the peak queue depth from arrival and start times
///
/// Merges sorted arrivals with sorted starts: an arrival at or before the next
/// start counts one more waiting job, otherwise a start removes one (never
/// going below zero). The running maximum is returned.
///
/// This is an approximation. It pairs the i-th start with no particular job
/// and stops as soon as either list is exhausted, so it is a proxy for the
/// real queue trace, not a replay of it. Jobs that never started are ignored.
pub fn estimate_max_queue(jobs: &[Job]) -> usize {
    let mut starts: Vec<f64> = jobs.iter().filter_map(Job::start_time).collect();
    let mut arrivals: Vec<f64> = jobs
        .iter()
        .filter(|job| job.start_time().is_some())
        .map(Job::arrival_time)
        .collect();
    starts.sort_by(f64::total_cmp);
    arrivals.sort_by(f64::total_cmp);

    let (mut i, mut j) = (0, 0);
    let (mut current, mut max_queue) = (0usize, 0usize);
    while i < starts.len() && j < arrivals.len() {
        if arrivals[j] <= starts[i] {
            current += 1;
            max_queue = max_queue.max(current);
            j += 1;
        } else {
            current = current.saturating_sub(1);
            i += 1;
        }
    }

    max_queue
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_jobs_summary() {
        let summary = summarize(&[], 0.0, 0);
        assert_eq!(summary.avg_waiting_time, 0.0);
        assert_eq!(summary.avg_turnaround_time, 0.0);
        assert_eq!(summary.throughput, 0.0);
        assert_eq!(summary.max_queue, 0);
    }

    #[test]
    fn test_unfinished_jobs_excluded_from_means() {
        let mut done = Job::new(1, 0.0, 2.0);
        done.mark_ready(0.0);
        done.mark_started(1.0);
        done.mark_finished(3.0);
        let waiting = Job::new(2, 0.0, 1.0);

        let summary = summarize(&[done, waiting], 0.5, 0);
        assert_eq!(summary.avg_waiting_time, 1.0);
        assert_eq!(summary.avg_turnaround_time, 3.0);
        assert_eq!(summary.throughput, 2.0 / 3.0);
        assert_eq!(summary.utilization, 0.5);
    }

    #[test]
    fn test_max_queue_counts_simultaneous_arrivals() {
        let mut jobs = Vec::new();
        for (id, start) in [(1, 0.0), (2, 1.0), (3, 2.0)] {
            let mut job = Job::new(id, 0.0, 1.0);
            job.mark_ready(0.0);
            job.mark_started(start);
            job.mark_finished(start + 1.0);
            jobs.push(job);
        }

        assert_eq!(estimate_max_queue(&jobs), 3);
    }

    #[test]
    fn test_job_record_mirrors_job() {
        let job = Job::new(4, 1.5, 2.0);
        let record = JobRecord::from(&job);
        assert_eq!(record.id, 4);
        assert_eq!(record.arrival_time, 1.5);
        assert_eq!(record.waiting_time, None);
    }
}
