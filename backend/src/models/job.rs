//! Job model
//!
//! A job is one order that must occupy the stove for `cook_time` units.
//! Each job carries:
//! - Identity and static parameters (id, arrival, cook time, prep time)
//! - Lifecycle timestamps written by the engine (ready, start, finish)
//!
//! The lifecycle timestamps are write-once. Only the engine writes them, and
//! only through crate-private setters, so code outside the crate can read a
//! finished timeline but cannot edit it.

use serde::{Deserialize, Serialize};

/// Job identifier, unique within a run
pub type JobId = u64;

/// Index of a job inside the engine's job arena
///
/// Handles are positions in the job list handed to the engine, so they stay
/// valid in `RunResult::jobs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobHandle(usize);

impl JobHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the job list
    pub fn index(&self) -> usize {
        self.0
    }
}

/// An order competing for the stove
///
/// # Example
/// ```
/// use ratatouille_core_rs::Job;
///
/// let job = Job::new(1, 0.0, 2.5).with_prep_time(0.5);
/// assert_eq!(job.cook_time(), 2.5);
/// assert!(job.start_time().is_none());
/// assert!(job.waiting_time().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,

    /// When the job becomes known to the system
    arrival_time: f64,

    /// Exclusive stove occupation required
    cook_time: f64,

    /// Reserved; the contention model does not use it
    prep_time: f64,

    /// When the job entered the scheduler
    ready_time: Option<f64>,

    /// When the job took the stove
    start_time: Option<f64>,

    /// When the job released the stove
    finish_time: Option<f64>,
}

impl Job {
    /// Create an unscheduled job
    pub fn new(id: JobId, arrival_time: f64, cook_time: f64) -> Self {
        Self {
            id,
            arrival_time,
            cook_time,
            prep_time: 0.0,
            ready_time: None,
            start_time: None,
            finish_time: None,
        }
    }

    /// Set the prep time (builder pattern)
    pub fn with_prep_time(mut self, prep_time: f64) -> Self {
        self.prep_time = prep_time;
        self
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    pub fn cook_time(&self) -> f64 {
        self.cook_time
    }

    pub fn prep_time(&self) -> f64 {
        self.prep_time
    }

    pub fn ready_time(&self) -> Option<f64> {
        self.ready_time
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    pub fn finish_time(&self) -> Option<f64> {
        self.finish_time
    }

    /// `start_time - ready_time`, once both are known
    pub fn waiting_time(&self) -> Option<f64> {
        match (self.start_time, self.ready_time) {
            (Some(start), Some(ready)) => Some(start - ready),
            _ => None,
        }
    }

    /// `finish_time - arrival_time`, once the job has finished
    pub fn turnaround_time(&self) -> Option<f64> {
        self.finish_time.map(|finish| finish - self.arrival_time)
    }

    /// Check if the job has released the stove
    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }

    /// Check if any lifecycle timestamp has been written
    pub fn is_scheduled(&self) -> bool {
        self.ready_time.is_some() || self.start_time.is_some() || self.finish_time.is_some()
    }

    /// Copy of this job with every lifecycle timestamp cleared
    ///
    /// Used to replay the same workload under several run configurations.
    pub fn unscheduled(&self) -> Self {
        Self::new(self.id, self.arrival_time, self.cook_time).with_prep_time(self.prep_time)
    }

    /// Reason this job cannot enter a run, if any
    pub(crate) fn validation_error(&self) -> Option<String> {
        if self.id == 0 {
            return Some("id must be positive".to_string());
        }
        if !self.arrival_time.is_finite() || self.arrival_time < 0.0 {
            return Some(format!(
                "arrival_time must be finite and >= 0, got {}",
                self.arrival_time
            ));
        }
        if !self.cook_time.is_finite() || self.cook_time <= 0.0 {
            return Some(format!(
                "cook_time must be finite and > 0, got {}",
                self.cook_time
            ));
        }
        if !self.prep_time.is_finite() || self.prep_time < 0.0 {
            return Some(format!(
                "prep_time must be finite and >= 0, got {}",
                self.prep_time
            ));
        }
        if self.is_scheduled() {
            return Some("job already carries lifecycle timestamps".to_string());
        }
        None
    }

    pub(crate) fn mark_ready(&mut self, time: f64) {
        assert!(self.ready_time.is_none(), "job {} made ready twice", self.id);
        self.ready_time = Some(time);
    }

    pub(crate) fn mark_started(&mut self, time: f64) {
        assert!(self.start_time.is_none(), "job {} started twice", self.id);
        self.start_time = Some(time);
    }

    pub(crate) fn mark_finished(&mut self, time: f64) {
        assert!(self.finish_time.is_none(), "job {} finished twice", self.id);
        self.finish_time = Some(time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_times_follow_timestamps() {
        let mut job = Job::new(7, 1.0, 2.0);
        job.mark_ready(1.5);
        assert_eq!(job.waiting_time(), None);

        job.mark_started(3.0);
        assert_eq!(job.waiting_time(), Some(1.5));
        assert_eq!(job.turnaround_time(), None);

        job.mark_finished(5.0);
        assert_eq!(job.turnaround_time(), Some(4.0));
        assert!(job.is_finished());
    }

    #[test]
    #[should_panic(expected = "started twice")]
    fn test_start_is_write_once() {
        let mut job = Job::new(1, 0.0, 1.0);
        job.mark_started(0.0);
        job.mark_started(1.0);
    }

    #[test]
    fn test_validation_rejects_bad_cook_time() {
        assert!(Job::new(1, 0.0, 0.0).validation_error().is_some());
        assert!(Job::new(1, 0.0, -1.0).validation_error().is_some());
        assert!(Job::new(1, 0.0, f64::NAN).validation_error().is_some());
        assert!(Job::new(1, 0.0, 1.0).validation_error().is_none());
    }

    #[test]
    fn test_unscheduled_clears_timeline() {
        let mut job = Job::new(3, 0.5, 1.0).with_prep_time(0.25);
        job.mark_ready(0.5);
        job.mark_started(0.5);
        job.mark_finished(1.5);

        let fresh = job.unscheduled();
        assert!(!fresh.is_scheduled());
        assert_eq!(fresh.prep_time(), 0.25);
        assert_eq!(fresh.id(), 3);
    }
}
