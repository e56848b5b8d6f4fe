//! FCFS (First-Come-First-Served) Policy
//!
//! Simplest baseline policy: serve jobs in the order they became ready.
//!
//! # Behavior
//!
//! - `push` appends at the tail
//! - `pop` removes from the head
//! - `push_front` puts a job back at the head, used when a job lost the stove
//!   this round and must not fall behind later arrivals

use super::{QueuedJob, Scheduler};
use std::collections::VecDeque;

/// FCFS queue
#[derive(Debug, Clone, Default)]
pub struct FcfsScheduler {
    queue: VecDeque<QueuedJob>,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Reinsert a job at the head of the queue
    pub fn push_front(&mut self, job: QueuedJob) {
        self.queue.push_front(job);
    }
}

impl Scheduler for FcfsScheduler {
    fn push(&mut self, job: QueuedJob) {
        self.queue.push_back(job);
    }

    fn pop(&mut self) -> Option<QueuedJob> {
        self.queue.pop_front()
    }

    fn requeue(&mut self, rejected: Vec<QueuedJob>) {
        // Reverse so the first rejected job ends up at the very front.
        for job in rejected.into_iter().rev() {
            self.push_front(job);
        }
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}
