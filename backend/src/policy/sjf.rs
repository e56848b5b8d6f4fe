//! SJF (Shortest-Job-First) Policy
//!
//! Serves the ready job with the smallest cook time. Exact ties go to the
//! lower job id, so the pop order is fully determined by the pushed set.
//!
//! The policy is non-preemptive and only sees jobs that have already been
//! pushed; a shorter job arriving later does not displace anything.

use super::{QueuedJob, Scheduler};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry ordered so that the max-heap yields the minimum `(cook_time, id)`
#[derive(Debug, Clone, Copy)]
struct ShortestFirst(QueuedJob);

impl ShortestFirst {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.0
            .cook_time
            .total_cmp(&other.0.cook_time)
            .then_with(|| self.0.id.cmp(&other.0.id))
            .then_with(|| self.0.handle.cmp(&other.0.handle))
    }
}

impl PartialEq for ShortestFirst {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for ShortestFirst {}

impl PartialOrd for ShortestFirst {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ShortestFirst {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other.key_cmp(self)
    }
}

/// SJF priority queue
#[derive(Debug, Clone, Default)]
pub struct SjfScheduler {
    heap: BinaryHeap<ShortestFirst>,
}

impl SjfScheduler {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// The job `pop` would return, without removing it
    pub fn peek(&self) -> Option<QueuedJob> {
        self.heap.peek().map(|entry| entry.0)
    }
}

impl Scheduler for SjfScheduler {
    fn push(&mut self, job: QueuedJob) {
        self.heap.push(ShortestFirst(job));
    }

    fn pop(&mut self) -> Option<QueuedJob> {
        self.heap.pop().map(|entry| entry.0)
    }

    fn requeue(&mut self, rejected: Vec<QueuedJob>) {
        // The key alone decides the order, so the heap restores priority.
        for job in rejected {
            self.push(job);
        }
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobHandle;

    fn queued(id: u64, cook_time: f64) -> QueuedJob {
        QueuedJob {
            handle: JobHandle::new(id as usize),
            id,
            cook_time,
        }
    }

    fn drain(sjf: &mut SjfScheduler) -> Vec<u64> {
        std::iter::from_fn(|| sjf.pop()).map(|q| q.id).collect()
    }

    #[test]
    fn test_sjf_orders_by_cook_time() {
        let mut sjf = SjfScheduler::new();
        sjf.push(queued(1, 2.0));
        sjf.push(queued(2, 1.0));
        sjf.push(queued(3, 3.0));

        assert_eq!(sjf.peek().map(|q| q.id), Some(2));
        assert_eq!(drain(&mut sjf), vec![2, 1, 3]);
    }

    #[test]
    fn test_sjf_ties_broken_by_lower_id() {
        let mut sjf = SjfScheduler::new();
        sjf.push(queued(9, 1.5));
        sjf.push(queued(4, 1.5));
        sjf.push(queued(6, 1.5));
        sjf.push(queued(5, 0.5));

        assert_eq!(drain(&mut sjf), vec![5, 4, 6, 9]);
    }

    #[test]
    fn test_requeue_keeps_priority() {
        let mut sjf = SjfScheduler::new();
        sjf.push(queued(1, 4.0));
        sjf.push(queued(2, 2.0));
        sjf.push(queued(3, 3.0));

        let winner = sjf.pop().unwrap();
        let loser = sjf.pop().unwrap();
        assert_eq!((winner.id, loser.id), (2, 3));

        sjf.requeue(vec![loser]);
        assert_eq!(drain(&mut sjf), vec![3, 1]);
    }
}
