//! Engine tests with the stove semaphore disabled
//!
//! Every popped job takes the stove immediately; overlapping jobs in a round
//! are counted as collisions and a single collision event marks the round.

use ratatouille_core_rs::{
    run_simulation, ChefAssignment, EventKind, Job, RunConfig, SchedulerKind,
};

fn three_jobs() -> Vec<Job> {
    vec![
        Job::new(1, 0.0, 2.0),
        Job::new(2, 0.0, 1.0),
        Job::new(3, 0.0, 3.0),
    ]
}

#[test]
fn test_fcfs_race_end_to_end() {
    let config = RunConfig::from_names(3, "fcfs", false).unwrap();
    let result = run_simulation(three_jobs(), &config).unwrap();

    assert!(result.jobs.iter().all(|j| j.start_time() == Some(0.0)));
    let finishes: Vec<f64> = result
        .jobs
        .iter()
        .map(|j| j.finish_time().unwrap())
        .collect();
    assert_eq!(finishes, vec![2.0, 1.0, 3.0]);

    assert_eq!(result.collisions, 2);
    assert_eq!(result.stove_utilization, 2.0);
    assert_eq!(result.makespan(), 3.0);

    let collisions: Vec<_> = result.events_of_kind(EventKind::Collision).collect();
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].timestamp, 0.0);
    assert_eq!(collisions[0].job_id, None);
    assert_eq!(collisions[0].chef_id, None);
}

#[test]
fn test_race_event_order() {
    let config = RunConfig::new(3, SchedulerKind::Fcfs, false);
    let result = run_simulation(three_jobs(), &config).unwrap();

    let log: Vec<(f64, EventKind, Option<u64>)> = result
        .events
        .iter()
        .map(|e| (e.timestamp, e.kind, e.job_id))
        .collect();
    assert_eq!(
        log,
        vec![
            (0.0, EventKind::ChefPick, Some(1)),
            (0.0, EventKind::JobStart, Some(1)),
            (0.0, EventKind::ChefPick, Some(2)),
            (0.0, EventKind::JobStart, Some(2)),
            (0.0, EventKind::ChefPick, Some(3)),
            (0.0, EventKind::JobStart, Some(3)),
            (0.0, EventKind::Collision, None),
            (1.0, EventKind::JobFinish, Some(2)),
            (2.0, EventKind::JobFinish, Some(1)),
            (3.0, EventKind::JobFinish, Some(3)),
        ]
    );

    let seqs: Vec<u64> = result.events.iter().map(|e| e.seq).collect();
    assert!(seqs[..7].windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_round_waits_for_slowest_job() {
    // Two chefs: jobs 1 and 2 share the stove, job 3 waits for the longer one
    let jobs = vec![
        Job::new(1, 0.0, 1.0),
        Job::new(2, 0.0, 2.0),
        Job::new(3, 0.0, 1.0),
    ];
    let result = run_simulation(jobs, &RunConfig::new(2, SchedulerKind::Fcfs, false)).unwrap();

    assert_eq!(result.jobs[2].start_time(), Some(2.0));
    assert_eq!(result.jobs[2].finish_time(), Some(3.0));
    assert_eq!(result.collisions, 1);
    assert_eq!(result.events_of_kind(EventKind::Collision).count(), 1);
    assert_eq!(result.stove_utilization, 4.0 / 3.0);
}

#[test]
fn test_single_job_rounds_do_not_collide() {
    let jobs = vec![
        Job::new(1, 0.0, 1.0),
        Job::new(2, 2.0, 1.0),
        Job::new(3, 4.0, 1.0),
    ];
    let result = run_simulation(jobs, &RunConfig::new(4, SchedulerKind::Sjf, false)).unwrap();

    assert_eq!(result.collisions, 0);
    assert_eq!(result.events_of_kind(EventKind::Collision).count(), 0);
    assert_eq!(result.stove_utilization, 3.0 / 5.0);
}

#[test]
fn test_single_worker_never_collides() {
    let result = run_simulation(three_jobs(), &RunConfig::new(1, SchedulerKind::Sjf, false))
        .unwrap();
    let starts: Vec<f64> = result
        .jobs
        .iter()
        .map(|j| j.start_time().unwrap())
        .collect();

    // SJF order 2, 1, 3
    assert_eq!(starts, vec![1.0, 0.0, 3.0]);
    assert_eq!(result.collisions, 0);
}

#[test]
fn test_late_arrival_ready_at_round_end() {
    let jobs = vec![
        Job::new(1, 0.0, 4.0),
        Job::new(2, 0.0, 2.0),
        Job::new(3, 1.0, 1.0),
    ];
    let result = run_simulation(jobs, &RunConfig::new(2, SchedulerKind::Fcfs, false)).unwrap();

    let late = result.job_by_id(3).unwrap();
    assert_eq!(late.ready_time(), Some(4.0));
    assert_eq!(late.start_time(), Some(4.0));
    assert_eq!(late.waiting_time(), Some(0.0));
    assert_eq!(late.turnaround_time(), Some(4.0));
}

#[test]
fn test_per_slot_chefs_in_a_round() {
    let config =
        RunConfig::new(2, SchedulerKind::Fcfs, false).with_chef_ids(ChefAssignment::PerSlot);
    let result = run_simulation(three_jobs(), &config).unwrap();

    let picks: Vec<(Option<u64>, Option<usize>)> = result
        .events_of_kind(EventKind::ChefPick)
        .map(|e| (e.job_id, e.chef_id))
        .collect();
    assert_eq!(
        picks,
        vec![(Some(1), Some(0)), (Some(2), Some(1)), (Some(3), Some(0))]
    );
}

#[test]
fn test_collisions_scale_with_workers() {
    let jobs: Vec<Job> = (1..=8).map(|id| Job::new(id, 0.0, 1.0)).collect();

    for (workers, expected) in [(1, 0), (2, 4), (4, 6), (8, 7), (16, 7)] {
        let config = RunConfig::new(workers, SchedulerKind::Fcfs, false);
        let result = run_simulation(jobs.clone(), &config).unwrap();
        assert_eq!(result.collisions, expected, "workers={}", workers);
    }
}

#[test]
fn test_huge_worker_count_is_bounded_by_ready_jobs() {
    let jobs = vec![Job::new(1, 0.0, 1.0), Job::new(2, 0.0, 2.0)];

    for (use_semaphore, expected) in [(false, 1), (true, 0)] {
        let config = RunConfig::new(usize::MAX, SchedulerKind::Fcfs, use_semaphore);
        let result = run_simulation(jobs.clone(), &config).unwrap();

        assert_eq!(result.collisions, expected, "semaphore={}", use_semaphore);
        assert!(result.jobs.iter().all(|j| j.is_finished()));
    }
}
