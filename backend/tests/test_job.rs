//! Tests for the Job model and its lifecycle as seen from outside the engine

use ratatouille_core_rs::{run_simulation, Job, RunConfig, SchedulerKind, SimulationError};

#[test]
fn test_new_job_is_unscheduled() {
    let job = Job::new(1, 0.5, 2.0);

    assert_eq!(job.id(), 1);
    assert_eq!(job.arrival_time(), 0.5);
    assert_eq!(job.cook_time(), 2.0);
    assert_eq!(job.prep_time(), 0.0);
    assert!(!job.is_scheduled());
    assert!(!job.is_finished());
    assert_eq!(job.waiting_time(), None);
    assert_eq!(job.turnaround_time(), None);
}

#[test]
fn test_engine_fills_every_timestamp() {
    let jobs = vec![Job::new(1, 1.0, 2.0), Job::new(2, 1.5, 1.0)];
    let result = run_simulation(jobs, &RunConfig::new(1, SchedulerKind::Fcfs, true)).unwrap();

    let first = &result.jobs[0];
    assert_eq!(first.ready_time(), Some(1.0));
    assert_eq!(first.start_time(), Some(1.0));
    assert_eq!(first.finish_time(), Some(3.0));
    assert_eq!(first.waiting_time(), Some(0.0));
    assert_eq!(first.turnaround_time(), Some(2.0));

    // Admitted only once the stove freed up at t=3
    let second = &result.jobs[1];
    assert_eq!(second.ready_time(), Some(3.0));
    assert_eq!(second.start_time(), Some(3.0));
    assert_eq!(second.finish_time(), Some(4.0));
    assert_eq!(second.waiting_time(), Some(0.0));
    assert_eq!(second.turnaround_time(), Some(2.5));
}

#[test]
fn test_scheduled_job_cannot_be_rerun() {
    let result = run_simulation(
        vec![Job::new(1, 0.0, 1.0)],
        &RunConfig::new(1, SchedulerKind::Fcfs, true),
    )
    .unwrap();

    let err = run_simulation(result.jobs.clone(), &RunConfig::new(1, SchedulerKind::Sjf, true))
        .unwrap_err();
    assert!(matches!(err, SimulationError::InvalidJob { id: 1, .. }));

    // An unscheduled copy runs fine
    let fresh: Vec<Job> = result.jobs.iter().map(Job::unscheduled).collect();
    assert!(run_simulation(fresh, &RunConfig::new(1, SchedulerKind::Sjf, true)).is_ok());
}

#[test]
fn test_invalid_times_rejected() {
    let config = RunConfig::new(1, SchedulerKind::Fcfs, true);

    for job in [
        Job::new(1, -1.0, 1.0),
        Job::new(2, f64::INFINITY, 1.0),
        Job::new(3, 0.0, 0.0),
        Job::new(4, 0.0, -2.0),
        Job::new(5, 0.0, 1.0).with_prep_time(-0.1),
    ] {
        let id = job.id();
        match run_simulation(vec![job], &config) {
            Err(SimulationError::InvalidJob { id: bad, .. }) => assert_eq!(bad, id),
            other => panic!("job {} should be rejected, got {:?}", id, other),
        }
    }
}

#[test]
fn test_zero_id_rejected() {
    let config = RunConfig::new(1, SchedulerKind::Fcfs, true);
    let err = run_simulation(vec![Job::new(0, 0.0, 1.0)], &config).unwrap_err();

    assert_eq!(
        err,
        SimulationError::InvalidJob {
            id: 0,
            reason: "id must be positive".to_string(),
        }
    );
}

#[test]
fn test_job_serde_roundtrip_keeps_timeline() {
    let result = run_simulation(
        vec![Job::new(9, 0.0, 1.25)],
        &RunConfig::new(1, SchedulerKind::Fcfs, true),
    )
    .unwrap();

    let json = serde_json::to_string(&result.jobs[0]).unwrap();
    let back: Job = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result.jobs[0]);
    assert_eq!(back.finish_time(), Some(1.25));
}
