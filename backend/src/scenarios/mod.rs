//! Scenario matrix
//!
//! The comparison experiment: every preset workload is run under the four
//! policy/semaphore variants, each on its own fresh copy of the jobs.
//!
//! | Variant | Scheduler | Semaphore |
//! |---|---|---|
//! | `A_FCFS_no_sem` | fcfs | no |
//! | `B_FCFS_sem` | fcfs | yes |
//! | `C_SJF_no_sem` | sjf | no |
//! | `D_SJF_sem` | sjf | yes |

use crate::arrivals::{generate_jobs, ArrivalPattern, CookTimeDistribution, WorkloadConfig};
use crate::metrics::{summarize, MetricsSummary};
use crate::models::Job;
use crate::orchestrator::{run_simulation, RunConfig, RunResult, SimulationError};
use crate::policy::SchedulerKind;
use log::info;
use serde::{Deserialize, Serialize};

/// Seed shared by the preset scenarios
pub const DEFAULT_SEED: u64 = 123;

/// A named workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub workload: WorkloadConfig,
}

impl Scenario {
    pub fn new(name: impl Into<String>, workload: WorkloadConfig) -> Self {
        Self {
            name: name.into(),
            workload,
        }
    }

    pub fn jobs(&self) -> Vec<Job> {
        generate_jobs(&self.workload)
    }
}

/// The four preset scenarios: bursty, poisson, mix, stress
pub fn presets() -> Vec<Scenario> {
    let make = |name: &str,
                num_jobs: usize,
                arrival_pattern: ArrivalPattern,
                cook_time_dist: CookTimeDistribution| {
        Scenario::new(
            name,
            WorkloadConfig {
                num_jobs,
                arrival_pattern,
                cook_time_dist,
                seed: DEFAULT_SEED,
            },
        )
    };

    vec![
        make("bursty", 40, ArrivalPattern::Bursty, CookTimeDistribution::Mix),
        make("poisson", 60, ArrivalPattern::Poisson, CookTimeDistribution::ExponTail),
        make("mix", 50, ArrivalPattern::Mix, CookTimeDistribution::Mix),
        make("stress", 120, ArrivalPattern::Stress, CookTimeDistribution::ExponTail),
    ]
}

/// Look up a preset by name
pub fn preset(name: &str) -> Option<Scenario> {
    presets().into_iter().find(|s| s.name == name)
}

/// A policy/semaphore combination under comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Variant {
    pub name: &'static str,
    pub scheduler: SchedulerKind,
    pub use_semaphore: bool,
}

impl Variant {
    pub fn run_config(&self, num_workers: usize) -> RunConfig {
        RunConfig::new(num_workers, self.scheduler, self.use_semaphore)
    }
}

pub const VARIANTS: [Variant; 4] = [
    Variant {
        name: "A_FCFS_no_sem",
        scheduler: SchedulerKind::Fcfs,
        use_semaphore: false,
    },
    Variant {
        name: "B_FCFS_sem",
        scheduler: SchedulerKind::Fcfs,
        use_semaphore: true,
    },
    Variant {
        name: "C_SJF_no_sem",
        scheduler: SchedulerKind::Sjf,
        use_semaphore: false,
    },
    Variant {
        name: "D_SJF_sem",
        scheduler: SchedulerKind::Sjf,
        use_semaphore: true,
    },
];

/// One summary row of the experiment table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRow {
    pub scenario: String,
    pub variant: String,
    #[serde(flatten)]
    pub summary: MetricsSummary,
}

/// Full outcome of one (scenario, variant) run
#[derive(Debug, Clone)]
pub struct VariantOutcome {
    pub row: ExperimentRow,
    pub result: RunResult,
}

/// Run every variant on `scenario`
///
/// The jobs are generated once and each variant receives an unscheduled copy.
pub fn run_scenario(
    scenario: &Scenario,
    num_workers: usize,
) -> Result<Vec<VariantOutcome>, SimulationError> {
    let jobs = scenario.jobs();

    VARIANTS
        .iter()
        .map(|variant| {
            let copy: Vec<Job> = jobs.iter().map(Job::unscheduled).collect();
            let result = run_simulation(copy, &variant.run_config(num_workers))?;
            let summary = summarize(&result.jobs, result.stove_utilization, result.collisions);

            info!(
                "{}/{}: avg_wait={:.3} avg_turnaround={:.3} utilization={:.3} collisions={}",
                scenario.name,
                variant.name,
                summary.avg_waiting_time,
                summary.avg_turnaround_time,
                summary.utilization,
                summary.collisions
            );

            Ok(VariantOutcome {
                row: ExperimentRow {
                    scenario: scenario.name.clone(),
                    variant: variant.name.to_string(),
                    summary,
                },
                result,
            })
        })
        .collect()
}

/// Run every variant on every scenario, scenario-major
pub fn run_matrix(
    scenarios: &[Scenario],
    num_workers: usize,
) -> Result<Vec<VariantOutcome>, SimulationError> {
    let mut outcomes = Vec::with_capacity(scenarios.len() * VARIANTS.len());
    for scenario in scenarios {
        outcomes.extend(run_scenario(scenario, num_workers)?);
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_distinct() {
        let names: Vec<String> = presets().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["bursty", "poisson", "mix", "stress"]);
        assert_eq!(preset("stress").unwrap().workload.num_jobs, 120);
        assert!(preset("lunch_rush").is_none());
    }

    #[test]
    fn test_variant_configs() {
        let d = VARIANTS[3].run_config(4);
        assert_eq!(d.scheduler, SchedulerKind::Sjf);
        assert!(d.use_semaphore);
        assert_eq!(d.num_workers, 4);
    }

    #[test]
    fn test_row_serializes_flat() {
        let row = ExperimentRow {
            scenario: "bursty".to_string(),
            variant: "B_FCFS_sem".to_string(),
            summary: summarize(&[], 0.0, 0),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["variant"], "B_FCFS_sem");
        assert_eq!(value["max_queue"], 0);
    }
}
