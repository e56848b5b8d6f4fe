//! Workload generation for deterministic job creation.
//!
//! Produces the job set a run consumes: arrival times from a named arrival
//! pattern and cook times from a named distribution, all drawn from a seeded
//! `RngManager`.
//!
//! # Key Principles
//!
//! 1. **Determinism**: Same seed + same config → same jobs
//! 2. **Named recipes**: Patterns and distributions are closed enums, parsed
//!    from their lowercase names
//! 3. **Ordered output**: Jobs come back sorted by arrival, ids `1..=n`
//!
//! # Example
//!
//! ```
//! use ratatouille_core_rs::arrivals::{generate_jobs, WorkloadConfig};
//!
//! let config = WorkloadConfig::from_names(20, "bursty", "uniform", 123).unwrap();
//! let jobs = generate_jobs(&config);
//!
//! assert_eq!(jobs.len(), 20);
//! assert_eq!(jobs[0].id(), 1);
//! assert_eq!(jobs, generate_jobs(&config));
//! ```

use crate::models::Job;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while configuring a workload
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkloadError {
    #[error("Unknown arrival pattern: {0:?} (expected bursty, poisson, mix or stress)")]
    UnknownArrivalPattern(String),

    #[error("Unknown cook time distribution: {0:?} (expected uniform, expon_tail or mix)")]
    UnknownCookTimeDistribution(String),
}

/// How arrival times are spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalPattern {
    /// Groups of simultaneous arrivals separated by 2-5 time units
    Bursty,

    /// Poisson process with rate 1.0
    Poisson,

    /// Half bursty, half Poisson with rate 0.7, merged
    Mix,

    /// Poisson process with rate 2.0
    Stress,
}

impl ArrivalPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrivalPattern::Bursty => "bursty",
            ArrivalPattern::Poisson => "poisson",
            ArrivalPattern::Mix => "mix",
            ArrivalPattern::Stress => "stress",
        }
    }
}

impl fmt::Display for ArrivalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrivalPattern {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bursty" => Ok(ArrivalPattern::Bursty),
            "poisson" => Ok(ArrivalPattern::Poisson),
            "mix" => Ok(ArrivalPattern::Mix),
            "stress" => Ok(ArrivalPattern::Stress),
            _ => Err(WorkloadError::UnknownArrivalPattern(s.to_string())),
        }
    }
}

/// Cook time distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookTimeDistribution {
    /// U(0.5, 4.0)
    Uniform,

    /// Exp(mean 1.5) clipped to [0.2, 12.0]
    ExponTail,

    /// Half U(0.5, 3.0), half Exp(mean 2.0) clipped to [0.2, 15.0], shuffled
    Mix,
}

impl CookTimeDistribution {
    pub fn as_str(&self) -> &'static str {
        match self {
            CookTimeDistribution::Uniform => "uniform",
            CookTimeDistribution::ExponTail => "expon_tail",
            CookTimeDistribution::Mix => "mix",
        }
    }
}

impl fmt::Display for CookTimeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CookTimeDistribution {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(CookTimeDistribution::Uniform),
            "expon_tail" => Ok(CookTimeDistribution::ExponTail),
            "mix" => Ok(CookTimeDistribution::Mix),
            _ => Err(WorkloadError::UnknownCookTimeDistribution(s.to_string())),
        }
    }
}

/// Everything needed to reproduce a job set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    pub num_jobs: usize,
    pub arrival_pattern: ArrivalPattern,
    pub cook_time_dist: CookTimeDistribution,
    pub seed: u64,
}

impl WorkloadConfig {
    /// Build a config from pattern and distribution names
    ///
    /// # Errors
    /// `WorkloadError` if either name is not recognized.
    pub fn from_names(
        num_jobs: usize,
        arrival_pattern: &str,
        cook_time_dist: &str,
        seed: u64,
    ) -> Result<Self, WorkloadError> {
        Ok(Self {
            num_jobs,
            arrival_pattern: arrival_pattern.parse()?,
            cook_time_dist: cook_time_dist.parse()?,
            seed,
        })
    }

    /// Same workload with a different seed (builder pattern)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Generate the job set for `config`
///
/// Arrival times are drawn first, then cook times, from a single RNG seeded
/// with `config.seed`.
pub fn generate_jobs(config: &WorkloadConfig) -> Vec<Job> {
    let mut rng = RngManager::new(config.seed);
    let n = config.num_jobs;

    let arrivals: Vec<f64> = match config.arrival_pattern {
        ArrivalPattern::Bursty => arrivals_bursty(&mut rng, n),
        ArrivalPattern::Poisson => arrivals_poisson(&mut rng, 1.0, n),
        ArrivalPattern::Mix => {
            let mut merged = arrivals_bursty(&mut rng, n / 2);
            let rest = n - merged.len();
            merged.extend(arrivals_poisson(&mut rng, 0.7, rest));
            merged.sort_by(f64::total_cmp);
            merged
        }
        ArrivalPattern::Stress => arrivals_poisson(&mut rng, 2.0, n),
    };

    let cook_times: Vec<f64> = match config.cook_time_dist {
        CookTimeDistribution::Uniform => (0..n).map(|_| rng.uniform(0.5, 4.0)).collect(),
        CookTimeDistribution::ExponTail => (0..n)
            .map(|_| rng.exponential(1.5).clamp(0.2, 12.0))
            .collect(),
        CookTimeDistribution::Mix => {
            let half = n / 2;
            let mut times: Vec<f64> = (0..half).map(|_| rng.uniform(0.5, 3.0)).collect();
            times.extend((half..n).map(|_| rng.exponential(2.0).clamp(0.2, 15.0)));
            rng.shuffle(&mut times);
            times
        }
    };

    arrivals
        .into_iter()
        .zip(cook_times)
        .enumerate()
        .map(|(i, (arrival, cook))| Job::new(i as u64 + 1, arrival, cook))
        .collect()
}

/// Bursts of simultaneous arrivals
///
/// `max(1, n/5)` bursts of `max(1, n/bursts)` jobs each, 2-5 units apart.
/// When that falls short of `n`, further bursts follow until it doesn't.
fn arrivals_bursty(rng: &mut RngManager, n: usize) -> Vec<f64> {
    let bursts = (n / 5).max(1);
    let per_burst = (n / bursts).max(1);

    let mut times = Vec::with_capacity(n + per_burst);
    let mut current = 0.0;
    let mut emitted = 0;
    while emitted < bursts || times.len() < n {
        times.extend(std::iter::repeat(current).take(per_burst));
        current += rng.uniform(2.0, 5.0);
        emitted += 1;
    }

    times.truncate(n);
    times
}

/// Cumulative exponential gaps
fn arrivals_poisson(rng: &mut RngManager, rate: f64, n: usize) -> Vec<f64> {
    let mut now = 0.0;
    (0..n)
        .map(|_| {
            now += rng.exponential(1.0 / rate);
            now
        })
        .collect()
}
