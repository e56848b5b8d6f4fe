//! Command-line front end: runs the scenario matrix and prints JSON.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use ratatouille_core_rs::scenarios::{self, Scenario, VariantOutcome};
use ratatouille_core_rs::{job_records, Event, ExperimentRow, JobRecord};
use serde::Serialize;

/// Compare FCFS and SJF scheduling, with and without a stove semaphore,
/// across preset kitchen workloads.
#[derive(Debug, Parser)]
#[clap(name = "ratatouille", version)]
struct Opts {
    /// Number of chefs (scheduler pops per round).
    #[clap(short = 'w', long, default_value = "4")]
    workers: usize,

    /// Scenario to run (bursty, poisson, mix, stress). Repeat to run several;
    /// all four run when omitted.
    #[clap(short = 's', long = "scenario")]
    scenarios: Vec<String>,

    /// Override the preset workload seed.
    #[clap(long)]
    seed: Option<u64>,

    /// Include per-job rows for every run.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    jobs: bool,

    /// Include the event log of every run.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    events: bool,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct RunReport {
    #[serde(flatten)]
    row: ExperimentRow,
    digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    jobs: Option<Vec<JobRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<Event>>,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn select_scenarios(opts: &Opts) -> Result<Vec<Scenario>> {
    let mut selected = if opts.scenarios.is_empty() {
        scenarios::presets()
    } else {
        let mut picked = Vec::with_capacity(opts.scenarios.len());
        for name in &opts.scenarios {
            match scenarios::preset(name) {
                Some(scenario) => picked.push(scenario),
                None => bail!(
                    "unknown scenario {:?} (expected bursty, poisson, mix or stress)",
                    name
                ),
            }
        }
        picked
    };

    if let Some(seed) = opts.seed {
        for scenario in &mut selected {
            scenario.workload = scenario.workload.with_seed(seed);
        }
    }

    Ok(selected)
}

fn report(outcome: VariantOutcome, opts: &Opts) -> Result<RunReport> {
    let digest = outcome
        .result
        .digest()
        .with_context(|| format!("digest of {}/{}", outcome.row.scenario, outcome.row.variant))?;

    Ok(RunReport {
        jobs: opts.jobs.then(|| job_records(&outcome.result.jobs)),
        events: opts.events.then(|| outcome.result.events.clone()),
        row: outcome.row,
        digest,
    })
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logger(opts.verbose);

    if opts.workers == 0 {
        bail!("--workers must be at least 1");
    }

    let selected = select_scenarios(&opts)?;
    info!(
        "running {} scenario(s) x {} variants with {} chef(s)",
        selected.len(),
        scenarios::VARIANTS.len(),
        opts.workers
    );

    let outcomes =
        scenarios::run_matrix(&selected, opts.workers).context("simulation failed")?;
    let reports = outcomes
        .into_iter()
        .map(|outcome| report(outcome, &opts))
        .collect::<Result<Vec<_>>>()?;

    let json = serde_json::to_string_pretty(&reports).context("failed to encode report")?;
    println!("{}", json);
    Ok(())
}
