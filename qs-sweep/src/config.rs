//! Command-line definition and the sweep configurations it produces.

use clap::{Args, Parser, Subcommand};
use queuesim_core::error::check_rate;
use queuesim_metrics::MAX_INTERVALS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::SweepError;

/// M/M/1 queue and Poisson process simulation sweeps
#[derive(Debug, Parser)]
#[command(name = "queuesim", version, about = "M/M/1 queue and Poisson process simulation sweeps")]
pub struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sweep λ and μ and compare queue statistics with M/M/1 theory
    Mm1(Mm1Args),

    /// Simulate Poisson processes and compare interval counts with the Poisson pmf
    Poisson(PoissonArgs),
}

#[derive(Debug, Args)]
pub struct Mm1Args {
    /// Arrival rates λ to test
    #[arg(short = 'l', long = "lambda-values", num_args = 1.., required = true)]
    pub lambda_values: Vec<f64>,

    /// Service rates μ to test
    #[arg(short = 'm', long = "mu-values", num_args = 1.., required = true)]
    pub mu_values: Vec<f64>,

    /// Number of customers to simulate per pair
    #[arg(short = 'n', long)]
    pub num_events: usize,

    /// Seed shared by every pair; drawn from entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fixed observation horizon (the last departure is used when later)
    #[arg(long)]
    pub horizon: Option<f64>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Write the result table as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the result table as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Directory for the sojourn-time chart
    #[arg(long)]
    pub plot_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PoissonArgs {
    /// One or more rate (λ) values
    #[arg(long, num_args = 1.., required = true)]
    pub rates: Vec<f64>,

    /// One or more numbers of events to simulate per rate
    #[arg(long, num_args = 1.., required = true)]
    pub num_events: Vec<usize>,

    /// Fixed time horizon (the last event time, rounded up, when omitted)
    #[arg(long)]
    pub tmax: Option<f64>,

    /// Width of each histogram interval
    #[arg(long, default_value_t = 1.0)]
    pub delta: f64,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Save count-distribution charts instead of printing results
    #[arg(long)]
    pub save_plots: bool,

    /// Output directory for saved charts
    #[arg(long, default_value = "histograms")]
    pub output_dir: PathBuf,

    /// Merge all rates into one process per event count instead of
    /// analysing each rate on its own
    #[arg(long)]
    pub superimpose: bool,

    /// Sweep seed; drawn from entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Configuration of an M/M/1 sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mm1SweepConfig {
    pub lambda_values: Vec<f64>,
    pub mu_values: Vec<f64>,
    pub num_events: usize,
    pub seed: Option<u64>,
    pub horizon: Option<f64>,
    pub workers: Option<usize>,
}

impl Mm1SweepConfig {
    /// Checks what concerns the sweep as a whole. Bad rates and event counts
    /// are left to the individual runs, which report them as failed rows.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.lambda_values.is_empty() || self.mu_values.is_empty() {
            return Err(SweepError::InvalidConfig(
                "at least one λ and one μ value are required".to_string(),
            ));
        }
        check_workers(self.workers)
    }
}

impl From<&Mm1Args> for Mm1SweepConfig {
    fn from(args: &Mm1Args) -> Self {
        Self {
            lambda_values: args.lambda_values.clone(),
            mu_values: args.mu_values.clone(),
            num_events: args.num_events,
            seed: args.seed,
            horizon: args.horizon,
            workers: args.workers,
        }
    }
}

/// Configuration of a Poisson process sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoissonSweepConfig {
    pub rates: Vec<f64>,
    pub num_events: Vec<usize>,
    pub tmax: Option<f64>,
    pub delta: f64,
    pub workers: Option<usize>,
    pub superimpose: bool,
    pub seed: Option<u64>,
}

impl Default for PoissonSweepConfig {
    fn default() -> Self {
        Self {
            rates: Vec::new(),
            num_events: Vec::new(),
            tmax: None,
            delta: 1.0,
            workers: None,
            superimpose: false,
            seed: None,
        }
    }
}

impl PoissonSweepConfig {
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.rates.is_empty() || self.num_events.is_empty() {
            return Err(SweepError::InvalidConfig(
                "at least one rate and one event count are required".to_string(),
            ));
        }
        for &rate in &self.rates {
            check_rate("rate", rate)?;
        }
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(SweepError::InvalidConfig(format!(
                "interval width {} must be positive and finite",
                self.delta
            )));
        }
        if let Some(tmax) = self.tmax {
            if !tmax.is_finite() || tmax < 0.0 {
                return Err(SweepError::InvalidConfig(format!(
                    "tmax {tmax} must be finite and non-negative"
                )));
            }
            if (tmax / self.delta).ceil() > MAX_INTERVALS as f64 {
                return Err(SweepError::InvalidConfig(format!(
                    "tmax {tmax} with interval width {} needs more than {MAX_INTERVALS} intervals",
                    self.delta
                )));
            }
        }
        check_workers(self.workers)
    }
}

impl From<&PoissonArgs> for PoissonSweepConfig {
    fn from(args: &PoissonArgs) -> Self {
        Self {
            rates: args.rates.clone(),
            num_events: args.num_events.clone(),
            tmax: args.tmax,
            delta: args.delta,
            workers: args.workers,
            superimpose: args.superimpose,
            seed: args.seed,
        }
    }
}

fn check_workers(workers: Option<usize>) -> Result<(), SweepError> {
    match workers {
        Some(0) => Err(SweepError::InvalidConfig(
            "worker count must be at least 1".to_string(),
        )),
        _ => Ok(()),
    }
}
