//! One M/M/1 run: parameters in, metrics out.
//!
//! A task is a pure function of its [`RunConfig`]. It owns its generators, so
//! any number of tasks can run side by side without coordination.

use crate::aggregate::{aggregate, is_stable, offered_load, EmpiricalMetrics, TheoreticalMetrics};
use crate::dists::{ExponentialServiceTime, PoissonArrivals};
use crate::error::{check_rate, SimError};
use crate::logging;
use crate::queue::{simulate_fifo, SimulationTrace};
use crate::randomness::{self, ARRIVALS, SERVICE};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Input of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub lambda: f64,
    pub mu: f64,
    pub num_events: usize,
    /// `None` runs with a fresh entropy seed (recorded in the result).
    pub seed: Option<u64>,
    /// Optional fixed observation horizon; the trace horizon is the later of
    /// this and the last departure.
    pub horizon: Option<f64>,
}

impl RunConfig {
    pub fn new(lambda: f64, mu: f64, num_events: usize) -> Self {
        Self {
            lambda,
            mu,
            num_events,
            seed: None,
            horizon: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = Some(horizon);
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        check_rate("lambda", self.lambda)?;
        check_rate("mu", self.mu)?;
        if self.num_events < 1 {
            return Err(SimError::InvalidParameter {
                name: "num_events",
                value: self.num_events as f64,
                reason: "at least one customer is required",
            });
        }
        if let Some(horizon) = self.horizon {
            if !horizon.is_finite() || horizon < 0.0 {
                return Err(SimError::InvalidParameter {
                    name: "horizon",
                    value: horizon,
                    reason: "horizon must be finite and non-negative",
                });
            }
        }
        Ok(())
    }

    pub fn offered_load(&self) -> f64 {
        offered_load(self.lambda, self.mu)
    }

    pub fn is_stable(&self) -> bool {
        is_stable(self.lambda, self.mu)
    }
}

/// Output of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub lambda: f64,
    pub mu: f64,
    /// Seed the task actually ran with.
    pub seed: u64,
    pub num_events: usize,
    pub e_n: f64,
    pub e_tsys: f64,
    pub e_tq: f64,
    pub utilization: f64,
    pub throughput: f64,
    /// `mu > lambda`
    pub stable: bool,
    /// Closed-form comparison, present only when `stable`.
    pub theory: Option<TheoreticalMetrics>,
}

impl RunResult {
    fn new(config: &RunConfig, seed: u64, metrics: EmpiricalMetrics) -> Self {
        Self {
            lambda: config.lambda,
            mu: config.mu,
            seed,
            num_events: config.num_events,
            e_n: metrics.e_n,
            e_tsys: metrics.e_tsys,
            e_tq: metrics.e_tq,
            utilization: metrics.utilization,
            throughput: metrics.throughput,
            stable: config.is_stable(),
            theory: TheoreticalMetrics::mm1(config.lambda, config.mu),
        }
    }

    pub fn offered_load(&self) -> f64 {
        offered_load(self.lambda, self.mu)
    }
}

/// Generate the arrival and service sequences of a task.
pub fn generate_inputs(config: &RunConfig, seed: u64) -> Result<(Vec<f64>, Vec<f64>), SimError> {
    let arrivals =
        PoissonArrivals::for_stream(config.lambda, seed, ARRIVALS)?.arrival_times(config.num_events);
    let services =
        ExponentialServiceTime::for_stream(config.mu, seed, SERVICE)?.durations(config.num_events);
    Ok((arrivals, services))
}

/// Run a task and keep its trace for further analysis.
pub fn run_mm1_traced(config: &RunConfig) -> Result<(RunResult, SimulationTrace), SimError> {
    config.validate()?;
    let seed = randomness::resolve_seed(config.seed);
    let span = logging::run_span(config.lambda, config.mu, seed);
    let _guard = span.enter();

    let (arrivals, services) = generate_inputs(config, seed)?;
    let trace = simulate_fifo(&arrivals, &services, config.horizon)?;
    let metrics = aggregate(&trace)?;

    if !config.is_stable() {
        warn!(
            rho = config.offered_load(),
            "Offered load at or above 1, theoretical comparison suppressed"
        );
    }
    info!(
        e_n = metrics.e_n,
        e_tsys = metrics.e_tsys,
        e_tq = metrics.e_tq,
        utilization = metrics.utilization,
        "Run completed"
    );

    Ok((RunResult::new(config, seed, metrics), trace))
}

/// Run a task.
pub fn run_mm1(config: &RunConfig) -> Result<RunResult, SimError> {
    run_mm1_traced(config).map(|(result, _)| result)
}
