//! Parallel Poisson process sweep over rates × event counts, or, in
//! superposition mode, one merged process of all rates per event count.
//!
//! Process `(rate_i, N_j)` draws from stream `PROCESS.indexed(k)` where `k` is
//! its grid index. The superposition for `N_j` reuses exactly those streams, so
//! it merges the same sample paths the single-process results were built from.

use crate::config::PoissonSweepConfig;
use crate::error::SweepError;
use crate::grid::{cross, cross_index};
use crate::worker_pool;
use queuesim_core::logging::{events, process_span, simulation_span};
use queuesim_core::randomness::{resolve_seed, PROCESS};
use queuesim_core::PoissonArrivals;
use queuesim_metrics::PoissonResult;
use rayon::prelude::*;
use tracing::{debug, info};

/// Everything a Poisson sweep produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonSweepOutput {
    /// Seed the sweep ran with.
    pub seed: u64,
    /// One result per (rate, N), rate-major. Empty in superposition mode.
    pub results: Vec<PoissonResult>,
    /// One merged result per N in superposition mode, otherwise empty.
    pub superposed: Vec<PoissonResult>,
}

impl PoissonSweepOutput {
    pub fn all(&self) -> impl Iterator<Item = &PoissonResult> {
        self.results.iter().chain(self.superposed.iter())
    }
}

/// Event times of the process at grid position `index`.
pub fn simulate_process(
    rate: f64,
    num_events: usize,
    seed: u64,
    index: usize,
) -> Result<Vec<f64>, SweepError> {
    let span = process_span(rate, num_events);
    let _guard = span.enter();
    let mut process = PoissonArrivals::for_stream(rate, seed, PROCESS.indexed(index as u64))?;
    let events = process.arrival_times(num_events);
    debug!(last_event = events.last().copied(), "Process simulated");
    Ok(events)
}

/// Simulate one process and count its events per interval.
pub fn run_one(
    config: &PoissonSweepConfig,
    rate: f64,
    num_events: usize,
    seed: u64,
    index: usize,
) -> Result<PoissonResult, SweepError> {
    let events = simulate_process(rate, num_events, seed, index)?;
    Ok(PoissonResult::from_events(
        rate,
        &events,
        config.tmax,
        config.delta,
    )?)
}

/// Merge one process per rate, all with `num_events` events.
///
/// `n_index` is the position of `num_events` in the configured list.
pub fn run_superposition(
    config: &PoissonSweepConfig,
    num_events: usize,
    n_index: usize,
    seed: u64,
) -> Result<PoissonResult, SweepError> {
    let processes = config
        .rates
        .iter()
        .enumerate()
        .map(|(rate_index, &rate)| {
            let index = cross_index(rate_index, n_index, config.num_events.len());
            simulate_process(rate, num_events, seed, index)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PoissonResult::superposed(
        &config.rates,
        &processes,
        config.tmax,
        config.delta,
    )?)
}

/// Run the whole sweep.
pub fn run_poisson_sweep(config: &PoissonSweepConfig) -> Result<PoissonSweepOutput, SweepError> {
    config.validate()?;
    let seed = resolve_seed(config.seed);

    let span = simulation_span("poisson");
    let _guard = span.enter();
    let tasks = if config.superimpose {
        config.num_events.len()
    } else {
        config.rates.len() * config.num_events.len()
    };
    events::sweep_started("poisson", tasks, config.workers);
    info!(seed, superimpose = config.superimpose, "Poisson sweep seed");

    let pool = worker_pool(config.workers)?;
    let (results, superposed) = pool.install(|| {
        if config.superimpose {
            let superposed = config
                .num_events
                .par_iter()
                .enumerate()
                .map(|(n_index, &n)| run_superposition(config, n, n_index, seed))
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, SweepError>((Vec::new(), superposed))
        } else {
            let grid: Vec<(usize, f64, usize)> = cross(&config.rates, &config.num_events).collect();
            let results = grid
                .par_iter()
                .map(|&(index, rate, n)| run_one(config, rate, n, seed, index))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((results, Vec::new()))
        }
    })?;

    events::sweep_completed("poisson", results.len() + superposed.len(), 0);
    Ok(PoissonSweepOutput {
        seed,
        results,
        superposed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuesim_metrics::MetricsError;

    fn config() -> PoissonSweepConfig {
        PoissonSweepConfig {
            rates: vec![1.0, 4.0],
            num_events: vec![50, 200],
            seed: Some(7),
            workers: Some(2),
            ..Default::default()
        }
    }

    #[test]
    fn results_follow_rate_major_order() {
        let out = run_poisson_sweep(&config()).unwrap();
        let keys: Vec<(f64, usize)> = out.results.iter().map(|r| (r.rate, r.num_events)).collect();
        assert_eq!(keys, vec![(1.0, 50), (1.0, 200), (4.0, 50), (4.0, 200)]);
        assert!(out.superposed.is_empty());
        assert_eq!(out.seed, 7);
    }

    #[test]
    fn tmax_is_rounded_up_to_whole_intervals() {
        let cfg = PoissonSweepConfig {
            delta: 0.5,
            ..config()
        };
        for r in run_poisson_sweep(&cfg).unwrap().results {
            let intervals = r.tmax / 0.5;
            assert_eq!(intervals, intervals.round());
            assert_eq!(r.num_intervals() as f64, intervals);
            assert_eq!(r.counts.iter().sum::<u64>() as usize, r.num_events);
        }
    }

    #[test]
    fn fixed_tmax_truncates_counts() {
        let cfg = PoissonSweepConfig {
            tmax: Some(10.0),
            ..config()
        };
        for r in run_poisson_sweep(&cfg).unwrap().results {
            assert_eq!(r.tmax, 10.0);
            assert_eq!(r.num_intervals(), 10);
            assert!(r.counts.iter().sum::<u64>() as usize <= r.num_events);
        }
    }

    #[test]
    fn superposition_reuses_component_paths() {
        let cfg = PoissonSweepConfig {
            superimpose: true,
            ..config()
        };
        let out = run_poisson_sweep(&cfg).unwrap();
        assert!(out.results.is_empty());
        assert_eq!(out.superposed.len(), 2);

        let merged = &out.superposed[0];
        assert_eq!(merged.rate, 5.0);
        assert_eq!(merged.processes, 2);

        let slow = simulate_process(1.0, 50, 7, 0).unwrap();
        let fast = simulate_process(4.0, 50, 7, 2).unwrap();
        let horizon = slow.last().unwrap().min(*fast.last().unwrap());
        assert_eq!(merged.tmax, horizon);
        let expected = slow.iter().chain(fast.iter()).filter(|&&t| t <= horizon).count();
        assert_eq!(merged.num_events, expected);
        assert_eq!(out.all().count(), 2);
    }

    #[test]
    fn same_seed_same_output() {
        assert_eq!(
            run_poisson_sweep(&config()).unwrap(),
            run_poisson_sweep(&config()).unwrap()
        );
    }

    #[test]
    fn interval_width_too_fine_for_the_horizon_fails_the_sweep() {
        let cfg = PoissonSweepConfig {
            delta: 1e-7,
            ..config()
        };
        assert!(matches!(
            run_poisson_sweep(&cfg),
            Err(SweepError::Metrics(MetricsError::InvalidBins(_)))
        ));

        let cfg = PoissonSweepConfig {
            tmax: Some(1e15),
            delta: 1e-6,
            ..config()
        };
        assert!(matches!(
            run_poisson_sweep(&cfg),
            Err(SweepError::InvalidConfig(_))
        ));
    }

    #[test]
    fn invalid_rate_fails_the_sweep() {
        let cfg = PoissonSweepConfig {
            rates: vec![1.0, 0.0],
            ..config()
        };
        assert!(matches!(
            run_poisson_sweep(&cfg),
            Err(SweepError::Simulation(_))
        ));
    }
}
