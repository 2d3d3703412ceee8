//! Parallel M/M/1 sweep over a λ × μ grid.

use crate::config::Mm1SweepConfig;
use crate::error::SweepError;
use crate::grid::{GridPoint, ParameterGrid};
use crate::worker_pool;
use queuesim_core::logging::{events, simulation_span};
use queuesim_core::{run_mm1_traced, RunConfig};
use queuesim_metrics::{sojourn_confidence_interval, DelaySummary, Mm1Row, ResultTable, SweepRow};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Run every (λ, μ) pair of `config` and collect one row per pair.
///
/// Pairs run on a `rayon` pool. A pair that fails becomes a
/// [`SweepRow::Failed`]; the rest of the grid is unaffected.
pub fn run_mm1_sweep(config: &Mm1SweepConfig) -> Result<ResultTable, SweepError> {
    config.validate()?;
    let grid = ParameterGrid::new()
        .lambdas(config.lambda_values.clone())
        .mus(config.mu_values.clone());

    let span = simulation_span("mm1");
    let _guard = span.enter();
    events::sweep_started("mm1", grid.len(), config.workers);

    let pool = worker_pool(config.workers)?;
    let rows: Vec<(usize, SweepRow)> = pool.install(|| {
        grid.points()
            .into_par_iter()
            .map(|point| (point.index, run_point(config, point)))
            .collect()
    });

    let mut table = ResultTable::new();
    for (index, row) in rows {
        table.insert(index, row);
    }

    let failed = table.failed_count();
    events::sweep_completed("mm1", table.len() - failed, failed);
    Ok(table)
}

/// Run one grid point. Never fails: errors are folded into the row.
pub fn run_point(config: &Mm1SweepConfig, point: GridPoint) -> SweepRow {
    let run = RunConfig {
        lambda: point.lambda,
        mu: point.mu,
        num_events: config.num_events,
        seed: config.seed,
        horizon: config.horizon,
    };
    debug!(index = point.index, lambda = point.lambda, mu = point.mu, "Dispatching pair");

    match run_mm1_traced(&run) {
        Ok((result, trace)) => {
            let sojourn = DelaySummary::from_sojourns(&trace)
                .map_err(|e| warn!(lambda = point.lambda, mu = point.mu, "No sojourn summary: {e}"))
                .ok();
            SweepRow::Completed(Mm1Row {
                result,
                sojourn,
                e_tsys_ci: sojourn_confidence_interval(&trace),
            })
        }
        Err(e) => {
            let reason = e.to_string();
            events::task_failed(point.lambda, point.mu, e.kind(), &reason);
            SweepRow::Failed {
                lambda: point.lambda,
                mu: point.mu,
                kind: e.kind().to_string(),
                reason,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(lambdas: Vec<f64>, mus: Vec<f64>) -> Mm1SweepConfig {
        Mm1SweepConfig {
            lambda_values: lambdas,
            mu_values: mus,
            num_events: 500,
            seed: Some(42),
            horizon: None,
            workers: Some(2),
        }
    }

    #[test]
    fn every_pair_gets_exactly_one_row() {
        let table = run_mm1_sweep(&config(vec![0.5, 1.0, 3.0], vec![1.0, 2.0])).unwrap();
        assert_eq!(table.len(), 6);
        let pairs: Vec<(f64, f64)> = table.rows().map(|r| (r.lambda(), r.mu())).collect();
        assert_eq!(
            pairs,
            vec![(0.5, 1.0), (0.5, 2.0), (1.0, 1.0), (1.0, 2.0), (3.0, 1.0), (3.0, 2.0)]
        );
        assert_eq!(table.failed_count(), 0);
    }

    #[test]
    fn invalid_pair_fails_alone() {
        let table = run_mm1_sweep(&config(vec![0.0, 1.0], vec![2.0])).unwrap();
        let rows: Vec<&SweepRow> = table.rows().collect();
        assert!(matches!(
            rows[0],
            SweepRow::Failed { kind, .. } if kind == "invalid_parameter"
        ));
        assert!(rows[1].is_completed());
    }

    #[test]
    fn completed_rows_carry_delay_statistics() {
        let table = run_mm1_sweep(&config(vec![1.0], vec![2.0])).unwrap();
        let row = table.completed().next().unwrap();
        assert!(row.sojourn.is_some());
        assert!(row.e_tsys_ci.is_some());
        assert_eq!(row.result.seed, 42);
    }

    #[test]
    fn zero_workers_rejected() {
        let mut cfg = config(vec![1.0], vec![2.0]);
        cfg.workers = Some(0);
        assert!(matches!(
            run_mm1_sweep(&cfg),
            Err(SweepError::InvalidConfig(_))
        ));
    }
}
