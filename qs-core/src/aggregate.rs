//! Reduction of a queue trace into steady-state estimates, and the closed-form
//! M/M/1 values they are compared against.

use crate::error::SimError;
use crate::logging::diagnostics;
use crate::queue::SimulationTrace;
use serde::{Deserialize, Serialize};

/// Slack allowed on the utilization bound for floating-point rounding.
pub const UTILIZATION_TOLERANCE: f64 = 1e-9;

/// Empirical estimates from one trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalMetrics {
    /// Mean number in system, via Little's law on observed throughput.
    pub e_n: f64,
    /// Mean sojourn time.
    pub e_tsys: f64,
    /// Mean waiting time in queue.
    pub e_tq: f64,
    /// Fraction of the horizon the server was busy.
    pub utilization: f64,
    /// Customers served per unit time over the horizon.
    pub throughput: f64,
}

/// Closed-form M/M/1 steady-state values. Only exist for ρ < 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalMetrics {
    pub rho: f64,
    pub e_n: f64,
    pub e_tsys: f64,
    pub e_tq: f64,
    pub utilization: f64,
}

impl TheoreticalMetrics {
    /// `None` in the critical and unstable regimes (`lambda >= mu`).
    pub fn mm1(lambda: f64, mu: f64) -> Option<Self> {
        if !is_stable(lambda, mu) {
            return None;
        }
        let rho = offered_load(lambda, mu);
        Some(Self {
            rho,
            e_n: rho / (1.0 - rho),
            e_tsys: 1.0 / (mu - lambda),
            e_tq: rho / (mu - lambda),
            utilization: rho,
        })
    }
}

/// ρ = λ/μ
pub fn offered_load(lambda: f64, mu: f64) -> f64 {
    lambda / mu
}

pub fn is_stable(lambda: f64, mu: f64) -> bool {
    mu > lambda
}

/// Reduce a trace to its four reported statistics.
///
/// An empty trace has no defined metrics and is reported as
/// [`SimError::UndefinedMetrics`]. A utilization outside `[0, 1]` means the
/// trace itself is broken and is reported as an invariant violation.
pub fn aggregate(trace: &SimulationTrace) -> Result<EmpiricalMetrics, SimError> {
    if trace.is_empty() {
        return Err(SimError::UndefinedMetrics(
            "trace has no customers".to_string(),
        ));
    }
    let horizon = trace.horizon();
    if horizon.is_nan() || horizon <= 0.0 {
        return Err(SimError::UndefinedMetrics(format!(
            "observation horizon {horizon} is not positive"
        )));
    }

    let n = trace.len() as f64;
    let utilization = trace.busy_time() / horizon;
    if !(-UTILIZATION_TOLERANCE..=1.0 + UTILIZATION_TOLERANCE).contains(&utilization) {
        diagnostics::simulation_inconsistency(
            "utilization",
            "within [0, 1]",
            &format!("{utilization} (busy {} over horizon {horizon})", trace.busy_time()),
        );
        return Err(SimError::InvariantViolation(format!(
            "utilization {utilization} outside [0, 1]"
        )));
    }

    let e_tsys = trace.sojourn_times().sum::<f64>() / n;
    let e_tq = trace.waiting_times().sum::<f64>() / n;
    let throughput = n / horizon;

    Ok(EmpiricalMetrics {
        e_n: throughput * e_tsys,
        e_tsys,
        e_tq,
        utilization,
        throughput,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::simulate_fifo;

    #[test]
    fn hand_computed_metrics() {
        let trace = simulate_fifo(&[1.0, 2.0, 10.0], &[3.0, 1.0, 2.0], None).unwrap();
        let m = aggregate(&trace).unwrap();

        assert_eq!(m.e_tsys, (3.0 + 3.0 + 2.0) / 3.0);
        assert_eq!(m.e_tq, 2.0 / 3.0);
        assert_eq!(m.utilization, 6.0 / 12.0);
        assert_eq!(m.throughput, 3.0 / 12.0);
        assert!((m.e_n - 8.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn empty_trace_is_undefined() {
        let trace = simulate_fifo(&[], &[], None).unwrap();
        assert!(matches!(
            aggregate(&trace),
            Err(SimError::UndefinedMetrics(_))
        ));
    }

    #[test]
    fn theory_for_stable_pair() {
        let t = TheoreticalMetrics::mm1(1.0, 2.0).unwrap();
        assert_eq!(t.rho, 0.5);
        assert_eq!(t.e_n, 1.0);
        assert_eq!(t.e_tsys, 1.0);
        assert_eq!(t.e_tq, 0.5);
        assert_eq!(t.utilization, 0.5);
    }

    #[test]
    fn no_theory_at_or_above_saturation() {
        assert!(TheoreticalMetrics::mm1(2.0, 2.0).is_none());
        assert!(TheoreticalMetrics::mm1(3.0, 1.0).is_none());
        assert!(!is_stable(3.0, 1.0));
        assert_eq!(offered_load(3.0, 1.0), 3.0);
    }
}
