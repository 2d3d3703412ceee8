//! Error types for the queue simulator

use thiserror::Error;

/// Top-level error type for a single simulation task
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A rate, count or horizon supplied to a task is outside its domain.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The recurrence produced a trace that breaks a queueing invariant.
    ///
    /// This never happens for well-formed inputs and aborts the task.
    #[error("Computation invariant violated: {0}")]
    InvariantViolation(String),

    /// Metrics were requested for a trace with no customers.
    #[error("Metrics undefined: {0}")]
    UndefinedMetrics(String),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Short machine-friendly tag, used in logs and failed table rows.
    pub fn kind(&self) -> &'static str {
        match self {
            SimError::InvalidParameter { .. } => "invalid_parameter",
            SimError::InvariantViolation(_) => "invariant_violation",
            SimError::UndefinedMetrics(_) => "undefined_metrics",
        }
    }
}

/// Validate that `rate` is a usable exponential rate.
pub fn check_rate(name: &'static str, rate: f64) -> Result<f64, SimError> {
    if !rate.is_finite() {
        return Err(SimError::invalid(name, rate, "rate must be finite"));
    }
    if rate <= 0.0 {
        return Err(SimError::invalid(name, rate, "rate must be positive"));
    }
    Ok(rate)
}
