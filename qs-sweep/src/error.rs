//! Error types for sweeps

use queuesim_core::SimError;
use queuesim_metrics::MetricsError;
use thiserror::Error;

/// Errors that stop a sweep as a whole.
///
/// A failing (λ, μ) pair of an M/M/1 sweep is not one of these: it becomes a
/// failed row and its siblings still run.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Invalid sweep configuration: {0}")]
    InvalidConfig(String),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
