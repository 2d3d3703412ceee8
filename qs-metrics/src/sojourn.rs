//! Delay distribution summaries for a single run.
//!
//! Percentiles come from an auto-resizing HDR histogram. Times are recorded in
//! millionths of the simulation time unit, which keeps three significant digits
//! for anything from a microsecond-scale wait up to very long sojourns.

use crate::error::MetricsError;
use crate::stats::{batch_means, BatchMeansEstimate};
use hdrhistogram::Histogram as HdrHistogram;
use queuesim_core::SimulationTrace;
use serde::Serialize;

/// Recording resolution: one histogram unit is `1 / UNIT_SCALE` time units.
pub const UNIT_SCALE: f64 = 1e6;

/// Batches used for the E\[T_sys\] confidence interval.
pub const DEFAULT_BATCHES: usize = 20;

pub const DEFAULT_CONFIDENCE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DelaySummary {
    pub count: u64,
    /// Exact sample mean (not the histogram's bucketed mean).
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    /// Exact sample maximum.
    pub max: f64,
}

impl DelaySummary {
    /// Summarize non-negative delays.
    pub fn from_samples<I>(samples: I) -> Result<Self, MetricsError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut hist = HdrHistogram::<u64>::new(3)
            .map_err(|e| MetricsError::Histogram(format!("Failed to create histogram: {e}")))?;
        let mut sum = 0.0;
        let mut max = 0.0f64;

        for x in samples {
            if !x.is_finite() || x < 0.0 {
                return Err(MetricsError::InvalidData(format!(
                    "delay {x} is not a finite, non-negative time"
                )));
            }
            hist.record((x * UNIT_SCALE).round() as u64)
                .map_err(|e| MetricsError::Histogram(format!("Failed to record {x}: {e}")))?;
            sum += x;
            max = max.max(x);
        }

        let count = hist.len();
        if count == 0 {
            return Err(MetricsError::InvalidData(
                "cannot summarize an empty delay sample".to_string(),
            ));
        }

        let quantile = |q: f64| hist.value_at_quantile(q) as f64 / UNIT_SCALE;
        Ok(Self {
            count,
            mean: sum / count as f64,
            p50: quantile(0.5),
            p95: quantile(0.95),
            p99: quantile(0.99),
            max,
        })
    }

    /// Sojourn times (time in system) of every customer in `trace`.
    pub fn from_sojourns(trace: &SimulationTrace) -> Result<Self, MetricsError> {
        Self::from_samples(trace.sojourn_times())
    }

    /// Waiting times (time in queue) of every customer in `trace`.
    pub fn from_waits(trace: &SimulationTrace) -> Result<Self, MetricsError> {
        Self::from_samples(trace.waiting_times())
    }
}

/// Batch-means confidence interval for E\[T_sys\].
///
/// `None` when the trace is too short to form [`DEFAULT_BATCHES`] batches.
pub fn sojourn_confidence_interval(trace: &SimulationTrace) -> Option<BatchMeansEstimate> {
    let sojourns: Vec<f64> = trace.sojourn_times().collect();
    batch_means(&sojourns, DEFAULT_BATCHES, DEFAULT_CONFIDENCE)
}
