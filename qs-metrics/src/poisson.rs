//! Interval counts of a Poisson process, and how they compare with the
//! Poisson distribution of the same mean.

use crate::error::MetricsError;
use crate::histogram::{interval_edges, truncated_interval_edges, value_frequencies, Histogram};
use crate::stats::poisson_pmf;
use serde::Serialize;
use std::fmt;

/// Events per interval for one simulated process (or superposition).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoissonResult {
    pub rate: f64,
    /// Number of events the counts were taken from.
    pub num_events: usize,
    /// Right end of the last interval.
    pub tmax: f64,
    pub delta: f64,
    /// How many independent processes were merged; 1 for a single process.
    pub processes: usize,
    pub counts: Vec<u64>,
    pub edges: Vec<f64>,
}

/// Observed and expected number of intervals holding exactly `count` events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountFrequency {
    pub count: u64,
    pub observed: u64,
    pub expected: f64,
}

impl PoissonResult {
    /// Bin the event times of one process into intervals of width `delta`.
    ///
    /// The horizon is `tmax` when given, otherwise the last event time, rounded
    /// up to a whole number of intervals.
    pub fn from_events(
        rate: f64,
        events: &[f64],
        tmax: Option<f64>,
        delta: f64,
    ) -> Result<Self, MetricsError> {
        let horizon = tmax.unwrap_or_else(|| events.last().copied().unwrap_or(0.0));
        let (tmax, edges) = interval_edges(horizon, delta)?;
        let counts = Histogram::with_edges(edges).compute(events)?;
        Ok(Self {
            rate,
            num_events: events.len(),
            tmax,
            delta,
            processes: 1,
            counts: counts.counts,
            edges: counts.edges,
        })
    }

    /// Merge independent processes observed over a common horizon.
    ///
    /// The horizon is the earliest final event time among the processes, capped
    /// by `tmax`. Each process is truncated to the horizon before merging, so
    /// no process contributes events from a stretch where another is silent.
    /// The merged process has rate `Σ rates`.
    pub fn superposed(
        rates: &[f64],
        processes: &[Vec<f64>],
        tmax: Option<f64>,
        delta: f64,
    ) -> Result<Self, MetricsError> {
        if rates.len() != processes.len() || processes.is_empty() {
            return Err(MetricsError::InvalidData(format!(
                "{} rates for {} processes",
                rates.len(),
                processes.len()
            )));
        }

        let mut horizon = processes
            .iter()
            .map(|events| events.last().copied().unwrap_or(0.0))
            .fold(f64::INFINITY, f64::min);
        if let Some(tmax) = tmax {
            horizon = horizon.min(tmax);
        }

        let mut merged: Vec<f64> = processes
            .iter()
            .flat_map(|events| events.iter().copied().filter(|&t| t <= horizon))
            .collect();
        merged.sort_by(f64::total_cmp);

        let edges = truncated_interval_edges(horizon, delta)?;
        let counts = Histogram::with_edges(edges).compute(&merged)?;
        Ok(Self {
            rate: rates.iter().sum(),
            num_events: merged.len(),
            tmax: horizon.max(0.0),
            delta,
            processes: processes.len(),
            counts: counts.counts,
            edges: counts.edges,
        })
    }

    pub fn num_intervals(&self) -> usize {
        self.counts.len()
    }

    /// Mean of a count under the Poisson model, `rate · δ`.
    pub fn expected_mean(&self) -> f64 {
        self.rate * self.delta
    }

    pub fn mean_count(&self) -> f64 {
        if self.counts.is_empty() {
            return 0.0;
        }
        self.counts.iter().sum::<u64>() as f64 / self.counts.len() as f64
    }

    /// Frequencies for every count from 0 to the largest observed count.
    pub fn count_distribution(&self) -> Vec<CountFrequency> {
        let observed = value_frequencies(&self.counts);
        let Some(&max_count) = observed.keys().next_back() else {
            return Vec::new();
        };
        let intervals = self.num_intervals() as f64;
        let mean = self.expected_mean();
        (0..=max_count)
            .map(|count| CountFrequency {
                count,
                observed: observed.get(&count).copied().unwrap_or(0),
                expected: intervals * poisson_pmf(count, mean),
            })
            .collect()
    }
}

impl fmt::Display for PoissonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rate={} N={} tmax={:.2} intervals={} mean count={:.3} (Poisson mean {:.3})",
            self.rate,
            self.num_events,
            self.tmax,
            self.num_intervals(),
            self.mean_count(),
            self.expected_mean()
        )
    }
}
