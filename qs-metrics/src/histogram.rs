//! Fixed-edge histograms of event times
//!
//! Bins are either a count of equal-width bins over a range, or explicit edges.
//! A value belongs to bin `i` when `edges[i] <= x < edges[i + 1]`, except that
//! a value equal to the last edge falls in the last bin. Values outside
//! `[edges[0], edges[last]]` are ignored.

use crate::error::MetricsError;
use std::collections::BTreeMap;

/// Most intervals a horizon may be split into.
pub const MAX_INTERVALS: usize = 100_000_000;

/// How bins are laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum Bins {
    /// `count` equal-width bins over `range`, or over the data's min/max when
    /// no range is given.
    Count {
        count: usize,
        range: Option<(f64, f64)>,
    },
    /// Explicit, non-decreasing bin edges.
    Edges(Vec<f64>),
}

impl Default for Bins {
    fn default() -> Self {
        Self::Count {
            count: 10,
            range: None,
        }
    }
}

/// Counts per bin plus the edges they were computed against.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramCounts {
    pub counts: Vec<u64>,
    /// `counts.len() + 1` boundaries.
    pub edges: Vec<f64>,
}

impl HistogramCounts {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Histogram {
    bins: Bins,
}

impl Histogram {
    pub fn new(bins: Bins) -> Self {
        Self { bins }
    }

    pub fn with_edges(edges: Vec<f64>) -> Self {
        Self::new(Bins::Edges(edges))
    }

    pub fn with_bin_count(count: usize, range: Option<(f64, f64)>) -> Self {
        Self::new(Bins::Count { count, range })
    }

    /// Compute counts for `data`.
    pub fn compute(&self, data: &[f64]) -> Result<HistogramCounts, MetricsError> {
        let edges = self.edges_for(data)?;
        let nbins = edges.len() - 1;
        let mut counts = vec![0u64; nbins];

        if nbins == 0 {
            return Ok(HistogramCounts { counts, edges });
        }

        let first = edges[0];
        let last = edges[nbins];
        for &x in data {
            if x.is_nan() || x < first || x > last {
                continue;
            }
            let idx = if x == last {
                nbins - 1
            } else {
                // bisect_right: first edge strictly greater than x
                edges.partition_point(|&edge| edge <= x) - 1
            };
            counts[idx] += 1;
        }

        Ok(HistogramCounts { counts, edges })
    }

    fn edges_for(&self, data: &[f64]) -> Result<Vec<f64>, MetricsError> {
        match &self.bins {
            Bins::Count { count, range } => {
                if *count == 0 {
                    return Err(MetricsError::InvalidBins(
                        "bin count must be at least 1".to_string(),
                    ));
                }
                let (low, high) = match range {
                    Some(range) => *range,
                    None => data_range(data)?,
                };
                if !(low.is_finite() && high.is_finite()) || high < low {
                    return Err(MetricsError::InvalidBins(format!(
                        "range ({low}, {high}) is not a finite, ordered interval"
                    )));
                }
                let width = (high - low) / *count as f64;
                Ok((0..=*count).map(|i| low + i as f64 * width).collect())
            }
            Bins::Edges(edges) => {
                if edges.is_empty() {
                    return Err(MetricsError::InvalidBins(
                        "at least one edge is required".to_string(),
                    ));
                }
                if edges.iter().any(|e| e.is_nan()) || edges.windows(2).any(|w| w[1] < w[0]) {
                    return Err(MetricsError::InvalidBins(
                        "edges must be non-decreasing numbers".to_string(),
                    ));
                }
                Ok(edges.clone())
            }
        }
    }
}

fn data_range(data: &[f64]) -> Result<(f64, f64), MetricsError> {
    let mut values = data.iter().copied().filter(|x| !x.is_nan());
    let first = values.next().ok_or_else(|| {
        MetricsError::InvalidData("cannot infer a bin range from empty data".to_string())
    })?;
    Ok(values.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x))))
}

/// Edges `0, δ, 2δ, …` up to `tmax` rounded up to a whole number of intervals.
///
/// Returns the rounded horizon alongside the edges.
pub fn interval_edges(tmax: f64, delta: f64) -> Result<(f64, Vec<f64>), MetricsError> {
    check_delta(delta)?;
    if !tmax.is_finite() || tmax < 0.0 {
        return Err(MetricsError::InvalidData(format!(
            "horizon {tmax} must be finite and non-negative"
        )));
    }
    let intervals = interval_count((tmax / delta).ceil())?;
    let edges = (0..=intervals).map(|i| i as f64 * delta).collect();
    Ok((intervals as f64 * delta, edges))
}

/// Edges `0, δ, 2δ, …` covering whole intervals up to `horizon`, plus a final
/// partial interval ending exactly at `horizon`.
pub fn truncated_interval_edges(horizon: f64, delta: f64) -> Result<Vec<f64>, MetricsError> {
    check_delta(delta)?;
    if horizon.is_nan() || horizon <= 0.0 {
        return Ok(vec![0.0]);
    }
    let full = interval_count((horizon / delta).floor())?;
    let mut edges: Vec<f64> = (0..=full).map(|i| i as f64 * delta).collect();
    if edges.last().is_some_and(|&last| last < horizon) {
        edges.push(horizon);
    }
    Ok(edges)
}

/// Checked conversion of a `horizon / δ` ratio into an interval count.
pub fn interval_count(ratio: f64) -> Result<usize, MetricsError> {
    if ratio.is_finite() && ratio >= 0.0 && ratio <= MAX_INTERVALS as f64 {
        Ok(ratio as usize)
    } else {
        Err(MetricsError::InvalidBins(format!(
            "{ratio} intervals exceeds the limit of {MAX_INTERVALS}"
        )))
    }
}

fn check_delta(delta: f64) -> Result<(), MetricsError> {
    if delta.is_finite() && delta > 0.0 {
        Ok(())
    } else {
        Err(MetricsError::InvalidBins(format!(
            "bin width {delta} must be positive and finite"
        )))
    }
}

/// How many bins hold each distinct count, keyed by the count.
pub fn value_frequencies(counts: &[u64]) -> BTreeMap<u64, u64> {
    let mut freqs = BTreeMap::new();
    for &count in counts {
        *freqs.entry(count).or_insert(0) += 1;
    }
    freqs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_edges_follow_bisect_right() {
        let hist = Histogram::with_edges(vec![0.0, 1.0, 2.0, 3.0]);
        let out = hist.compute(&[0.0, 0.5, 1.0, 1.999, 2.0, 3.0, -0.1, 3.1]).unwrap();
        // 1.0 goes to the bin starting at 1.0, 3.0 to the last bin.
        assert_eq!(out.counts, vec![2, 2, 2]);
        assert_eq!(out.total(), 6);
    }

    #[test]
    fn bin_count_uses_data_range() {
        let hist = Histogram::with_bin_count(2, None);
        let out = hist.compute(&[1.0, 2.0, 3.0, 5.0]).unwrap();
        assert_eq!(out.edges, vec![1.0, 3.0, 5.0]);
        assert_eq!(out.counts, vec![2, 2]);
    }

    #[test]
    fn bin_count_with_range_ignores_outliers() {
        let hist = Histogram::with_bin_count(4, Some((0.0, 4.0)));
        let out = hist.compute(&[-1.0, 0.5, 1.5, 2.5, 3.5, 4.0, 9.0]).unwrap();
        assert_eq!(out.counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn invalid_bins_are_rejected() {
        assert!(Histogram::with_edges(vec![]).compute(&[1.0]).is_err());
        assert!(Histogram::with_edges(vec![2.0, 1.0]).compute(&[1.0]).is_err());
        assert!(Histogram::with_bin_count(0, None).compute(&[1.0]).is_err());
        assert!(Histogram::default().compute(&[]).is_err());
    }

    #[test]
    fn single_edge_has_no_bins() {
        let out = Histogram::with_edges(vec![0.0]).compute(&[0.0, 1.0]).unwrap();
        assert!(out.counts.is_empty());
    }

    #[test]
    fn interval_edges_round_up() {
        let (tmax, edges) = interval_edges(4.2, 1.0).unwrap();
        assert_eq!(tmax, 5.0);
        assert_eq!(edges, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        let (tmax, edges) = interval_edges(4.0, 2.0).unwrap();
        assert_eq!(tmax, 4.0);
        assert_eq!(edges, vec![0.0, 2.0, 4.0]);

        assert!(interval_edges(4.0, 0.0).is_err());
    }

    #[test]
    fn truncated_edges_end_at_horizon() {
        assert_eq!(
            truncated_interval_edges(2.5, 1.0).unwrap(),
            vec![0.0, 1.0, 2.0, 2.5]
        );
        assert_eq!(truncated_interval_edges(2.0, 1.0).unwrap(), vec![0.0, 1.0, 2.0]);
        assert_eq!(truncated_interval_edges(0.0, 1.0).unwrap(), vec![0.0]);
    }

    #[test]
    fn oversized_interval_counts_are_rejected() {
        assert!(matches!(
            interval_edges(1e15, 1e-6),
            Err(MetricsError::InvalidBins(_))
        ));
        assert!(matches!(
            truncated_interval_edges(1e15, 1e-6),
            Err(MetricsError::InvalidBins(_))
        ));
        assert!(interval_edges(1.0, 1e-300).is_err());
        assert_eq!(interval_count(MAX_INTERVALS as f64).unwrap(), MAX_INTERVALS);
        assert!(interval_count(MAX_INTERVALS as f64 + 1.0).is_err());
        assert!(interval_count(f64::NAN).is_err());
    }

    #[test]
    fn frequencies_group_equal_counts() {
        let freqs = value_frequencies(&[0, 2, 2, 1, 2]);
        assert_eq!(freqs.into_iter().collect::<Vec<_>>(), vec![(0, 1), (1, 1), (2, 3)]);
    }
}
