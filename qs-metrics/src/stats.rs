//! Summary statistics for simulation output.
//!
//! Steady-state estimates from one long run are autocorrelated, so confidence
//! intervals are built from batch means rather than from the raw samples.

use serde::Serialize;

// Acklam's rational approximation of the normal quantile.
const A: [f64; 6] = [
    -3.969_683_028_665_376e+01,
    2.209_460_984_245_205e+02,
    -2.759_285_104_469_687e+02,
    1.383_577_518_672_690e+02,
    -3.066_479_806_614_716e+01,
    2.506_628_277_459_239e+00,
];
const B: [f64; 6] = [
    -5.447_609_879_822_406e+01,
    1.615_858_368_580_409e+02,
    -1.556_989_798_598_866e+02,
    6.680_131_188_771_972e+01,
    -1.328_068_155_288_572e+01,
    1.0,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-03,
    -3.223_964_580_411_365e-01,
    -2.400_758_277_161_838e+00,
    -2.549_732_539_343_734e+00,
    4.374_664_141_464_968e+00,
    2.938_163_982_698_783e+00,
];
const D: [f64; 5] = [
    7.784_695_709_041_462e-03,
    3.224_671_290_700_398e-01,
    2.445_134_137_142_996e+00,
    3.754_408_661_907_416e+00,
    1.0,
];
const TAIL: f64 = 0.02425;

/// Horner evaluation, highest-order coefficient first.
fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Quantile of the standard normal distribution.
///
/// # Panics
/// Panics if `p` is not in `(0, 1)`.
pub fn inv_norm_cdf(p: f64) -> f64 {
    assert!(p > 0.0 && p < 1.0, "p must be in (0, 1)");

    let tail = |p: f64| {
        let q = (-2.0 * p.ln()).sqrt();
        horner(&C, q) / horner(&D, q)
    };
    if p < TAIL {
        tail(p)
    } else if p > 1.0 - TAIL {
        -tail(1.0 - p)
    } else {
        let q = p - 0.5;
        let r = q * q;
        q * horner(&A, r) / horner(&B, r)
    }
}

/// Two-sided normal critical value, e.g. ~1.96 for `0.95`.
pub fn z_for_confidence(confidence: f64) -> f64 {
    assert!(
        confidence > 0.0 && confidence < 1.0,
        "confidence must be in (0, 1)"
    );
    inv_norm_cdf(0.5 + confidence / 2.0)
}

/// Steady-state mean of a correlated series with a normal-approximation
/// interval over its batch means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchMeansEstimate {
    pub batches: usize,
    pub batch_size: usize,
    pub mean: f64,
    pub std_err: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

impl BatchMeansEstimate {
    pub fn half_width(&self) -> f64 {
        (self.ci_high - self.ci_low) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.ci_low..=self.ci_high).contains(&value)
    }
}

/// Split `samples` into `batches` equal consecutive batches and estimate the
/// mean from the batch means. Trailing samples that do not fill a batch are
/// dropped.
///
/// Returns `None` with fewer than two batches or fewer samples than batches.
pub fn batch_means(samples: &[f64], batches: usize, confidence: f64) -> Option<BatchMeansEstimate> {
    if batches < 2 {
        return None;
    }
    let batch_size = samples.len() / batches;
    if batch_size == 0 {
        return None;
    }

    let means: Vec<f64> = samples
        .chunks_exact(batch_size)
        .take(batches)
        .map(|batch| batch.iter().sum::<f64>() / batch_size as f64)
        .collect();
    let overall = mean(&means)?;
    let std_err = (sample_variance(&means)? / batches as f64).sqrt();
    let margin = z_for_confidence(confidence) * std_err;

    Some(BatchMeansEstimate {
        batches,
        batch_size,
        mean: overall,
        std_err,
        ci_low: overall - margin,
        ci_high: overall + margin,
    })
}

pub fn mean(xs: &[f64]) -> Option<f64> {
    (!xs.is_empty()).then(|| xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Unbiased (n − 1) sample variance.
pub fn sample_variance(xs: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }
    let m = mean(xs)?;
    let squares: f64 = xs.iter().map(|&x| (x - m) * (x - m)).sum();
    Some(squares / (xs.len() - 1) as f64)
}

/// Poisson probability mass `P(K = k)` for mean `mean`.
///
/// Evaluated in log space so large `k` does not overflow.
pub fn poisson_pmf(k: u64, mean: f64) -> f64 {
    if mean <= 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    let ln_k_factorial: f64 = (2..=k).map(|i| (i as f64).ln()).sum();
    (k as f64 * mean.ln() - mean - ln_k_factorial).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_for_95_percent() {
        assert!((z_for_confidence(0.95) - 1.959_964).abs() < 1e-4);
        assert!((z_for_confidence(0.99) - 2.575_829).abs() < 1e-4);
        assert!(inv_norm_cdf(0.5).abs() < 1e-12);
    }

    #[test]
    fn quantile_is_antisymmetric_in_the_tails() {
        for p in [0.001, 0.01, 0.3] {
            assert!((inv_norm_cdf(p) + inv_norm_cdf(1.0 - p)).abs() < 1e-9);
        }
        assert!((inv_norm_cdf(0.001) + 3.090_232).abs() < 1e-4);
    }

    #[test]
    fn mean_and_variance() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(sample_variance(&[1.0]), None);
        assert_eq!(sample_variance(&[1.0, 2.0, 3.0]), Some(1.0));
    }

    #[test]
    fn batch_means_of_constant_series_has_zero_width() {
        let samples = vec![4.0; 100];
        let est = batch_means(&samples, 10, 0.95).unwrap();
        assert_eq!(est.batches, 10);
        assert_eq!(est.batch_size, 10);
        assert_eq!(est.mean, 4.0);
        assert_eq!(est.std_err, 0.0);
        assert_eq!((est.ci_low, est.ci_high), (4.0, 4.0));
    }

    #[test]
    fn batch_means_brackets_the_mean() {
        let samples: Vec<f64> = (0..1_000).map(|i| (i % 7) as f64).collect();
        let est = batch_means(&samples, 20, 0.95).unwrap();
        assert!(est.contains(est.mean));
        assert!(est.half_width() > 0.0);
    }

    #[test]
    fn leftover_samples_are_dropped() {
        let mut samples = vec![1.0; 20];
        samples.extend([100.0; 3]);
        let est = batch_means(&samples, 4, 0.95).unwrap();
        assert_eq!(est.batch_size, 5);
        assert_eq!(est.mean, 1.0);
    }

    #[test]
    fn batch_means_needs_enough_samples() {
        assert!(batch_means(&[1.0, 2.0, 3.0], 10, 0.95).is_none());
        assert!(batch_means(&[1.0, 2.0, 3.0], 0, 0.95).is_none());
        assert!(batch_means(&[1.0, 2.0, 3.0], 1, 0.95).is_none());
    }

    #[test]
    fn poisson_pmf_values() {
        assert!((poisson_pmf(0, 2.0) - (-2.0f64).exp()).abs() < 1e-15);
        assert!((poisson_pmf(3, 2.0) - 8.0 / 6.0 * (-2.0f64).exp()).abs() < 1e-12);
        let total: f64 = (0..60).map(|k| poisson_pmf(k, 5.0)).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(poisson_pmf(0, 0.0), 1.0);
        assert_eq!(poisson_pmf(2, 0.0), 0.0);
    }
}
