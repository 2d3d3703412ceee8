//! Exponential arrival and service-time generators
//!
//! The queue only ever needs two shapes of randomness: a Poisson arrival
//! process (exponential gaps, cumulatively summed into timestamps) and
//! exponential per-customer service durations. Both are backed by an
//! explicitly seeded [`StdRng`] owned by the generator instance.

use crate::error::{check_rate, SimError};
use crate::randomness::{self, Stream};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Exp;

/// Trait for generating arrival patterns
pub trait ArrivalPattern: Send {
    /// Time until the next arrival.
    fn next_arrival_time(&mut self) -> f64;
}

/// Trait for sampling service times from a distribution
pub trait ServiceTimeDistribution: Send {
    /// Service duration for a single customer.
    fn sample(&mut self) -> f64;
}

/// Poisson arrival process
///
/// Inter-arrival times are Exponential(rate).
pub struct PoissonArrivals {
    rate: f64,
    rng: StdRng,
    exp_dist: Exp<f64>,
}

impl PoissonArrivals {
    /// Create a Poisson arrival process with its own seeded generator.
    pub fn new(rate: f64, seed: u64) -> Result<Self, SimError> {
        Self::with_rng(rate, StdRng::seed_from_u64(seed))
    }

    /// Create the arrival stream of the task seeded with `task_seed`.
    pub fn for_stream(rate: f64, task_seed: u64, stream: Stream) -> Result<Self, SimError> {
        Self::with_rng(rate, randomness::stream_rng(task_seed, stream))
    }

    fn with_rng(rate: f64, rng: StdRng) -> Result<Self, SimError> {
        let rate = check_rate("rate", rate)?;
        let exp_dist = Exp::new(rate).map_err(|_| SimError::InvalidParameter {
            name: "rate",
            value: rate,
            reason: "rate must be positive",
        })?;
        Ok(Self {
            rate,
            rng,
            exp_dist,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Draw `n` inter-arrival gaps.
    pub fn inter_arrivals(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.next_arrival_time()).collect()
    }

    /// Draw `n` arrival timestamps (cumulative sums of the gaps).
    pub fn arrival_times(&mut self, n: usize) -> Vec<f64> {
        let mut clock = 0.0;
        self.inter_arrivals(n)
            .into_iter()
            .map(|gap| {
                clock += gap;
                clock
            })
            .collect()
    }
}

impl ArrivalPattern for PoissonArrivals {
    fn next_arrival_time(&mut self) -> f64 {
        // Exp can return exactly zero only with vanishing probability; keep
        // timestamps strictly increasing regardless.
        let gap: f64 = self.rng.sample(self.exp_dist);
        if gap > 0.0 {
            gap
        } else {
            f64::MIN_POSITIVE
        }
    }
}

/// Exponential service time distribution
pub struct ExponentialServiceTime {
    rate: f64,
    rng: StdRng,
    exp_dist: Exp<f64>,
}

impl ExponentialServiceTime {
    pub fn new(rate: f64, seed: u64) -> Result<Self, SimError> {
        Self::with_rng(rate, StdRng::seed_from_u64(seed))
    }

    pub fn for_stream(rate: f64, task_seed: u64, stream: Stream) -> Result<Self, SimError> {
        Self::with_rng(rate, randomness::stream_rng(task_seed, stream))
    }

    fn with_rng(rate: f64, rng: StdRng) -> Result<Self, SimError> {
        let rate = check_rate("rate", rate)?;
        let exp_dist = Exp::new(rate).map_err(|_| SimError::InvalidParameter {
            name: "rate",
            value: rate,
            reason: "rate must be positive",
        })?;
        Ok(Self {
            rate,
            rng,
            exp_dist,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Mean service time (1/rate)
    pub fn mean_service_time(&self) -> f64 {
        1.0 / self.rate
    }

    /// Draw `n` raw service durations (not cumulative).
    pub fn durations(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.sample()).collect()
    }
}

impl ServiceTimeDistribution for ExponentialServiceTime {
    fn sample(&mut self) -> f64 {
        let duration: f64 = self.rng.sample(self.exp_dist);
        if duration > 0.0 {
            duration
        } else {
            f64::MIN_POSITIVE
        }
    }
}

/// `n` strictly increasing Poisson arrival timestamps for `(rate, seed)`.
pub fn arrival_times(rate: f64, n: usize, seed: u64) -> Result<Vec<f64>, SimError> {
    Ok(PoissonArrivals::new(rate, seed)?.arrival_times(n))
}

/// `n` Exponential(rate) service durations for `(rate, seed)`.
pub fn service_durations(rate: f64, n: usize, seed: u64) -> Result<Vec<f64>, SimError> {
    Ok(ExponentialServiceTime::new(rate, seed)?.durations(n))
}
