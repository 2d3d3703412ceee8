//! Core of the M/M/1 simulator.
//!
//! The crate is organised leaves first:
//!
//! - [`dists`] and [`randomness`]: seeded exponential generators for arrival
//!   timestamps and service durations.
//! - [`queue`]: the single-server FIFO recurrence producing a
//!   [`SimulationTrace`].
//! - [`aggregate`]: reduction of a trace into E\[N\], E\[T_sys\], E\[T_q\] and
//!   utilization, plus the closed-form M/M/1 values for the stable regime.
//! - [`task`]: the per-(λ, μ) entry point used by sweeps.
//!
//! # Basic Usage
//!
//! ```rust
//! use queuesim_core::{run_mm1, RunConfig};
//!
//! let result = run_mm1(&RunConfig::new(1.0, 2.0, 1_000).with_seed(42)).unwrap();
//! assert!(result.stable);
//! assert!(result.utilization <= 1.0);
//! ```
//!
//! # Time Model
//!
//! Times are plain `f64` values in the unit implied by the rates: with λ in
//! customers per second, every timestamp and duration is in seconds.

pub mod aggregate;
pub mod dists;
pub mod error;
pub mod logging;
pub mod queue;
pub mod randomness;
pub mod task;

pub use aggregate::{aggregate, is_stable, offered_load, EmpiricalMetrics, TheoreticalMetrics};
pub use dists::{ArrivalPattern, ExponentialServiceTime, PoissonArrivals, ServiceTimeDistribution};
pub use error::SimError;
pub use logging::{
    init_detailed_simulation_logging, init_simulation_logging, init_simulation_logging_with_level,
    process_span, run_span, simulation_span,
};
pub use queue::{simulate_fifo, Customer, SimulationTrace};
pub use task::{run_mm1, run_mm1_traced, RunConfig, RunResult};
