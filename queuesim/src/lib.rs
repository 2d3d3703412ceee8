//! # queuesim - M/M/1 queue and Poisson process simulation
//!
//! Seeded, reproducible simulation of single-server FIFO queues and Poisson
//! arrival processes, with parallel parameter sweeps and comparison against
//! closed-form results.
//!
//! ## Feature Flags
//!
//! - `default`: `viz` and `sweep`
//! - `viz`: PNG charts
//! - `sweep`: parallel sweeps and the `queuesim` command line
//!
//! ## Example
//!
//! ```rust
//! use queuesim::prelude::*;
//!
//! let (result, trace) = run_mm1_traced(&RunConfig::new(1.0, 2.0, 5_000).with_seed(42)).unwrap();
//! let sojourn = DelaySummary::from_sojourns(&trace).unwrap();
//! assert_eq!(result.theory.map(|t| t.e_tsys), Some(1.0));
//! assert!(sojourn.p50 <= sojourn.p99);
//! ```

// Re-export core (always available)
pub use queuesim_core as core;

pub use queuesim_metrics as metrics;

#[cfg(feature = "viz")]
pub use queuesim_viz as viz;

#[cfg(feature = "sweep")]
pub use queuesim_sweep as sweep;

pub mod prelude {
    //! Commonly used types and functions

    pub use queuesim_core::{
        aggregate, run_mm1, run_mm1_traced, simulate_fifo, ArrivalPattern, EmpiricalMetrics,
        ExponentialServiceTime, PoissonArrivals, RunConfig, RunResult, ServiceTimeDistribution,
        SimError, SimulationTrace, TheoreticalMetrics,
    };

    pub use queuesim_metrics::{
        DelaySummary, Histogram, Mm1Row, PoissonResult, ResultTable, SweepRow, TableExporter,
    };

    #[cfg(feature = "sweep")]
    pub use queuesim_sweep::{
        run_mm1_sweep, run_poisson_sweep, Mm1SweepConfig, PoissonSweepConfig, SweepError,
    };
}
