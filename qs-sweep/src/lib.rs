//! Parameter sweeps for queuesim
//!
//! Two sweeps share the same shape: build a grid, fan its points out on a
//! `rayon` pool, and collect the results in grid order.
//!
//! - [`mm1::run_mm1_sweep`]: λ × μ grid of M/M/1 runs into a
//!   [`queuesim_metrics::ResultTable`]
//! - [`poisson::run_poisson_sweep`]: rate × N grid of Poisson processes, plus
//!   optional superposition of all rates per N
//!
//! The `queuesim` binary wraps both behind a `clap` command line.

pub mod config;
pub mod error;
pub mod grid;
pub mod mm1;
pub mod poisson;

pub use config::{Cli, Command, Mm1SweepConfig, PoissonSweepConfig};
pub use error::SweepError;
pub use grid::{GridPoint, ParameterGrid};
pub use mm1::run_mm1_sweep;
pub use poisson::{run_poisson_sweep, PoissonSweepOutput};

/// Dedicated pool for one sweep; `None` sizes it to the machine.
pub(crate) fn worker_pool(workers: Option<usize>) -> Result<rayon::ThreadPool, SweepError> {
    let mut builder =
        rayon::ThreadPoolBuilder::new().thread_name(|i| format!("queuesim-worker-{i}"));
    if let Some(workers) = workers {
        builder = builder.num_threads(workers);
    }
    Ok(builder.build()?)
}
