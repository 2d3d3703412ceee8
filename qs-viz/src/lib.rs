//! Charts for queue and Poisson sweeps
//!
//! Rendering goes through `plotters` bitmap backends; every chart is written
//! straight to a PNG file.
//!
//! - [`charts::count_distribution`]: interval-count frequencies of a Poisson
//!   process against the expected Poisson frequencies
//! - [`charts::sojourn`]: mean time in system against offered load, one series
//!   per service rate, with the M/M/1 prediction for stable pairs
//!
//! # Example
//!
//! ```no_run
//! use queuesim_metrics::ResultTable;
//! use queuesim_viz::charts::generate_mm1_charts;
//!
//! let table = ResultTable::new();
//! // ... fill from a sweep ...
//! generate_mm1_charts(&table, "plots").unwrap();
//! ```

pub mod charts;
pub mod error;

pub use charts::ChartConfig;
pub use error::VizError;
