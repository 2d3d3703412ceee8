//! Post-processing of queue and Poisson simulation output
//!
//! - [`histogram`]: fixed-edge binning of event times
//! - [`poisson`]: interval counts compared against the Poisson pmf
//! - [`sojourn`]: HDR-histogram delay percentiles and batch-means intervals
//! - [`stats`]: the underlying estimators
//! - [`table`] and [`export`]: sweep result tables, rendered as text, CSV or JSON

pub mod error;
pub mod export;
pub mod histogram;
pub mod poisson;
pub mod sojourn;
pub mod stats;
pub mod table;

pub use error::MetricsError;
pub use export::{export_csv, export_json, TableExporter};
pub use histogram::{Bins, Histogram, HistogramCounts, MAX_INTERVALS};
pub use poisson::{CountFrequency, PoissonResult};
pub use sojourn::{sojourn_confidence_interval, DelaySummary};
pub use stats::{batch_means, poisson_pmf, BatchMeansEstimate};
pub use table::{Mm1Row, ResultTable, SweepRow};
