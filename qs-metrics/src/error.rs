//! Error types for metrics, histograms and exporters

use thiserror::Error;

/// Errors related to post-processing simulation output
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Invalid histogram bins: {0}")]
    InvalidBins(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Histogram error: {0}")]
    Histogram(String),

    #[error("Export failed: {0}")]
    ExportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
