//! Export of sweep result tables
//!
//! CSV for spreadsheets and pandas, JSON for programmatic consumption.

pub mod csv;
pub mod json;

use crate::error::MetricsError;
use crate::table::ResultTable;
use std::path::Path;

/// Trait for writing a result table to some destination
pub trait TableExporter {
    fn export(&self, table: &ResultTable) -> Result<(), MetricsError>;
}

/// Export a table as JSON
///
/// # Example
/// ```no_run
/// use queuesim_metrics::export::export_json;
/// use queuesim_metrics::ResultTable;
///
/// let table = ResultTable::new();
/// // ... fill from a sweep ...
/// export_json(&table, "results/mm1.json", true).unwrap();
/// ```
pub fn export_json(
    table: &ResultTable,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), MetricsError> {
    json::JsonExporter::new(path.as_ref(), pretty).export(table)
}

/// Export a table as CSV, one line per grid pair
///
/// # Example
/// ```no_run
/// use queuesim_metrics::export::export_csv;
/// use queuesim_metrics::ResultTable;
///
/// let table = ResultTable::new();
/// export_csv(&table, "results/mm1.csv").unwrap();
/// ```
pub fn export_csv(table: &ResultTable, path: impl AsRef<Path>) -> Result<(), MetricsError> {
    csv::CsvExporter::new(path.as_ref()).export(table)
}

/// Create the parent directory of `path` if it does not exist yet.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), MetricsError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| MetricsError::ExportError(format!("Failed to create directory: {e}"))),
        _ => Ok(()),
    }
}
