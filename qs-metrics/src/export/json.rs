//! JSON export for result tables
//!
//! The table is written as an array of rows in grid order. Each row carries a
//! `status` field of `completed` or `failed`.

use crate::error::MetricsError;
use crate::export::{ensure_parent_dir, TableExporter};
use crate::table::ResultTable;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct JsonExporter {
    path: PathBuf,
    pretty: bool,
}

impl JsonExporter {
    /// Create a new JSON exporter
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn new(path: &Path, pretty: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            pretty,
        }
    }
}

impl TableExporter for JsonExporter {
    fn export(&self, table: &ResultTable) -> Result<(), MetricsError> {
        let rows: Vec<_> = table.rows().collect();
        let json = if self.pretty {
            serde_json::to_string_pretty(&rows)
        } else {
            serde_json::to_string(&rows)
        }?;

        ensure_parent_dir(&self.path)?;
        let mut file = File::create(&self.path)
            .map_err(|e| MetricsError::ExportError(format!("Failed to create file: {e}")))?;
        file.write_all(json.as_bytes())
            .map_err(|e| MetricsError::ExportError(format!("Failed to write to file: {e}")))?;

        debug!(path = %self.path.display(), rows = table.len(), "Exported table as JSON");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Mm1Row, SweepRow};
    use queuesim_core::{run_mm1, RunConfig};

    #[test]
    fn test_json_export() {
        let mut table = ResultTable::new();
        let result = run_mm1(&RunConfig::new(1.0, 2.0, 50).with_seed(11)).unwrap();
        table.insert(0, SweepRow::Completed(Mm1Row::new(result)));
        table.insert(
            1,
            SweepRow::Failed {
                lambda: 1.0,
                mu: 0.0,
                kind: "invalid_parameter".to_string(),
                reason: "rate must be positive".to_string(),
            },
        );

        let path = std::env::temp_dir().join("queuesim_test_table.json");
        JsonExporter::new(&path, true).export(&table).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["status"], "completed");
        assert_eq!(rows[0]["seed"], 11);
        assert!((rows[0]["e_tsys"].as_f64().unwrap() - result.e_tsys).abs() < 1e-12);
        assert_eq!(rows[1]["status"], "failed");
        assert_eq!(rows[1]["mu"], 0.0);

        std::fs::remove_file(&path).ok();
    }
}
