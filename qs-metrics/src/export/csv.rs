//! CSV export for result tables
//!
//! One header line, then one line per grid pair in grid order. Cells that do
//! not apply to a row (theory for unstable pairs, everything but the reason
//! for failed ones) are left empty.

use crate::error::MetricsError;
use crate::export::{ensure_parent_dir, TableExporter};
use crate::table::{ResultTable, SweepRow};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const COLUMNS: [&str; 24] = [
    "status",
    "lambda",
    "mu",
    "seed",
    "num_events",
    "rho",
    "stable",
    "e_n_sim",
    "e_tsys_sim",
    "e_tq_sim",
    "utilization_sim",
    "throughput",
    "e_n_theo",
    "e_tsys_theo",
    "e_tq_theo",
    "utilization_theo",
    "e_tsys_ci_low",
    "e_tsys_ci_high",
    "sojourn_p50",
    "sojourn_p95",
    "sojourn_p99",
    "sojourn_max",
    "kind",
    "reason",
];

#[derive(Debug)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl TableExporter for CsvExporter {
    fn export(&self, table: &ResultTable) -> Result<(), MetricsError> {
        ensure_parent_dir(&self.path)?;
        let file = File::create(&self.path)
            .map_err(|e| MetricsError::ExportError(format!("Failed to create file: {e}")))?;
        let mut out = BufWriter::new(file);

        writeln!(out, "{}", COLUMNS.join(","))?;
        for row in table.rows() {
            writeln!(out, "{}", csv_cells(row).join(","))?;
        }
        out.flush()?;
        debug!(path = %self.path.display(), rows = table.len(), "Exported table as CSV");
        Ok(())
    }
}

fn csv_cells(row: &SweepRow) -> Vec<String> {
    let mut cells = vec![String::new(); COLUMNS.len()];
    let opt = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();

    match row {
        SweepRow::Completed(row) => {
            let r = &row.result;
            cells[0] = "completed".to_string();
            cells[1] = r.lambda.to_string();
            cells[2] = r.mu.to_string();
            cells[3] = r.seed.to_string();
            cells[4] = r.num_events.to_string();
            cells[5] = r.offered_load().to_string();
            cells[6] = r.stable.to_string();
            cells[7] = r.e_n.to_string();
            cells[8] = r.e_tsys.to_string();
            cells[9] = r.e_tq.to_string();
            cells[10] = r.utilization.to_string();
            cells[11] = r.throughput.to_string();
            cells[12] = opt(r.theory.map(|t| t.e_n));
            cells[13] = opt(r.theory.map(|t| t.e_tsys));
            cells[14] = opt(r.theory.map(|t| t.e_tq));
            cells[15] = opt(r.theory.map(|t| t.utilization));
            cells[16] = opt(row.e_tsys_ci.map(|ci| ci.ci_low));
            cells[17] = opt(row.e_tsys_ci.map(|ci| ci.ci_high));
            cells[18] = opt(row.sojourn.map(|s| s.p50));
            cells[19] = opt(row.sojourn.map(|s| s.p95));
            cells[20] = opt(row.sojourn.map(|s| s.p99));
            cells[21] = opt(row.sojourn.map(|s| s.max));
        }
        SweepRow::Failed {
            lambda,
            mu,
            kind,
            reason,
        } => {
            cells[0] = "failed".to_string();
            cells[1] = lambda.to_string();
            cells[2] = mu.to_string();
            cells[22] = escape_csv(kind);
            cells[23] = escape_csv(reason);
        }
    }
    cells
}

/// Escape special characters in CSV strings
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
