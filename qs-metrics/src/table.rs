//! Sweep result table.
//!
//! Rows are keyed by their position in the parameter grid, so the table reads
//! in grid order no matter which worker finished first.

use crate::sojourn::DelaySummary;
use crate::stats::BatchMeansEstimate;
use queuesim_core::RunResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A completed (λ, μ) run together with its delay statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mm1Row {
    #[serde(flatten)]
    pub result: RunResult,
    pub sojourn: Option<DelaySummary>,
    pub e_tsys_ci: Option<BatchMeansEstimate>,
}

impl Mm1Row {
    pub fn new(result: RunResult) -> Self {
        Self {
            result,
            sojourn: None,
            e_tsys_ci: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SweepRow {
    Completed(Mm1Row),
    Failed {
        lambda: f64,
        mu: f64,
        /// Error category, e.g. `invalid_parameter`.
        kind: String,
        reason: String,
    },
}

impl SweepRow {
    pub fn lambda(&self) -> f64 {
        match self {
            Self::Completed(row) => row.result.lambda,
            Self::Failed { lambda, .. } => *lambda,
        }
    }

    pub fn mu(&self) -> f64 {
        match self {
            Self::Completed(row) => row.result.mu,
            Self::Failed { mu, .. } => *mu,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    rows: BTreeMap<usize, SweepRow>,
}

const HEADERS: [(&str, usize); 10] = [
    ("λ", 8),
    ("μ", 8),
    ("E[N]_sim", 10),
    ("E[T_sys]_sim", 12),
    ("E[T_q]_sim", 12),
    ("Util%_sim", 10),
    ("E[N]_theo", 10),
    ("E[T_sys]_theo", 12),
    ("E[T_q]_theo", 12),
    ("Util%_theo", 10),
];

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `row` at grid position `index`, replacing any earlier row there.
    pub fn insert(&mut self, index: usize, row: SweepRow) {
        self.rows.insert(index, row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in grid order.
    pub fn rows(&self) -> impl Iterator<Item = &SweepRow> {
        self.rows.values()
    }

    pub fn completed(&self) -> impl Iterator<Item = &Mm1Row> {
        self.rows().filter_map(|row| match row {
            SweepRow::Completed(row) => Some(row),
            SweepRow::Failed { .. } => None,
        })
    }

    pub fn failed_count(&self) -> usize {
        self.rows().filter(|row| !row.is_completed()).count()
    }

    /// Fixed-width text rendering with simulated and theoretical columns side
    /// by side. Theory cells read `-` for unstable pairs.
    pub fn render_text(&self) -> String {
        let header = HEADERS
            .iter()
            .map(|&(name, width)| format!("{name:>width$}"))
            .collect::<Vec<_>>()
            .join(" ");
        let mut out = String::new();
        out.push_str(&header);
        out.push('\n');
        out.push_str(&"=".repeat(header.chars().count()));
        out.push('\n');

        for row in self.rows() {
            out.push_str(&render_row(row));
            out.push('\n');
        }
        out
    }
}

fn render_row(row: &SweepRow) -> String {
    let lead = format!("{:>8.2} {:>8.2}", row.lambda(), row.mu());
    match row {
        SweepRow::Failed { reason, .. } => format!("{lead} FAILED: {reason}"),
        SweepRow::Completed(row) => {
            let r = &row.result;
            let sim = format!(
                "{:>10.2} {:>12.2} {:>12.2} {:>10.2}",
                r.e_n,
                r.e_tsys,
                r.e_tq,
                r.utilization * 100.0
            );
            let theo = match r.theory {
                Some(t) => format!(
                    "{:>10.2} {:>12.2} {:>12.2} {:>10.2}",
                    t.e_n,
                    t.e_tsys,
                    t.e_tq,
                    t.utilization * 100.0
                ),
                None => format!("{:>10} {:>12} {:>12} {:>10}", "-", "-", "-", "-"),
            };
            format!("{lead} {sim} {theo}")
        }
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}
