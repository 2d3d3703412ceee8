//! Chart generation for sweep output
//!
//! Each chart has a plain entry point with sensible titles and a
//! `*_with_config` variant taking a [`ChartConfig`].

pub mod count_distribution;
pub mod sojourn;
mod util;

use crate::error::VizError;
use queuesim_metrics::{PoissonResult, ResultTable};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Common chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Chart width in pixels
    pub width: u32,
    /// Chart height in pixels
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
        }
    }
}

impl ChartConfig {
    /// Create a new chart configuration with title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the chart dimensions
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }
}

/// Render the sojourn-time chart of an M/M/1 sweep into `output_dir`.
///
/// Returns the path written, or `None` when the table has no completed rows.
pub fn generate_mm1_charts(
    table: &ResultTable,
    output_dir: impl AsRef<Path>,
) -> Result<Option<PathBuf>, VizError> {
    if table.completed().next().is_none() {
        debug!("No completed runs, skipping sojourn chart");
        return Ok(None);
    }
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let path = output_dir.join("sojourn_vs_load.png");
    sojourn::create_sojourn_chart(table, &path)?;
    info!(path = %path.display(), "Wrote sojourn chart");
    Ok(Some(path))
}

/// Render one count-distribution chart per result into `output_dir`.
pub fn generate_poisson_charts<'a>(
    results: impl IntoIterator<Item = &'a PoissonResult>,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, VizError> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for result in results {
        let path = output_dir.join(count_distribution::chart_file_name(result));
        count_distribution::create_count_distribution_chart(result, &path)?;
        debug!(path = %path.display(), "Wrote count distribution chart");
        written.push(path);
    }
    info!(charts = written.len(), dir = %output_dir.display(), "Wrote Poisson charts");
    Ok(written)
}
