//! Mean time in system against offered load

use crate::charts::util::{padded_max, truncate_label};
use crate::charts::ChartConfig;
use crate::error::VizError;
use plotters::prelude::*;
use queuesim_metrics::ResultTable;
use std::path::Path;

/// Simulated (ρ, E\[T_sys\]) points sharing one service rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SojournSeries {
    pub mu: f64,
    /// Sorted by ρ.
    pub points: Vec<(f64, f64)>,
}

/// Group completed rows by μ, in order of first appearance.
pub fn sojourn_series(table: &ResultTable) -> Vec<SojournSeries> {
    let mut series: Vec<SojournSeries> = Vec::new();
    for row in table.completed() {
        let r = &row.result;
        let point = (r.offered_load(), r.e_tsys);
        match series.iter_mut().find(|s| s.mu == r.mu) {
            Some(s) => s.points.push(point),
            None => series.push(SojournSeries {
                mu: r.mu,
                points: vec![point],
            }),
        }
    }
    for s in &mut series {
        s.points.sort_by(|a, b| a.0.total_cmp(&b.0));
    }
    series
}

/// Closed-form (ρ, 1/(μ−λ)) points; unstable pairs have none.
pub fn theory_points(table: &ResultTable) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = table
        .completed()
        .filter_map(|row| row.result.theory.map(|t| (t.rho, t.e_tsys)))
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points
}

/// Create the sojourn-time chart of a sweep
pub fn create_sojourn_chart(
    table: &ResultTable,
    output_path: impl AsRef<Path>,
) -> Result<(), VizError> {
    create_sojourn_chart_with_config(table, output_path, chart_config())
}

/// Titles and a wide canvas leaving room for one legend entry per μ.
pub fn chart_config() -> ChartConfig {
    ChartConfig::new("M/M/1 mean time in system")
        .dimensions(1200, 800)
        .x_label("ρ = λ/μ")
        .y_label("E[T_sys]")
}

pub fn create_sojourn_chart_with_config(
    table: &ResultTable,
    output_path: impl AsRef<Path>,
    config: ChartConfig,
) -> Result<(), VizError> {
    let series = sojourn_series(table);
    if series.is_empty() {
        return Err(VizError::InvalidConfiguration(
            "No completed runs available for sojourn chart".to_string(),
        ));
    }
    let theory = theory_points(table);

    let all_points = || {
        series
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .chain(theory.iter().copied())
    };
    let x_max = padded_max(all_points().map(|(x, _)| x), 1.0);
    let y_max = padded_max(all_points().map(|(_, y)| y), 1.0);

    let output_path = output_path.as_ref();
    let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| VizError::RenderingError(format!("Failed to fill background: {e}")))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(|e| VizError::RenderingError(format!("Failed to build chart: {e}")))?;

    chart
        .configure_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .draw()
        .map_err(|e| VizError::RenderingError(format!("Failed to configure mesh: {e}")))?;

    let colors = [BLUE, GREEN, MAGENTA, CYAN, BLACK];
    for (idx, s) in series.iter().enumerate() {
        let color = colors[idx % colors.len()];

        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))
            .map_err(|e| VizError::RenderingError(format!("Failed to draw line series: {e}")))?
            .label(truncate_label(&format!("simulated, μ={}", s.mu), 25))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
            });

        chart
            .draw_series(
                s.points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )
            .map_err(|e| VizError::RenderingError(format!("Failed to draw points: {e}")))?;
    }

    if !theory.is_empty() {
        chart
            .draw_series(
                theory
                    .iter()
                    .map(|&(x, y)| Cross::new((x, y), 6, RED.stroke_width(2))),
            )
            .map_err(|e| VizError::RenderingError(format!("Failed to draw theory: {e}")))?
            .label("theory 1/(μ−λ)")
            .legend(|(x, y)| Cross::new((x + 10, y), 6, RED.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| VizError::RenderingError(format!("Failed to draw legend: {e}")))?;

    root.present()
        .map_err(|e| VizError::ExportFailed(format!("Failed to save chart: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuesim_core::{run_mm1, RunConfig};
    use queuesim_metrics::{Mm1Row, SweepRow};

    fn table(pairs: &[(f64, f64)]) -> ResultTable {
        let mut table = ResultTable::new();
        for (idx, &(lambda, mu)) in pairs.iter().enumerate() {
            let result = run_mm1(&RunConfig::new(lambda, mu, 200).with_seed(1)).unwrap();
            table.insert(idx, SweepRow::Completed(Mm1Row::new(result)));
        }
        table
    }

    #[test]
    fn series_grouped_by_mu_and_sorted_by_load() {
        let t = table(&[(1.5, 2.0), (0.5, 1.0), (0.5, 2.0)]);
        let series = sojourn_series(&t);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].mu, 2.0);
        let loads: Vec<f64> = series[0].points.iter().map(|p| p.0).collect();
        assert_eq!(loads, vec![0.25, 0.75]);
        assert_eq!(series[1].mu, 1.0);
    }

    #[test]
    fn theory_only_for_stable_pairs() {
        let t = table(&[(3.0, 1.0), (1.0, 2.0), (2.0, 2.0)]);
        assert_eq!(theory_points(&t), vec![(0.5, 1.0)]);
        let simulated: usize = sojourn_series(&t).iter().map(|s| s.points.len()).sum();
        assert_eq!(simulated, 3);
    }

    #[test]
    fn default_config_is_wide() {
        let config = chart_config();
        assert_eq!((config.width, config.height), (1200, 800));
        assert_eq!(config.x_label, "ρ = λ/μ");
    }

    #[test]
    fn failed_rows_are_left_out() {
        let mut t = ResultTable::new();
        t.insert(
            0,
            SweepRow::Failed {
                lambda: 0.0,
                mu: 1.0,
                kind: "invalid_parameter".to_string(),
                reason: "rate must be positive".to_string(),
            },
        );
        assert!(sojourn_series(&t).is_empty());
        let path = std::env::temp_dir().join("queuesim_no_sojourn.png");
        assert!(matches!(
            create_sojourn_chart(&t, &path),
            Err(VizError::InvalidConfiguration(_))
        ));
    }
}
