//! Interval-count histogram of a Poisson process against the Poisson pmf

use crate::charts::util::padded_max;
use crate::charts::ChartConfig;
use crate::error::VizError;
use plotters::prelude::*;
use queuesim_metrics::{CountFrequency, PoissonResult};
use std::path::Path;

/// File name for the chart of `result`, e.g. `hist_vs_poisson_l2_N1000.png`.
pub fn chart_file_name(result: &PoissonResult) -> String {
    let kind = if result.processes > 1 {
        "superposed_"
    } else {
        ""
    };
    format!(
        "hist_vs_poisson_{kind}l{}_N{}.png",
        result.rate, result.num_events
    )
}

/// Create a count distribution chart
///
/// Bars are the number of intervals holding each count; the line is the
/// number expected under Poisson(rate · δ).
pub fn create_count_distribution_chart(
    result: &PoissonResult,
    output_path: impl AsRef<Path>,
) -> Result<(), VizError> {
    create_count_distribution_chart_with_config(result, output_path, chart_config(result))
}

/// Titles and a 10:7 canvas for the count-distribution chart of `result`.
pub fn chart_config(result: &PoissonResult) -> ChartConfig {
    ChartConfig::new(format!(
        "Events per interval, rate={} N={} δ={}",
        result.rate, result.num_events, result.delta
    ))
    .dimensions(1000, 700)
    .x_label("Events per interval")
    .y_label("Intervals")
}

pub fn create_count_distribution_chart_with_config(
    result: &PoissonResult,
    output_path: impl AsRef<Path>,
    config: ChartConfig,
) -> Result<(), VizError> {
    let dist = result.count_distribution();
    if dist.is_empty() {
        return Err(VizError::InvalidConfiguration(format!(
            "No intervals to plot for rate {} with {} events",
            result.rate, result.num_events
        )));
    }

    let x_max = dist.len() as f64 - 0.5;
    let y_max = padded_max(
        dist.iter()
            .flat_map(|d| [d.observed as f64, d.expected]),
        1.0,
    );

    let output_path = output_path.as_ref();
    let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| VizError::RenderingError(format!("Failed to fill background: {e}")))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..x_max, 0.0..y_max)
        .map_err(|e| VizError::RenderingError(format!("Failed to build chart: {e}")))?;

    chart
        .configure_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .x_label_formatter(&|x| format!("{x:.0}"))
        .draw()
        .map_err(|e| VizError::RenderingError(format!("Failed to configure mesh: {e}")))?;

    chart
        .draw_series(dist.iter().map(|d| {
            let k = d.count as f64;
            Rectangle::new([(k - 0.4, 0.0), (k + 0.4, d.observed as f64)], BLUE.mix(0.6).filled())
        }))
        .map_err(|e| VizError::RenderingError(format!("Failed to draw bars: {e}")))?
        .label("simulated")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], BLUE.mix(0.6).filled()));

    chart
        .draw_series(LineSeries::new(expected_points(&dist), RED.stroke_width(2)))
        .map_err(|e| VizError::RenderingError(format!("Failed to draw line series: {e}")))?
        .label(format!("Poisson({:.2})", result.expected_mean()))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(3)));

    chart
        .draw_series(
            expected_points(&dist).map(|(x, y)| Circle::new((x, y), 4, RED.filled())),
        )
        .map_err(|e| VizError::RenderingError(format!("Failed to draw points: {e}")))?;

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

fn expected_points(dist: &[CountFrequency]) -> impl Iterator<Item = (f64, f64)> + '_ {
    dist.iter().map(|d| (d.count as f64, d.expected))
}
