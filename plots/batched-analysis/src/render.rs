use common::{
    error::MetricKind,
    plot::{Figure, Panel, Render, Series},
};
use eyre::{Result, bail};
use tracing::info;

use crate::{
    group::{axis_bounds, fit_groups, group_by_threads},
    index::MetricTable,
};

pub const X_LABEL: &str = "files in batch";
pub const FIGURE_NAME: &str = "batched-analysis";

/// Left to right
pub const PANELS: [MetricKind; 2] = [MetricKind::Runtime, MetricKind::Throughput];

fn title(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Runtime => "Runtime",
        MetricKind::Throughput => "Throughput",
    }
}

fn y_label(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Runtime => "milliseconds",
        MetricKind::Throughput => "records per millisecond",
    }
}

/// Vertical extent of a panel: from zero, or lower where a trend line dips
/// below it, up to the larger of `max_metric` and the highest curve value
fn y_range(series: &[Series], max_metric: f64) -> (f64, f64) {
    series
        .iter()
        .flat_map(|s| s.curve.iter().map(|p| p.1))
        .fold((0.0f64, max_metric), |(lo, hi), y| (lo.min(y), hi.max(y)))
}

/// Builds the runtime and throughput panels from a validated table
pub fn compose_figure(table: &MetricTable, degree: usize, step: f64) -> Result<Figure> {
    let Some(max_batch_size) = table.max_batch_size() else {
        bail!("No configurations to plot");
    };

    let panels = PANELS
        .iter()
        .map(|&kind| {
            let groups = group_by_threads(table, kind);
            let bounds = axis_bounds(&groups, max_batch_size);
            let series = fit_groups(groups, degree, step)
                .into_iter()
                .map(|fitted| Series {
                    label: fitted.group.thread_count.to_string(),
                    points: fitted
                        .group
                        .points
                        .iter()
                        .map(|&(batch, value)| (batch as f64, value))
                        .collect(),
                    curve: fitted.curve,
                })
                .collect::<Vec<_>>();
            let (y_min, y_max) = y_range(&series, bounds.max_metric);
            Panel {
                title: title(kind).to_owned(),
                x_label: X_LABEL.to_owned(),
                y_label: y_label(kind).to_owned(),
                x_max: bounds.max_batch_size as f64,
                y_min,
                y_max,
                series,
            }
        })
        .collect();

    Ok(Figure {
        name: FIGURE_NAME.to_owned(),
        panels,
    })
}

pub fn render_report(
    table: &MetricTable,
    degree: usize,
    step: f64,
    backend: &dyn Render,
) -> Result<()> {
    let figure = compose_figure(table, degree, step)?;
    info!(
        "Rendering {} configurations across {} thread counts",
        table.len(),
        figure.panels[0].series.len()
    );
    backend.render(&figure)
}
