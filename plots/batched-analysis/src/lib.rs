//! Runtime and throughput report for criterion's batched analysis benchmarks.
//!
//! Raw samples are read per configuration from both result roots, reduced to
//! a mean, joined on the `"<threads>, <n> files"` label and drawn as one
//! scatter series plus a polynomial trend line per thread count.

use common::{config::Settings, plot::Render};
use eyre::{Result, WrapErr, bail};
use tracing::debug;

pub mod aggregate;
pub mod fit;
pub mod group;
pub mod index;
pub mod render;

use index::{MetricTable, collect_metrics};

#[derive(Debug, Clone)]
pub struct BatchedAnalysis {
    settings: Settings,
}

impl BatchedAnalysis {
    pub fn new(settings: Settings) -> Result<Self> {
        if settings.curve_step.is_nan() || settings.curve_step <= 0.0 {
            bail!("curve_step must be positive, got {}", settings.curve_step);
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Loads and validates both metrics of every configuration
    pub fn metrics(&self) -> Result<MetricTable> {
        let group = self.settings.group_path();
        debug!("Collecting metrics from {group:?}");
        collect_metrics(&self.settings)
            .wrap_err_with(|| format!("Collect benchmark results in {group:?}"))
    }

    pub fn plot(&self, backend: &dyn Render) -> Result<()> {
        let table = self.metrics()?;
        render::render_report(
            &table,
            self.settings.fit_degree,
            self.settings.curve_step,
            backend,
        )
        .wrap_err("Render batched analysis report")
    }
}
