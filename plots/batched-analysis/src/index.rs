use std::{
    collections::BTreeMap,
    fs::read_dir,
    path::{Path, PathBuf},
};

use common::{
    config::Settings,
    error::{MetricKind, ReportError},
};
use criterion_raw::{
    ConfigurationLabel,
    result::{RawSample, read_raw_csv},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::aggregate;

/// Criterion writes its html summary next to the configuration folders
pub const REPORT_DIR: &str = "report";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationMetrics {
    pub mean_runtime_ms: f64,
    pub mean_throughput_per_ms: f64,
}

impl ConfigurationMetrics {
    pub fn get(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Runtime => self.mean_runtime_ms,
            MetricKind::Throughput => self.mean_throughput_per_ms,
        }
    }
}

/// Fully populated metrics of every configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable(BTreeMap<ConfigurationLabel, ConfigurationMetrics>);

impl MetricTable {
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigurationLabel, &ConfigurationMetrics)> {
        self.0.iter()
    }

    pub fn get(&self, label: &ConfigurationLabel) -> Option<&ConfigurationMetrics> {
        self.0.get(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn max_batch_size(&self) -> Option<u64> {
        self.0.keys().map(|label| label.batch_size).max()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct PartialMetrics {
    runtime: Option<f64>,
    throughput: Option<f64>,
}

/// Collects both metrics per configuration. Either metric may arrive first.
#[derive(Debug, Default)]
pub struct MetricTableBuilder {
    entries: BTreeMap<ConfigurationLabel, PartialMetrics>,
}

impl MetricTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        label: ConfigurationLabel,
        kind: MetricKind,
        value: f64,
        source: &Path,
    ) -> Result<(), ReportError> {
        let entry = self.entries.entry(label.clone()).or_default();
        let slot = match kind {
            MetricKind::Runtime => &mut entry.runtime,
            MetricKind::Throughput => &mut entry.throughput,
        };
        if slot.is_some() {
            return Err(ReportError::DuplicateConfiguration {
                label: label.to_string(),
                metric: kind,
                path: source.to_path_buf(),
            });
        }
        *slot = Some(value);
        Ok(())
    }

    /// Fails on the first configuration that is missing one of the metrics
    pub fn finish(self) -> Result<MetricTable, ReportError> {
        let mut table = BTreeMap::new();
        for (label, partial) in self.entries {
            let mean_runtime_ms = partial.runtime.ok_or_else(|| ReportError::ConfigMismatch {
                label: label.to_string(),
                missing: MetricKind::Runtime,
            })?;
            let mean_throughput_per_ms =
                partial.throughput.ok_or_else(|| ReportError::ConfigMismatch {
                    label: label.to_string(),
                    missing: MetricKind::Throughput,
                })?;
            table.insert(
                label,
                ConfigurationMetrics {
                    mean_runtime_ms,
                    mean_throughput_per_ms,
                },
            );
        }
        Ok(MetricTable(table))
    }
}

/// Configuration folders below `root`, sorted by name
pub fn discover(root: &Path) -> Result<Vec<PathBuf>, ReportError> {
    let entries = read_dir(root).map_err(|e| ReportError::io(root, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ReportError::io(root, e))?;
        let path = entry.path();
        if !path.is_dir() || entry.file_name() == REPORT_DIR {
            continue;
        }
        dirs.push(path);
    }
    dirs.sort();
    Ok(dirs)
}

/// The configuration identity is taken from the first sample
fn first_label(samples: &[RawSample], path: &Path) -> Result<ConfigurationLabel, ReportError> {
    let first = samples.first().ok_or_else(|| ReportError::EmptyDataset {
        path: path.to_path_buf(),
    })?;
    first.label.parse().map_err(|_| ReportError::InvalidLabel {
        path: path.to_path_buf(),
        label: first.label.clone(),
    })
}

/// Loads one configuration folder and reduces it to a single metric
pub fn load_configuration(
    config_dir: &Path,
    settings: &Settings,
    kind: MetricKind,
) -> Result<(ConfigurationLabel, f64), ReportError> {
    let path = settings.raw_file_in(config_dir);
    let samples = read_raw_csv(&path)?;
    let label = first_label(&samples, &path)?;
    let value = aggregate(&samples, kind, &path)?;
    debug!("{kind} of {label}: {value} ({} samples)", samples.len());
    Ok((label, value))
}

/// Result roots in the order they are read
pub fn roots(settings: &Settings) -> [(MetricKind, PathBuf); 2] {
    [
        (MetricKind::Runtime, settings.runtime_root()),
        (MetricKind::Throughput, settings.throughput_root()),
    ]
}

/// Runtime root, then throughput root, merged by configuration label
pub fn collect_metrics(settings: &Settings) -> Result<MetricTable, ReportError> {
    let mut builder = MetricTableBuilder::new();
    for (kind, root) in roots(settings) {
        let dirs = discover(&root)?;
        info!("Found {} {kind} configurations in {root:?}", dirs.len());
        for dir in dirs {
            let (label, value) = load_configuration(&dir, settings, kind)?;
            builder.record(label, kind, value, &dir)?;
        }
    }
    builder.finish()
}

/// Label of every configuration folder, without aggregating
pub fn list_configurations(
    settings: &Settings,
) -> Result<Vec<(MetricKind, PathBuf, ConfigurationLabel)>, ReportError> {
    let mut found = Vec::new();
    for (kind, root) in roots(settings) {
        for dir in discover(&root)? {
            let path = settings.raw_file_in(&dir);
            let label = first_label(&read_raw_csv(&path)?, &path)?;
            found.push((kind, dir, label));
        }
    }
    Ok(found)
}
