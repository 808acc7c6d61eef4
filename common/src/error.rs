use std::path::PathBuf;

use thiserror::Error;

/// Which of the two per-configuration metrics an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Runtime,
    Throughput,
}

impl MetricKind {
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::Runtime => "runtime",
            MetricKind::Throughput => "throughput",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed results in {path:?}: {message}")]
    Format { path: PathBuf, message: String },
    #[error("Invalid configuration label {label:?} in {path:?}, expected \"<threads>, <n> files\"")]
    InvalidLabel { path: PathBuf, label: String },
    #[error("No samples in {path:?}")]
    EmptyDataset { path: PathBuf },
    #[error("Configuration {label} has more than one {metric} result (second one in {path:?})")]
    DuplicateConfiguration {
        label: String,
        metric: MetricKind,
        path: PathBuf,
    },
    #[error("Configuration {label} has no {missing} result")]
    ConfigMismatch { label: String, missing: MetricKind },
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ReportError::Format {
            path: path.into(),
            message: message.into(),
        }
    }
}
