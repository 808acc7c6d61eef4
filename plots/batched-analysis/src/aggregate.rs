use std::path::Path;

use common::{
    error::{MetricKind, ReportError},
    util::mean,
};
use criterion_raw::result::RawSample;

/// Reduces one configuration's samples to its mean runtime (ms) or mean
/// throughput (records per ms). `path` is only used for error messages.
pub fn aggregate(samples: &[RawSample], kind: MetricKind, path: &Path) -> Result<f64, ReportError> {
    let per_sample: Vec<f64> = match kind {
        MetricKind::Runtime => samples.iter().map(RawSample::per_iteration_ms).collect(),
        MetricKind::Throughput => samples
            .iter()
            .enumerate()
            .map(|(idx, sample)| -> Result<f64, ReportError> {
                let records = sample.throughput_count.ok_or_else(|| {
                    ReportError::format(path, format!("Row {}: missing throughput_num", idx + 1))
                })?;
                Ok(records / sample.per_iteration_ms())
            })
            .collect::<Result<_, _>>()?,
    };
    mean(per_sample).ok_or_else(|| ReportError::EmptyDataset {
        path: path.to_path_buf(),
    })
}
