use std::collections::BTreeMap;

use common::error::MetricKind;
use criterion_raw::ThreadCount;
use itertools::Itertools;

use crate::{
    fit::{polyfit, sample_curve},
    index::MetricTable,
};

/// All configurations of one metric sharing a thread count
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadGroup {
    pub thread_count: ThreadCount,
    /// `(batch_size, metric)`, ordered by batch size
    pub points: Vec<(u64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FittedGroup {
    pub group: ThreadGroup,
    pub curve: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub max_batch_size: u64,
    pub max_metric: f64,
}

/// Partitions the table by thread count, ordered by thread count
pub fn group_by_threads(table: &MetricTable, kind: MetricKind) -> Vec<ThreadGroup> {
    let mut groups: BTreeMap<&ThreadCount, Vec<(u64, f64)>> = BTreeMap::new();
    for (label, metrics) in table.iter() {
        groups
            .entry(&label.thread_count)
            .or_default()
            .push((label.batch_size, metrics.get(kind)));
    }
    groups
        .into_iter()
        .map(|(thread_count, points)| ThreadGroup {
            thread_count: thread_count.clone(),
            points: points.into_iter().sorted_by_key(|p| p.0).collect(),
        })
        .collect()
}

/// Axis maxima over the finished groups. `max_batch_size` should be shared
/// between both panels, see [`MetricTable::max_batch_size`].
pub fn axis_bounds(groups: &[ThreadGroup], max_batch_size: u64) -> AxisBounds {
    let max_metric = groups
        .iter()
        .flat_map(|g| g.points.iter().map(|p| p.1))
        .fold(0.0, f64::max);
    AxisBounds {
        max_batch_size,
        max_metric,
    }
}

/// Smooths every group with a polynomial sampled on `[min batch, max batch)`
pub fn fit_groups(groups: Vec<ThreadGroup>, degree: usize, step: f64) -> Vec<FittedGroup> {
    groups
        .into_iter()
        .map(|group| {
            let xs = group.points.iter().map(|p| p.0 as f64).collect::<Vec<_>>();
            let ys = group.points.iter().map(|p| p.1).collect::<Vec<_>>();
            let curve = match (polyfit(&xs, &ys, degree), xs.first(), xs.last()) {
                (Some(poly), Some(&start), Some(&stop)) => sample_curve(&poly, start, stop, step),
                _ => Vec::new(),
            };
            FittedGroup { group, curve }
        })
        .collect()
}
