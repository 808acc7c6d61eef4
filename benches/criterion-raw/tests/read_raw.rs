use std::{fs::write, path::PathBuf};

use common::error::ReportError;
use criterion_raw::result::{RawSample, read_raw_csv};

const HEADER: &str =
    "group,function,value,throughput_num,throughput_type,sample_measured_value,unit,iteration_count";

fn raw_file(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.csv");
    write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn reads_runtime_rows_in_order() {
    let (_dir, path) = raw_file(&format!(
        "{HEADER}\n\
         batched analysis times,engine262,\"2, 8 files\",,,2000000.0,ns,2\n\
         batched analysis times,engine262,\"2, 8 files\",,,4000000.0,ns,2\n"
    ));

    let samples = read_raw_csv(&path).unwrap();
    assert_eq!(
        samples,
        vec![
            RawSample {
                label: "2, 8 files".to_owned(),
                total_elapsed_time: 2_000_000.0,
                iteration_count: 2,
                throughput_count: None,
            },
            RawSample {
                label: "2, 8 files".to_owned(),
                total_elapsed_time: 4_000_000.0,
                iteration_count: 2,
                throughput_count: None,
            },
        ]
    );
    assert_eq!(samples[0].per_iteration_ms(), 1.0);
    assert_eq!(samples[1].per_iteration_ms(), 2.0);
}

#[test]
fn reads_throughput_column() {
    let (_dir, path) = raw_file(&format!(
        "{HEADER}\n\
         batched analysis throughput,engine262,\"2, 8 files\",100,Elements,2000000.0,ns,2\n"
    ));

    let samples = read_raw_csv(&path).unwrap();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].throughput_count, Some(100.0));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new/raw.csv");
    match read_raw_csv(&path) {
        Err(ReportError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn missing_columns_are_named() {
    let (_dir, path) = raw_file("value,sample_measured_value\n\"1, 2 files\",10\n");
    let err = read_raw_csv(&path).unwrap_err();
    assert!(matches!(err, ReportError::Format { .. }));
    assert!(err.to_string().contains("iteration_count"), "{err}");
}

#[test]
fn zero_iterations_are_rejected() {
    let (_dir, path) = raw_file(&format!(
        "{HEADER}\ng,f,\"1, 2 files\",,,10.0,ns,0\n"
    ));
    let err = read_raw_csv(&path).unwrap_err();
    assert!(err.to_string().contains("iteration_count must be positive"), "{err}");
}

#[test]
fn header_only_file_has_no_samples() {
    let (_dir, path) = raw_file(&format!("{HEADER}\n"));
    assert!(read_raw_csv(&path).unwrap().is_empty());
}
