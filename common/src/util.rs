use std::{
    fs::{create_dir_all, write},
    path::{Path, PathBuf},
    process::Command,
};

use eyre::{Result, WrapErr, bail};
use serde::Serialize;
use tracing::debug;

/// Arithmetic mean, `None` for an empty iterator
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), x| (sum + x, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Serializes `data` to `<plot_data_dir>/<stem>.json`, creating the folder if needed
pub fn write_plot_data<T: Serialize>(data: &T, plot_data_dir: &Path, stem: &str) -> Result<PathBuf> {
    if !plot_data_dir.exists() {
        create_dir_all(plot_data_dir)
            .wrap_err_with(|| format!("Create plot data dir {plot_data_dir:?}"))?;
    }
    let path = plot_data_dir.join(format!("{stem}.json"));
    write(&path, serde_json::to_string(data)?).wrap_err_with(|| format!("Write {path:?}"))?;
    Ok(path)
}

/// Runs a plotting script and waits for it to exit
pub fn plot_python(python: &str, script: &Path, args: &[(String, String)]) -> Result<()> {
    let mut cmd = Command::new(python);
    cmd.arg(script);
    for (flag, value) in args {
        cmd.arg(flag).arg(value);
    }
    debug!("Running {cmd:?}");

    let status = cmd
        .spawn()
        .wrap_err_with(|| format!("Spawn {python} {script:?}"))?
        .wait()
        .wrap_err_with(|| format!("Wait for {script:?}"))?;
    if !status.success() {
        bail!("Plot script {script:?} exited with {status}");
    }
    Ok(())
}
