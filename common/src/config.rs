use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Criterion output folder, ie. target/criterion
    pub criterion_dir: PathBuf,
    /// Benchmark group holding both result roots
    pub group: String,
    pub runtime_dir: String,
    pub throughput_dir: String,
    /// Location of the sample file inside each configuration folder
    pub raw_file: PathBuf,
    pub fit_degree: usize,
    pub curve_step: f64,
    pub python: String,
    pub plot_script: PathBuf,
    pub plot_data_dir: PathBuf,
    /// Save the figure here instead of showing it
    pub output: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            criterion_dir: PathBuf::from("target/criterion"),
            group: "engine262".to_owned(),
            runtime_dir: "batched analysis times".to_owned(),
            throughput_dir: "batched analysis throughput".to_owned(),
            raw_file: PathBuf::from("new/raw.csv"),
            fit_degree: 10,
            curve_step: 0.01,
            python: "python3".to_owned(),
            plot_script: PathBuf::from("plots/batched_analysis.py"),
            plot_data_dir: PathBuf::from("plot_data"),
            output: None,
        }
    }
}

impl Settings {
    pub fn group_path(&self) -> PathBuf {
        self.criterion_dir.join(&self.group)
    }

    pub fn runtime_root(&self) -> PathBuf {
        self.group_path().join(&self.runtime_dir)
    }

    pub fn throughput_root(&self) -> PathBuf {
        self.group_path().join(&self.throughput_dir)
    }

    pub fn raw_file_in(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.raw_file)
    }
}
