use core::fmt::Debug;
use std::path::PathBuf;

use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::Settings,
    util::{plot_python, write_plot_data},
};

/// A scatter series and the trend line drawn over it
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend entry
    pub label: String,
    pub points: Vec<(f64, f64)>,
    /// Drawn unlabelled, in a neutral colour
    pub curve: Vec<(f64, f64)>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_max: f64,
    /// Covers the trend lines as well as the points
    pub y_min: f64,
    pub y_max: f64,
    pub series: Vec<Series>,
}

/// Panels are laid out left to right in order
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub name: String,
    pub panels: Vec<Panel>,
}

/// Something that can draw a [`Figure`]
pub trait Render: Debug {
    fn render(&self, figure: &Figure) -> Result<()>;
}

/// Hands the figure to a matplotlib script through a json file
#[derive(Debug, Clone)]
pub struct PythonRender {
    pub python: String,
    pub script: PathBuf,
    pub data_dir: PathBuf,
    pub output: Option<PathBuf>,
}

impl PythonRender {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            python: settings.python.clone(),
            script: settings.plot_script.clone(),
            data_dir: settings.plot_data_dir.clone(),
            output: settings.output.clone(),
        }
    }
}

impl Render for PythonRender {
    fn render(&self, figure: &Figure) -> Result<()> {
        let data_file = write_plot_data(figure, &self.data_dir, &figure.name)
            .wrap_err_with(|| format!("Write plot data for {}", figure.name))?;
        debug!("Plot data for {} in {data_file:?}", figure.name);

        let data_arg = data_file.to_string_lossy().into_owned();
        let mut args = vec![("--data".to_owned(), data_arg)];
        if let Some(output) = &self.output {
            args.push(("--filepath".to_owned(), output.to_string_lossy().into_owned()));
        }
        plot_python(&self.python, &self.script, &args)
    }
}
