use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use batched_analysis::{BatchedAnalysis, index::list_configurations};
use clap::{Parser, Subcommand};
use common::{config::Settings, plot::PythonRender};
use eyre::{Result, WrapErr};
use tracing::{debug, error};
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_CONFIG: &str = "report.yaml";
const MODULES: &[&str] = &["batched_analysis", "criterion_raw", "common"];

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Settings file, defaults to report.yaml when present
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Criterion output folder
    #[arg(long)]
    criterion_dir: Option<PathBuf>,
    /// Benchmark group inside the criterion folder
    #[arg(long)]
    group: Option<String>,
    #[arg(short, long)]
    log: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plot runtime and throughput per batch size
    Plot {
        /// Save the figure instead of showing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List discovered configurations
    Ls,
    /// Print the aggregated metrics
    Print,
}

fn main() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let args = Cli::parse();
    let file_appender = tracing_appender::rolling::never(".", "log.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let mut env_filter = EnvFilter::new(format!("batched_analysis_report={log_level}"));
    for log in &args.log {
        env_filter = env_filter.add_directive(log.parse()?);
    }
    for module in MODULES {
        if !args.log.iter().any(|x| x.starts_with(module)) {
            env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(layer().with_writer(non_blocking))
        .init();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(criterion_dir) = args.criterion_dir {
        settings.criterion_dir = criterion_dir;
    }
    if let Some(group) = args.group {
        settings.group = group;
    }

    let result = match args.command {
        Commands::Plot { output } => {
            if output.is_some() {
                settings.output = output;
            }
            plot(settings)
        }
        Commands::Ls => list(&settings),
        Commands::Print => print_metrics(settings),
    };
    if let Err(err) = &result {
        error!("{err:#?}");
    }
    result
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).exists() => Path::new(DEFAULT_CONFIG),
        None => {
            debug!("No {DEFAULT_CONFIG}, using default settings");
            return Ok(Settings::default());
        }
    };
    let contents = read_to_string(path).wrap_err_with(|| format!("Read settings {path:?}"))?;
    serde_yml::from_str(&contents).wrap_err_with(|| format!("Parse settings {path:?}"))
}

fn plot(settings: Settings) -> Result<()> {
    let render = PythonRender::from_settings(&settings);
    BatchedAnalysis::new(settings)?.plot(&render)
}

fn list(settings: &Settings) -> Result<()> {
    for (kind, dir, label) in list_configurations(settings)? {
        println!(
            "{kind:<10} {:<16} -> {}",
            label.to_string(),
            dir.file_name().unwrap_or_default().to_string_lossy()
        );
    }
    Ok(())
}

fn print_metrics(settings: Settings) -> Result<()> {
    let table = BatchedAnalysis::new(settings)?.metrics()?;
    println!(
        "{:>8} {:>8} {:>14} {:>16}",
        "threads", "files", "runtime (ms)", "records / ms"
    );
    for (label, metrics) in table.iter() {
        println!(
            "{:>8} {:>8} {:>14.4} {:>16.4}",
            label.thread_count.as_str(),
            label.batch_size,
            metrics.mean_runtime_ms,
            metrics.mean_throughput_per_ms
        );
    }
    Ok(())
}
