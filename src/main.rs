//! CLI entry point for the XContest statistics transformer.
//!
//! Reads an Elasticsearch aggregation response grouped by year, week and
//! country, and writes the same statistics indexed by year, country and ISO
//! week number.

use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use xcontest_stats::{output::write_json, parser::load_document, reshape::transform::transform};

#[derive(Parser)]
#[command(name = "xcontest_stats")]
#[command(
    about = "Transform the input file for statistics",
    long_about = "Transform the input file for statistics.\n\n\
                  Creates a JSON file grouped by year, country and ISO week number."
)]
struct Cli {
    /// Raw aggregation response (JSON) to read
    #[arg(value_name = "FILENAME", value_parser = existing_path)]
    input: PathBuf,

    /// File to write the reshaped statistics to (created or overwritten)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn existing_path(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path '{}' does not exist", s))
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging()?;

    let cli = Cli::parse();

    run(&cli.input, &cli.output)?;

    Ok(())
}

/// Installs a colored stderr layer and, when `LOG_FILE_PATH` is set, a JSON
/// daily-rolling file layer. The returned guard flushes the file writer on drop.
fn init_logging() -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_dir = Path::new(&log_file_path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("logs"));
            let log_file_name = Path::new(&log_file_path)
                .file_name()
                .unwrap_or(OsStr::new("xcontest_stats.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::try_from_env("RUST_LOG_JSON")
                        .unwrap_or_else(|_| EnvFilter::new("debug")),
                );
            (Some(layer), Some(file_guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(guard)
}

/// Loads the raw aggregation, reshapes it and writes the result.
///
/// Nothing is written to `output` unless the whole reshape succeeds.
#[tracing::instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
fn run(input: &Path, output: &Path) -> Result<()> {
    info!("starting transform on {}", input.display());

    let raw = load_document(input)?;
    let reshaped = transform(&raw)
        .with_context(|| format!("failed to reshape {}", input.display()))?;

    let summary = reshaped.summary();
    info!(
        years = summary.years,
        countries = summary.countries,
        records = summary.records,
        "Reshape complete"
    );

    write_json(output, &reshaped)?;

    info!("output saved at {}", output.display());
    Ok(())
}
