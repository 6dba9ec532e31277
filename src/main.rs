//! CLI entry point for the SETs cleaner.
//!
//! Walks a directory of raw course-evaluation CSVs, cleans and aggregates
//! each file, and writes the results to a mirrored output tree.

use anyhow::Result;
use clap::Parser;
use sets_cleaner::output::{append_record, print_json};
use sets_cleaner::walker::{CleanOptions, process_directory};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sets_cleaner")]
#[command(about = "Clean and aggregate scraped course-evaluation CSVs", long_about = None)]
struct Cli {
    /// Directory of raw CSVs to clean
    #[arg(short, long, env = "SETS_INPUT_DIR", default_value = "csv")]
    input_dir: String,

    /// Directory the cleaned CSVs are written to
    #[arg(short, long, env = "SETS_OUTPUT_DIR", default_value = "csv_cleaned")]
    output_dir: String,

    /// Optional: CSV file to append the run summary to
    #[arg(long)]
    summary: Option<String>,

    /// Abort on the first malformed grade or failed file
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/sets_cleaner.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sets_cleaner.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let options = CleanOptions { strict: cli.strict };

    info!(
        input_dir = %cli.input_dir,
        output_dir = %cli.output_dir,
        strict = cli.strict,
        "Starting cleaning run"
    );

    let stats = process_directory(
        Path::new(&cli.input_dir),
        Path::new(&cli.output_dir),
        &options,
    )?;

    print_json(&stats)?;
    if let Some(summary) = cli.summary {
        append_record(&summary, &stats)?;
    }

    info!(
        files_written = stats.files_written,
        files_failed = stats.files_failed,
        "Cleaning run finished"
    );
    Ok(())
}
