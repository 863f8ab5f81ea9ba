//! CLI entry point for the UPS maintenance bucketing tool.
//!
//! Splits a UPS asset export by contact into battery and unit urgency
//! buckets (CSV) and writes a summary report.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use ups_buckets::classify::Bucket;
use ups_buckets::config::ColumnCandidates;
use ups_buckets::pipeline::run;

#[derive(Parser)]
#[command(name = "ups_buckets")]
#[command(
    about = "Split a UPS export by Contact into Battery/Unit buckets (CSV)",
    long_about = None
)]
struct Cli {
    /// Path to the export (.xlsx, .xls or .csv)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory root
    #[arg(short, long, default_value = "out")]
    outdir: PathBuf,

    /// Optional JSON file overriding accepted column names
    #[arg(short, long, value_name = "FILE")]
    columns: Option<PathBuf>,

    /// Reference day for due-date math (YYYY-MM-DD); defaults to today
    #[arg(long, value_name = "DATE")]
    run_date: Option<NaiveDate>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/ups_buckets.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ups_buckets.log"));

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

    let candidates = match &cli.columns {
        Some(path) => {
            info!(path = %path.display(), "Loading column overrides");
            ColumnCandidates::load(path)?
        }
        None => ColumnCandidates::default(),
    };

    // Captured once; every row and the output folder share it.
    let run_date = cli.run_date.unwrap_or_else(|| Local::now().date_naive());

    let report = run(&cli.input, &cli.outdir, &candidates, run_date)?;

    info!(
        rows_loaded = report.rows_loaded,
        rows_dropped = report.rows_dropped,
        records = report.records,
        battery_files = report.written.battery_files.len(),
        unit_files = report.written.unit_files.len(),
        "Done"
    );
    let out_root = report
        .out_root
        .canonicalize()
        .unwrap_or_else(|_| report.out_root.clone());
    info!(output = %out_root.display(), "Output folder");
    info!(
        example = %report
            .out_root
            .join("by_contact")
            .join("UNASSIGNED")
            .join("batteries")
            .join(Bucket::Overdue.file_name())
            .display(),
        "Example path"
    );

    Ok(())
}
