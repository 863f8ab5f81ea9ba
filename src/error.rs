//! Error types for the bucketing pipeline.
//!
//! Only fatal conditions live here. Per-row data problems (bad dates, blank
//! optional cells) degrade to "no date" or blank and never surface as errors.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Unsupported input {}. Use .xlsx/.xls or .csv", .0.display())]
    UnsupportedInput(PathBuf),

    #[error(
        "Missing required columns in export: {}\n\nColumns found:\n- {}",
        .missing.join(", "),
        .found.join("\n- ")
    )]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("Workbook {} has no worksheets", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
