use std::path::PathBuf;

use thiserror::Error;

/// Failure to fetch a range from the tabular data source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid range specifier: {0}")]
    InvalidRange(String),

    #[error("Sheet export not found at {0}")]
    SheetNotFound(PathBuf),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),
}
