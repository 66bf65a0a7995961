use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the persisted tables and the map. All fatal.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Output path '{0}' exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("I/O error writing table '{0}'")]
    TableWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing table '{0}'")]
    TableWritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed to read table '{0}'")]
    TableRead(PathBuf, #[source] PolarsError),

    #[error("Required column '{column}' missing or mistyped in '{path}'")]
    Column {
        path: PathBuf,
        column: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Row {row} of '{path}' has no value in column '{column}'")]
    MissingValue {
        path: PathBuf,
        row: usize,
        column: &'static str,
    },

    #[error("Unknown status '{value}' in row {row} of '{path}'")]
    UnknownStatus {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("Table '{0}' has no rows")]
    EmptyTable(PathBuf),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Failed to write map '{0}'")]
    MapWrite(PathBuf, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
