use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion, processing and session functions.
///
/// Structural problems fail the whole call; cell-level numeric problems never surface here
/// (they are coerced to `0` or, for a legacy time cell, drop the row).
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV tokenizer rejected the input.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The table has fewer than two rows, so there cannot be a header and data.
    #[error("file is empty or invalid: found {rows} row(s), need at least 2")]
    EmptyOrInvalidInput { rows: usize },

    /// Nothing follows the detected header row.
    #[error("no data found after header row {header_row}")]
    NoDataRows { header_row: usize },

    /// The path does not name a supported delimited-text file.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// A row range does not fit inside the record.
    #[error("invalid row range [{start}, {end}] for record of {len} row(s)")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// A channel name that is not present in the record.
    #[error("unknown channel '{name}'")]
    UnknownChannel { name: String },

    /// A session operation that needs a record was called before one was loaded.
    #[error("no record loaded")]
    NoRecordLoaded,

    /// Configuration could not be loaded.
    #[error("config error: {message}")]
    Config { message: String },
}
