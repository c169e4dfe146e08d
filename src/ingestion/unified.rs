//! Path-based ingestion entrypoint.
//!
//! [`ingest_from_path`] tokenizes a delimited text file, normalizes it with
//! [`super::engine::ingest_table`] and reports the outcome to an optional
//! [`IngestionObserver`].
//!
//! - If [`IngestionOptions::format`] is `None`, the delimiter is inferred from the file
//!   extension (`.csv` → comma, `.tsv` → tab).
//! - The file is read completely before parsing and closed on every exit path.

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::NormalizedRecord;

use super::csv::{read_table_from_path, read_table_from_reader};
use super::engine::ingest_table;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Delimited-text flavours accepted at the file boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
}

impl IngestionFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            _ => None,
        }
    }

    /// Field delimiter byte.
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }
}

/// Options controlling path-based ingestion.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<IngestionFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Ingest a DCRM export from disk.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` with row/channel counts and the detected layout
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use dcrm_ingest::ingestion::{ingest_from_path, IngestionOptions, LogObserver};
///
/// # fn main() -> Result<(), dcrm_ingest::IngestionError> {
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(LogObserver)),
///     ..Default::default()
/// };
/// let record = ingest_from_path("breaker_52.csv", &opts)?;
/// println!("{} samples, {} channels", record.row_count(), record.channels.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<NormalizedRecord> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = IngestionContext {
        path: path.to_path_buf(),
        format,
    };

    let result = read_table_from_path(path, format.delimiter()).and_then(|table| ingest_table(&table));

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(record) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: record.row_count(),
                    channels: record.channels.len(),
                    layout: record.layout,
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Ingest delimited text from a reader (no observer reporting).
pub fn ingest_from_reader<R: Read>(reader: R, format: IngestionFormat) -> IngestionResult<NormalizedRecord> {
    let table = read_table_from_reader(reader, format.delimiter())?;
    ingest_table(&table)
}

/// Ingest comma-separated text held in memory.
pub fn ingest_from_str(input: &str) -> IngestionResult<NormalizedRecord> {
    ingest_from_reader(input.as_bytes(), IngestionFormat::Csv)
}

/// Severity assigned to a failed ingestion.
pub fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        IngestionError::EmptyOrInvalidInput { .. }
        | IngestionError::NoDataRows { .. }
        | IngestionError::UnsupportedFormat { .. }
        | IngestionError::InvalidRange { .. }
        | IngestionError::UnknownChannel { .. }
        | IngestionError::NoRecordLoaded
        | IngestionError::Config { .. } => IngestionSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> IngestionResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestionError::UnsupportedFormat {
            message: format!("cannot infer format: path has no extension ({})", path.display()),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| IngestionError::UnsupportedFormat {
        message: format!("cannot infer format from extension '{ext}' for path ({})", path.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_from_extension() {
        assert_eq!(IngestionFormat::from_extension("CSV"), Some(IngestionFormat::Csv));
        assert_eq!(IngestionFormat::from_extension("tsv"), Some(IngestionFormat::Tsv));
        assert_eq!(IngestionFormat::from_extension("xlsx"), None);
        assert_eq!(IngestionFormat::Tsv.delimiter(), b'\t');
    }

    #[test]
    fn unknown_extension_is_rejected_before_io() {
        let err = ingest_from_path("record.xlsx", &IngestionOptions::default()).unwrap_err();
        assert!(matches!(err, IngestionError::UnsupportedFormat { .. }));
        assert_eq!(severity_for_error(&err), IngestionSeverity::Error);
    }

    #[test]
    fn structural_errors_are_not_critical() {
        let err = ingest_from_str("only one row\n").unwrap_err();
        assert_eq!(severity_for_error(&err), IngestionSeverity::Error);
    }

    #[test]
    fn io_errors_are_critical() {
        let err = IngestionError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(severity_for_error(&err), IngestionSeverity::Critical);
    }
}
