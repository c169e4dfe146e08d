//! `dcrm-ingest` reads circuit-breaker DCRM (dynamic contact resistance measurement) test records
//! exported as delimited text into a [`types::NormalizedRecord`]: a time axis, numeric channels in
//! header order, a semantic grouping of those channels and the test metadata.
//!
//! The primary entrypoint is [`ingestion::ingest_from_path`], which picks the delimiter from the
//! file extension (or you can force a format via [`ingestion::IngestionOptions`]).
//!
//! ## Supported layouts
//!
//! Two layouts are detected automatically:
//!
//! - **With metadata**: key/value rows (`Sampling Speed,10,...` in kHz) above a header row that names
//!   coil current, contact travel and DCRM channels. Time is synthesized from the sampling rate.
//! - **Legacy**: the header is the first row. Time is read from a column named like `time`, or
//!   from the first column whose leading values never decrease.
//!
//! Non-numeric cells read as `0`. In the legacy layout a row without a usable time value is
//! dropped.
//!
//! ## Quick example: ingest a file
//!
//! ```no_run
//! use dcrm_ingest::ingestion::{ingest_from_path, IngestionOptions};
//!
//! # fn main() -> Result<(), dcrm_ingest::IngestionError> {
//! let record = ingest_from_path("breaker_test.csv", &IngestionOptions::default())?;
//! println!("rows={} channels={}", record.row_count(), record.channels.len());
//! for name in &record.groups.dcrm_resistance {
//!     println!("resistance channel: {name}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## In-memory example
//!
//! ```rust
//! use dcrm_ingest::ingestion::ingest_from_str;
//! use dcrm_ingest::types::RecordLayout;
//!
//! let text = "Sampling Speed,10\n\
//!             Coil Current 1,Contact Travel 1,DCRM Res Ch1\n\
//!             1.5,10,200\n\
//!             1.6,11,210\n";
//! let record = ingest_from_str(text)?;
//!
//! assert_eq!(record.layout, RecordLayout::WithMetadata);
//! assert_eq!(record.metadata["Sampling Speed"], "10");
//! // 10 kHz sampling gives a 0.1 ms step.
//! assert_eq!(record.time, vec![0.0, 0.0001]);
//! assert_eq!(record.groups.coil_currents, vec!["Coil Current 1".to_string()]);
//! # Ok::<(), dcrm_ingest::IngestionError>(())
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: layout detection, metadata, time axis, grouping and the file entrypoints
//! - [`types`]: raw table and normalized record types
//! - [`units`]: unit categories, conversion and display preferences
//! - [`processing`]: row ranges, range statistics and display downsampling
//! - [`session`]: selection, range and editable working copy around one record
//! - [`export`]: CSV writers for edited records and row ranges
//! - [`rules`]: ordered name-matching tables shared by grouping and unit classification
//! - [`error`]: error types used across the crate

pub mod error;
pub mod export;
pub mod ingestion;
pub mod processing;
pub mod rules;
pub mod session;
pub mod types;
pub mod units;

pub use error::{IngestionError, IngestionResult};
