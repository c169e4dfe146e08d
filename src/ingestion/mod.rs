//! Ingestion entrypoints and implementations.
//!
//! The pipeline, leaf-first:
//!
//! - [`detect`]: find the data-column header row
//! - [`metadata`]: read key/value pairs from the preamble above it
//! - [`time_axis`]: synthesize time from the sampling rate, or locate the time column
//! - [`classify`]: assign every channel to a group
//! - [`engine`]: run the above over a [`crate::types::RawTable`]
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]), which tokenizes the file with
//! [`csv`] first and reports the outcome to an optional [`IngestionObserver`].

pub mod cell;
pub mod classify;
pub mod csv;
pub mod detect;
pub mod engine;
pub mod metadata;
pub mod observability;
pub mod time_axis;
pub mod unified;

pub use classify::{classify_channel, group_channels};
pub use engine::ingest_table;
pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    LogObserver,
};
pub use unified::{IngestionFormat, IngestionOptions, ingest_from_path, ingest_from_reader, ingest_from_str};
