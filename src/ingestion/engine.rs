//! Table-to-record ingestion.
//!
//! [`ingest_table`] is a pure function over an already tokenized [`RawTable`]: it detects the
//! header row, reads the metadata preamble, resolves the time axis, parses every channel and
//! groups the channels by name. Either layout is accepted without the caller saying which one
//! is in play.
//!
//! ```rust
//! use dcrm_ingest::ingestion::ingest_table;
//! use dcrm_ingest::types::{RawTable, RecordLayout};
//!
//! let table = RawTable::from_cells(vec![
//!     vec!["Sampling Speed (kC) :", "10"],
//!     vec!["Coil Current 1", "Contact Travel 1", "DCRM Res Ch1"],
//!     vec!["1.0", "2.0", "40"],
//!     vec!["1.5", "2.5", "41"],
//! ]);
//! let record = ingest_table(&table)?;
//! assert_eq!(record.layout, RecordLayout::WithMetadata);
//! assert_eq!(record.time, vec![0.0, 0.0001]);
//! assert_eq!(record.groups.coil_currents, vec!["Coil Current 1"]);
//! # Ok::<(), dcrm_ingest::IngestionError>(())
//! ```

use std::collections::HashSet;

use log::{debug, warn};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{Channel, NormalizedRecord, RawTable, RecordLayout};

use super::cell::number_or_zero;
use super::classify::group_channels;
use super::detect::find_header_row;
use super::metadata::extract_metadata;
use super::time_axis::{TimeSource, resolve_time_source};

/// Normalize a tokenized DCRM table.
///
/// # Errors
///
/// - [`IngestionError::EmptyOrInvalidInput`] when the table has fewer than two rows.
/// - [`IngestionError::NoDataRows`] when no row follows the detected header row.
///
/// Cells that do not parse as numbers are read as `0`, except the time cell of a legacy table:
/// a row whose time does not parse is left out of the time axis and every channel.
pub fn ingest_table(table: &RawTable) -> IngestionResult<NormalizedRecord> {
    if table.row_count() < 2 {
        return Err(IngestionError::EmptyOrInvalidInput {
            rows: table.row_count(),
        });
    }

    let header_row = find_header_row(table);
    let metadata = extract_metadata(table, header_row);
    debug!(
        "header row {header_row}, {} metadata entr{}",
        metadata.len(),
        if metadata.len() == 1 { "y" } else { "ies" }
    );

    let headers: Vec<String> = table.rows[header_row]
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();
    let data_rows = &table.rows[header_row + 1..];
    if data_rows.is_empty() {
        return Err(IngestionError::NoDataRows { header_row });
    }

    let source = resolve_time_source(&metadata, &headers, data_rows);
    let layout = match source {
        TimeSource::Synthesized { .. } => RecordLayout::WithMetadata,
        TimeSource::Column { .. } => RecordLayout::Legacy,
    };

    let columns = channel_columns(&headers, source.time_column());
    let mut time = Vec::with_capacity(data_rows.len());
    let mut channels: Vec<Channel> = columns
        .iter()
        .map(|(_, name)| Channel {
            name: (*name).to_owned(),
            values: Vec::with_capacity(data_rows.len()),
        })
        .collect();

    let mut dropped = 0usize;
    for (i, row) in data_rows.iter().enumerate() {
        let Some(t) = source.time_at(i, row) else {
            dropped += 1;
            continue;
        };
        time.push(t);
        for (channel, (col, _)) in channels.iter_mut().zip(columns.iter()) {
            channel.values.push(number_or_zero(row.get(*col).map(String::as_str)));
        }
    }

    if dropped > 0 {
        debug!("dropped {dropped} row(s) with unparsable time");
    }
    if time.is_empty() {
        warn!("no data row has a parsable time value; record has no channels");
        channels.clear();
    }

    let groups = group_channels(channels.iter().map(|c| c.name.as_str()));

    Ok(NormalizedRecord {
        metadata,
        time,
        channels,
        groups,
        layout,
        header_row,
    })
}

/// Data columns as `(index, name)`: non-empty headers, the time column excluded, and each name
/// taken from its first column only.
fn channel_columns(headers: &[String], time_column: Option<usize>) -> Vec<(usize, &str)> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(headers.len());

    for (idx, name) in headers.iter().enumerate() {
        if name.is_empty() || Some(idx) == time_column {
            continue;
        }
        if !seen.insert(name.as_str()) {
            warn!("duplicate column '{name}' at index {idx} ignored");
            continue;
        }
        columns.push((idx, name.as_str()));
    }

    columns
}
