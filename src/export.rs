//! Text exports of a record.
//!
//! [`write_edited_csv`] produces the layout the instrument software reads back: metadata lines,
//! a blank line, a header of channel names with a trailing `, ,` separator column, then one
//! line per sample with the time (2 decimals) after the separator. Lines end with CRLF.
//!
//! Re-ingesting such a file yields the metadata layout only when metadata lines are present and
//! the channel names mention coil current, contact travel and DCRM; otherwise it reads as legacy.
//!
//! [`write_range_csv`] is a plain CSV of `Time` plus every channel for a row range.

use std::io::Write;

use crate::error::IngestionResult;
use crate::processing::RowRange;
use crate::types::{Channel, Metadata, NormalizedRecord};

/// Write channels in the instrument's export layout.
///
/// A channel shorter than `time` is padded with `0.000`.
pub fn write_edited_csv<W: Write>(
    mut out: W,
    metadata: &Metadata,
    channels: &[Channel],
    time: &[f64],
) -> IngestionResult<()> {
    if !metadata.is_empty() {
        for (key, value) in metadata {
            write!(out, "{key},{value},\r\n")?;
        }
        write!(out, "\r\n")?;
    }

    let names: Vec<&str> = channels.iter().map(|c| c.name.as_str()).collect();
    write!(out, "{}, ,\r\n", names.join(","))?;

    for (i, t) in time.iter().enumerate() {
        let row: Vec<String> = channels
            .iter()
            .map(|c| fixed(c.values.get(i).copied().unwrap_or(0.0), 3))
            .collect();
        write!(out, "{} ,{},\r\n", row.join(","), fixed(*t, 2))?;
    }

    out.flush()?;
    Ok(())
}

/// [`write_edited_csv`] for an unedited record, into a `String`.
pub fn edited_csv_string(record: &NormalizedRecord) -> IngestionResult<String> {
    let mut buf = Vec::new();
    write_edited_csv(&mut buf, &record.metadata, &record.channels, &record.time)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `Time` and every channel for the rows in `range`, in base units.
pub fn write_range_csv<W: Write>(out: W, record: &NormalizedRecord, range: RowRange) -> IngestionResult<()> {
    range.validate(record.row_count())?;

    let mut wtr = csv::Writer::from_writer(out);
    let mut header = vec!["Time"];
    header.extend(record.channel_names());
    wtr.write_record(&header)?;

    for i in range.indices() {
        let mut row = Vec::with_capacity(record.channels.len() + 1);
        row.push(record.time[i].to_string());
        row.extend(record.channels.iter().map(|c| c.values[i].to_string()));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Fixed-point text with `-0` printed as `0`.
fn fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value + 0.0)
}
