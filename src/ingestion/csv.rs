//! CSV tokenizing into a [`RawTable`].
//!
//! The reader does not assume a header row or a fixed column count. Rows containing only
//! blank cells are skipped, cells keep their text as-is, and bytes that are not valid UTF-8
//! (instrument software often writes `µ` in a legacy code page) are replaced rather than
//! rejected.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::IngestionResult;
use crate::types::RawTable;

/// Read a delimited text file into a [`RawTable`].
pub fn read_table_from_path(path: impl AsRef<Path>, delimiter: u8) -> IngestionResult<RawTable> {
    let file = File::open(path)?;
    read_table_from_reader(file, delimiter)
}

/// Read delimited text from an in-memory string.
pub fn read_table_from_str(input: &str, delimiter: u8) -> IngestionResult<RawTable> {
    read_table_from_reader(input.as_bytes(), delimiter)
}

/// Read delimited text from any reader.
pub fn read_table_from_reader<R: Read>(reader: R, delimiter: u8) -> IngestionResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut record = csv::ByteRecord::new();
    while rdr.read_byte_record(&mut record)? {
        let row: Vec<String> = record
            .iter()
            .map(|cell| String::from_utf8_lossy(cell).into_owned())
            .collect();
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(RawTable::new(rows))
}
