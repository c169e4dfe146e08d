//! Header row detection.

use crate::types::RawTable;

/// Maximum number of leading rows inspected when looking for the header row.
pub const HEADER_SCAN_LIMIT: usize = 100;

const HEADER_MARKERS: [&str; 3] = ["coil current", "contact travel", "dcrm"];

/// Locate the row at which the data-column headers begin.
///
/// A row is the header when its cells, joined with `,` and lower-cased, contain every one of
/// "coil current", "contact travel" and "dcrm". Only the first [`HEADER_SCAN_LIMIT`] rows are
/// scanned. When no row qualifies, row `0` is the header (legacy layout).
pub fn find_header_row(table: &RawTable) -> usize {
    table
        .rows
        .iter()
        .take(HEADER_SCAN_LIMIT)
        .position(|row| is_header_row(row))
        .unwrap_or(0)
}

fn is_header_row(row: &[String]) -> bool {
    let text = row.join(",").to_lowercase();
    HEADER_MARKERS.iter().all(|m| text.contains(m))
}
