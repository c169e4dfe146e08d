//! Metadata preamble extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Metadata, RawTable};

/// Section titles that appear in the preamble but are not parameters.
pub const RESERVED_SECTION_KEYS: [&str; 4] = ["HEADER", "SETTINGS", "Velocity Points", "Travel Results"];

static TRAILING_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*:\s*$").expect("valid regex"));

/// Extract key/value pairs from the rows before `header_row`.
///
/// Each preamble row is read as consecutive `(key, value)` cell pairs. A pair is kept only when
/// both trimmed cells are non-empty. The key loses a trailing colon; keys naming a reserved
/// section ([`RESERVED_SECTION_KEYS`], case-insensitive) are skipped. A repeated key keeps the
/// last value seen at the position where it first appeared.
pub fn extract_metadata(table: &RawTable, header_row: usize) -> Metadata {
    let mut metadata = Metadata::new();

    for row in table.rows.iter().take(header_row) {
        for pair in row.chunks(2) {
            let key = pair[0].trim();
            let value = pair.get(1).map(|v| v.trim()).unwrap_or("");
            if key.is_empty() || value.is_empty() {
                continue;
            }

            let key = clean_key(key);
            if key.is_empty() || is_reserved(&key) {
                continue;
            }
            metadata.insert(key, value.to_owned());
        }
    }

    metadata
}

fn clean_key(key: &str) -> String {
    TRAILING_COLON.replace(key, "").trim().to_owned()
}

fn is_reserved(key: &str) -> bool {
    RESERVED_SECTION_KEYS
        .iter()
        .any(|r| r.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_colon_and_whitespace_from_key() {
        let t = RawTable::from_cells(vec![
            vec!["Sampling Speed (kC) :", "10", "", ""],
            vec!["Coil Current", "Contact Travel", "DCRM"],
        ]);
        let md = extract_metadata(&t, 1);
        assert_eq!(md.len(), 1);
        assert_eq!(md.get("Sampling Speed (kC)").map(String::as_str), Some("10"));
    }

    #[test]
    fn reads_several_pairs_per_row() {
        let t = RawTable::from_cells(vec![vec!["Breaker:", "CB-12", "Operator", " Ana ", "Odd"]]);
        let md = extract_metadata(&t, 1);
        assert_eq!(md.get("Breaker").map(String::as_str), Some("CB-12"));
        assert_eq!(md.get("Operator").map(String::as_str), Some("Ana"));
        assert!(!md.contains_key("Odd"));
    }

    #[test]
    fn skips_reserved_sections_case_insensitively() {
        let t = RawTable::from_cells(vec![
            vec!["header", "x"],
            vec!["SETTINGS:", "y"],
            vec!["velocity points", "z"],
            vec!["Travel Results", "w"],
            vec!["Travel Results Extra", "kept"],
        ]);
        let md = extract_metadata(&t, 5);
        assert_eq!(md.len(), 1);
        assert!(md.contains_key("Travel Results Extra"));
    }

    #[test]
    fn pairs_with_empty_side_are_dropped() {
        let t = RawTable::from_cells(vec![vec!["Key", "  "], vec!["", "value"], vec![" : ", "v"]]);
        assert!(extract_metadata(&t, 3).is_empty());
    }

    #[test]
    fn later_duplicate_key_wins() {
        let t = RawTable::from_cells(vec![vec!["Station", "A"], vec!["Station :", "B"]]);
        let md = extract_metadata(&t, 2);
        assert_eq!(md.get("Station").map(String::as_str), Some("B"));
    }

    #[test]
    fn keys_keep_file_order() {
        let t = RawTable::from_cells(vec![
            vec!["Zone", "1", "Breaker", "CB1"],
            vec!["Zone", "2", "Area", "North"],
        ]);
        let md = extract_metadata(&t, 2);
        let keys: Vec<&str> = md.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Zone", "Breaker", "Area"]);
        assert_eq!(md["Zone"], "2");
    }

    #[test]
    fn header_row_zero_means_no_preamble() {
        let t = RawTable::from_cells(vec![vec!["Time", "1"]]);
        assert!(extract_metadata(&t, 0).is_empty());
    }
}
