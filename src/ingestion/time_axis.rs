//! Time axis resolution.
//!
//! A record read from the metadata layout has no time column: time is synthesized from the
//! sampling rate stated in the preamble. A legacy record carries time in one of its columns,
//! and a row whose time cell does not parse is dropped from the record altogether.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::types::Metadata;

use super::cell::parse_number;

/// Sampling interval (seconds) assumed when the preamble does not state a usable rate (10 kHz).
pub const DEFAULT_SAMPLING_INTERVAL: f64 = 0.0001;

/// Number of leading data rows sampled when testing whether column 0 holds time.
pub const TIME_SAMPLE_LIMIT: usize = 100;

static FIRST_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+\.?[0-9]*)").expect("valid regex"));

/// Where the time value of each data row comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeSource {
    /// `time[i] = i * interval`; every row is kept.
    Synthesized { interval: f64 },
    /// Time is read from column `index`; rows whose cell does not parse are dropped.
    Column { index: usize },
}

impl TimeSource {
    /// Time of data row `row_index`, or `None` if the row must be dropped.
    pub fn time_at(&self, row_index: usize, row: &[String]) -> Option<f64> {
        match *self {
            TimeSource::Synthesized { interval } => Some(row_index as f64 * interval),
            TimeSource::Column { index } => row.get(index).and_then(|c| parse_number(c)),
        }
    }

    /// Column holding time, if time is read from the data.
    pub fn time_column(&self) -> Option<usize> {
        match *self {
            TimeSource::Synthesized { .. } => None,
            TimeSource::Column { index } => Some(index),
        }
    }
}

/// Decide how time is obtained for a record.
///
/// Non-empty metadata means the metadata layout, so time is synthesized with
/// [`sampling_interval`]. Otherwise a time column is located among `headers`.
pub fn resolve_time_source(metadata: &Metadata, headers: &[String], data_rows: &[Vec<String>]) -> TimeSource {
    if !metadata.is_empty() {
        let interval = sampling_interval(metadata);
        debug!("metadata preamble present; synthesizing time at {interval} s per sample");
        return TimeSource::Synthesized { interval };
    }

    let index = locate_time_column(headers, data_rows);
    debug!("legacy layout; time read from column {index}");
    TimeSource::Column { index }
}

/// Sampling interval in seconds from the first metadata key (in file order) mentioning
/// "sampling speed".
///
/// The first decimal number in that key's value is a rate in kHz. Falls back to
/// [`DEFAULT_SAMPLING_INTERVAL`] when there is no such key, no number, or a zero rate.
pub fn sampling_interval(metadata: &Metadata) -> f64 {
    let Some((_, value)) = metadata
        .iter()
        .find(|(k, _)| k.to_lowercase().contains("sampling speed"))
    else {
        return DEFAULT_SAMPLING_INTERVAL;
    };

    let rate_khz = FIRST_DECIMAL
        .find(value)
        .and_then(|m| m.as_str().parse::<f64>().ok());

    match rate_khz {
        Some(rate) if rate > 0.0 => 1.0 / (rate * 1000.0),
        _ => DEFAULT_SAMPLING_INTERVAL,
    }
}

/// Pick the time column of a legacy table.
///
/// Column 0 wins when its header is "time" or its sampled values never decrease. Otherwise the
/// first header equal to "time" (case-insensitive) is used, and column 0 as a last resort.
pub fn locate_time_column(headers: &[String], data_rows: &[Vec<String>]) -> usize {
    let first_is_time = headers
        .first()
        .is_some_and(|h| h.eq_ignore_ascii_case("time"));

    let samples: Vec<f64> = data_rows
        .iter()
        .take(TIME_SAMPLE_LIMIT)
        .filter_map(|r| r.first().and_then(|c| parse_number(c)))
        .collect();

    if first_is_time || is_non_decreasing(&samples) {
        return 0;
    }

    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("time"))
        .unwrap_or(0)
}

/// Whether every value is `>=` its predecessor. Empty and single-value slices qualify.
pub fn is_non_decreasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[1] >= w[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn metadata(pairs: &[(&str, &str)]) -> Metadata {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn ten_khz_gives_one_tenth_millisecond() {
        let md = metadata(&[("Sampling Speed (kC)", "10")]);
        assert_eq!(sampling_interval(&md), 0.0001);
    }

    #[test]
    fn first_sampling_key_in_file_order_wins() {
        let md = metadata(&[("Sampling Speed", "20"), ("Actual Sampling Speed", "10")]);
        assert_eq!(sampling_interval(&md), 1.0 / 20_000.0);
    }

    #[test]
    fn missing_sampling_key_uses_default() {
        assert_eq!(sampling_interval(&metadata(&[("Breaker", "CB1")])), DEFAULT_SAMPLING_INTERVAL);
    }

    #[test]
    fn sampling_value_with_text_and_fraction() {
        let md = metadata(&[("SAMPLING SPEED", "approx 2.5 kHz")]);
        assert!((sampling_interval(&md) - 0.0004).abs() < 1e-15);
    }

    #[test]
    fn unusable_sampling_values_use_default() {
        for v in ["fast", "0", "0.0", "\u{0661}\u{0660}"] {
            let md = metadata(&[("Sampling Speed", v)]);
            assert_eq!(sampling_interval(&md), DEFAULT_SAMPLING_INTERVAL, "value {v}");
        }
    }

    #[test]
    fn metadata_selects_synthesized_time() {
        let md = metadata(&[("Sampling Speed", "20")]);
        let src = resolve_time_source(&md, &strings(&["Time", "A"]), &[]);
        assert_eq!(src, TimeSource::Synthesized { interval: 1.0 / 20_000.0 });
        assert_eq!(src.time_column(), None);
        let t = src.time_at(3, &[]).unwrap();
        assert!((t - 0.00015).abs() < 1e-15);
    }

    #[test]
    fn monotonic_first_column_is_time() {
        let rows = vec![strings(&["0", "5"]), strings(&["x", "4"]), strings(&["1", "3"])];
        assert_eq!(locate_time_column(&strings(&["t", "Time"]), &rows), 0);
    }

    #[test]
    fn explicit_time_header_used_when_first_column_decreases() {
        let rows = vec![strings(&["5", "0"]), strings(&["4", "1"])];
        assert_eq!(locate_time_column(&strings(&["A", "TIME"]), &rows), 1);
    }

    #[test]
    fn time_header_in_first_column_wins_even_if_not_monotonic() {
        let rows = vec![strings(&["5", "0"]), strings(&["4", "1"])];
        assert_eq!(locate_time_column(&strings(&["time", "Time"]), &rows), 0);
    }

    #[test]
    fn falls_back_to_first_column() {
        let rows = vec![strings(&["5", "0"]), strings(&["4", "1"])];
        assert_eq!(locate_time_column(&strings(&["A", "B"]), &rows), 0);
    }

    #[test]
    fn only_leading_rows_are_sampled() {
        let mut rows: Vec<Vec<String>> = (0..TIME_SAMPLE_LIMIT)
            .map(|i| strings(&[i.to_string().as_str(), "0"]))
            .collect();
        rows.push(strings(&["-1", "0"]));
        assert_eq!(locate_time_column(&strings(&["A", "Time"]), &rows), 0);
    }

    #[test]
    fn column_source_drops_unparsable_cells() {
        let src = TimeSource::Column { index: 1 };
        assert_eq!(src.time_at(0, &strings(&["a", "0.5"])), Some(0.5));
        assert_eq!(src.time_at(0, &strings(&["a", "bad"])), None);
        assert_eq!(src.time_at(0, &strings(&["a"])), None);
    }

    #[test]
    fn non_decreasing_check() {
        assert!(is_non_decreasing(&[]));
        assert!(is_non_decreasing(&[1.0, 1.0, 2.0]));
        assert!(!is_non_decreasing(&[1.0, 0.5]));
    }
}
