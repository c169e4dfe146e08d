//! Lenient numeric cell parsing.
//!
//! Instrument exports put units, stray spaces or placeholders such as `"-"` into numeric
//! columns. A cell is read by skipping leading whitespace and parsing the longest numeric
//! prefix, so `"12.5 mA"` reads as `12.5` and `"abc"` does not parse at all.

use std::sync::LazyLock;

use regex::Regex;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)").expect("valid regex")
});

/// Parse the leading number of `raw`, or `None` if it does not start with one.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let m = NUMERIC_PREFIX.find(s)?;
    let text = m.as_str();
    match text.trim_start_matches(['+', '-']) {
        "Infinity" => Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }),
        _ => text.parse::<f64>().ok(),
    }
}

/// Parse an optional cell, coercing anything unparsable (or missing) to `0`.
pub fn number_or_zero(raw: Option<&str>) -> f64 {
    raw.and_then(parse_number).unwrap_or(0.0)
}
