//! Reductions over a channel range, in display units.

use serde::Serialize;

use crate::error::IngestionResult;
use crate::types::NormalizedRecord;
use crate::units::{UnitPreferences, classify, convert};

use super::range::{RowRange, slice_channel};

/// Built-in reduction operations over a channel range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Number of samples.
    Count,
    Sum,
    Min,
    Max,
    /// Arithmetic mean.
    Mean,
}

/// Summary of one channel over a range, converted to the preferred unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelStats {
    pub channel: String,
    /// Display unit the values are expressed in; empty for unit-less channels.
    pub unit: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Reduce channel `name` over `range` after converting each value to the preferred unit.
///
/// The range is never empty, so every op yields a value.
pub fn reduce(
    record: &NormalizedRecord,
    name: &str,
    range: RowRange,
    prefs: &UnitPreferences,
    op: ReduceOp,
) -> IngestionResult<f64> {
    let values = converted(record, name, range, prefs)?;
    Ok(apply(&values, op))
}

/// Min, max and mean of channel `name` over `range`, in the preferred unit.
pub fn range_stats(
    record: &NormalizedRecord,
    name: &str,
    range: RowRange,
    prefs: &UnitPreferences,
) -> IngestionResult<ChannelStats> {
    let values = converted(record, name, range, prefs)?;
    Ok(ChannelStats {
        channel: name.to_owned(),
        unit: prefs.unit_for(classify(name)).to_owned(),
        count: values.len(),
        min: apply(&values, ReduceOp::Min),
        max: apply(&values, ReduceOp::Max),
        mean: apply(&values, ReduceOp::Mean),
    })
}

fn converted(
    record: &NormalizedRecord,
    name: &str,
    range: RowRange,
    prefs: &UnitPreferences,
) -> IngestionResult<Vec<f64>> {
    let category = classify(name);
    let unit = prefs.unit_for(category);
    Ok(slice_channel(record, name, range)?
        .iter()
        .map(|v| convert(*v, category, unit))
        .collect())
}

fn apply(values: &[f64], op: ReduceOp) -> f64 {
    match op {
        ReduceOp::Count => values.len() as f64,
        ReduceOp::Sum => values.iter().sum(),
        ReduceOp::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        ReduceOp::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        ReduceOp::Mean => {
            if values.is_empty() {
                f64::NAN
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::ingest_table;
    use crate::types::RawTable;

    fn record() -> NormalizedRecord {
        ingest_table(&RawTable::from_cells(vec![
            vec!["Time", "Coil Current 1", "Aux"],
            vec!["0", "1", "-4"],
            vec!["1", "3", "8"],
            vec!["2", "2", "2"],
        ]))
        .unwrap()
    }

    #[test]
    fn stats_in_base_units() {
        let s = range_stats(&record(), "Coil Current 1", RowRange::new(0, 2), &UnitPreferences::default()).unwrap();
        assert_eq!(s.unit, "A");
        assert_eq!(s.count, 3);
        assert_eq!((s.min, s.max, s.mean), (1.0, 3.0, 2.0));
    }

    #[test]
    fn stats_follow_unit_preference() {
        let mut prefs = UnitPreferences::default();
        prefs.current = "uA".to_string();
        let s = range_stats(&record(), "Coil Current 1", RowRange::new(1, 2), &prefs).unwrap();
        assert_eq!(s.unit, "uA");
        assert_eq!(s.max, 3_000_000.0);
        assert_eq!(s.min, 2_000_000.0);
    }

    #[test]
    fn unitless_channel_is_not_scaled() {
        let s = range_stats(&record(), "Aux", RowRange::new(0, 1), &UnitPreferences::default()).unwrap();
        assert_eq!(s.unit, "");
        assert_eq!((s.min, s.max, s.mean), (-4.0, 8.0, 2.0));
    }

    #[test]
    fn reduce_ops() {
        let r = record();
        let prefs = UnitPreferences::default();
        let full = RowRange::new(0, 2);
        assert_eq!(reduce(&r, "Aux", full, &prefs, ReduceOp::Count).unwrap(), 3.0);
        assert_eq!(reduce(&r, "Aux", full, &prefs, ReduceOp::Sum).unwrap(), 6.0);
        assert_eq!(reduce(&r, "Aux", full, &prefs, ReduceOp::Min).unwrap(), -4.0);
        assert_eq!(reduce(&r, "Aux", full, &prefs, ReduceOp::Max).unwrap(), 8.0);
        assert_eq!(reduce(&r, "Aux", full, &prefs, ReduceOp::Mean).unwrap(), 2.0);
    }

    #[test]
    fn bad_range_propagates() {
        let err = range_stats(&record(), "Aux", RowRange::new(0, 9), &UnitPreferences::default()).unwrap_err();
        assert!(err.to_string().contains("invalid row range"));
    }
}
