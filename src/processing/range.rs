//! Inclusive row ranges and range-bounded reads.

use serde::{Deserialize, Serialize};

use crate::error::{IngestionError, IngestionResult};
use crate::types::NormalizedRecord;

/// Inclusive range of row indices `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The range covering every row of a record with `len` rows, or `None` when empty.
    pub fn full(len: usize) -> Option<Self> {
        len.checked_sub(1).map(|end| Self { start: 0, end })
    }

    /// Number of rows covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    /// Check that the range is ordered and fits in `len` rows.
    pub fn validate(&self, len: usize) -> IngestionResult<()> {
        if self.start > self.end || self.end >= len {
            return Err(IngestionError::InvalidRange {
                start: self.start,
                end: self.end,
                len,
            });
        }
        Ok(())
    }

    /// Shrink the range to fit in `len` rows; `None` when nothing is left.
    pub fn clamp(&self, len: usize) -> Option<Self> {
        let last = len.checked_sub(1)?;
        let end = self.end.min(last);
        (self.start <= end).then_some(Self {
            start: self.start,
            end,
        })
    }

    /// Row indices in order.
    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Time values for `range`.
pub fn slice_time(record: &NormalizedRecord, range: RowRange) -> IngestionResult<&[f64]> {
    range.validate(record.row_count())?;
    Ok(&record.time[range.indices()])
}

/// Values of channel `name` for `range`.
pub fn slice_channel<'a>(record: &'a NormalizedRecord, name: &str, range: RowRange) -> IngestionResult<&'a [f64]> {
    let channel = record.channel(name).ok_or_else(|| IngestionError::UnknownChannel {
        name: name.to_owned(),
    })?;
    range.validate(channel.len())?;
    Ok(&channel.values[range.indices()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::ingest_table;
    use crate::types::RawTable;

    fn record() -> NormalizedRecord {
        ingest_table(&RawTable::from_cells(vec![
            vec!["Time", "A"],
            vec!["0", "10"],
            vec!["1", "11"],
            vec!["2", "12"],
        ]))
        .unwrap()
    }

    #[test]
    fn full_range() {
        assert_eq!(RowRange::full(3), Some(RowRange::new(0, 2)));
        assert_eq!(RowRange::full(0), None);
        assert_eq!(RowRange::new(1, 2).len(), 2);
    }

    #[test]
    fn slices_are_inclusive() {
        let r = record();
        assert_eq!(slice_time(&r, RowRange::new(1, 2)).unwrap(), &[1.0, 2.0]);
        assert_eq!(slice_channel(&r, "A", RowRange::new(0, 0)).unwrap(), &[10.0]);
    }

    #[test]
    fn out_of_bounds_and_reversed_ranges_fail() {
        let r = record();
        let err = slice_time(&r, RowRange::new(0, 3)).unwrap_err();
        assert!(matches!(err, IngestionError::InvalidRange { len: 3, .. }));
        assert!(slice_time(&r, RowRange::new(2, 1)).is_err());
    }

    #[test]
    fn unknown_channel_fails() {
        let err = slice_channel(&record(), "B", RowRange::new(0, 0)).unwrap_err();
        assert!(err.to_string().contains("unknown channel 'B'"));
    }

    #[test]
    fn clamp_trims_end() {
        assert_eq!(RowRange::new(1, 10).clamp(3), Some(RowRange::new(1, 2)));
        assert_eq!(RowRange::new(5, 10).clamp(3), None);
        assert_eq!(RowRange::new(0, 0).clamp(0), None);
    }
}
