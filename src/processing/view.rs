//! Display helpers: plot downsampling and converted grid rows.

use serde::Serialize;

use crate::error::IngestionResult;
use crate::types::NormalizedRecord;
use crate::units::{UnitCategory, UnitPreferences, convert};

use super::range::RowRange;

/// Plot point budget used by interactive views.
pub const DEFAULT_MAX_DISPLAY_POINTS: usize = 500;

/// Grid rows shown at once.
pub const DEFAULT_GRID_ROWS: usize = 100;

/// Indices to plot for `range`, stepping so that roughly `max_points` remain.
///
/// The step is `max(1, len / max_points)` and always starts at `range.start`.
pub fn display_indices(range: RowRange, max_points: usize) -> Vec<usize> {
    let step = (range.len() / max_points.max(1)).max(1);
    range.indices().step_by(step).collect()
}

/// One grid row: time and every channel in display units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub index: usize,
    pub time: f64,
    /// Channel values in header order.
    pub values: Vec<f64>,
}

/// Up to `limit` converted rows starting at `range.start`.
pub fn display_rows(
    record: &NormalizedRecord,
    range: RowRange,
    limit: usize,
    prefs: &UnitPreferences,
) -> IngestionResult<Vec<DisplayRow>> {
    range.validate(record.row_count())?;
    let time_unit = prefs.unit_for(UnitCategory::Time);

    Ok(range
        .indices()
        .take(limit)
        .map(|i| DisplayRow {
            index: i,
            time: convert(record.time[i], UnitCategory::Time, time_unit),
            values: record
                .channels
                .iter()
                .map(|c| prefs.display_value(&c.name, c.values[i]))
                .collect(),
        })
        .collect())
}
