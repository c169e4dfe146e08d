//! Editable working copy of a record's channels.

use crate::error::{IngestionError, IngestionResult};
use crate::processing::RowRange;
use crate::types::{Channel, NormalizedRecord};
use crate::units::{UnitPreferences, classify, to_base};

/// Channels copied out of a [`NormalizedRecord`] for editing.
///
/// The record itself is never modified; [`EditBuffer::reset`] restores the copy from it.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    channels: Vec<Channel>,
    dirty: bool,
}

impl EditBuffer {
    /// Copy every channel of `record`.
    pub fn from_record(record: &NormalizedRecord) -> Self {
        Self {
            channels: record.channels.clone(),
            dirty: false,
        }
    }

    /// Working channels in header order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Working values of channel `name`.
    pub fn values(&self, name: &str) -> Option<&[f64]> {
        self.channels
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Whether anything was edited since creation or the last reset.
    pub fn has_changes(&self) -> bool {
        self.dirty
    }

    /// Overwrite one sample with a value given in the channel's display unit.
    pub fn set_point(
        &mut self,
        name: &str,
        index: usize,
        display_value: f64,
        prefs: &UnitPreferences,
    ) -> IngestionResult<()> {
        let category = classify(name);
        let base = to_base(display_value, category, prefs.unit_for(category));

        let channel = self.channel_mut(name)?;
        let len = channel.values.len();
        let slot = channel
            .values
            .get_mut(index)
            .ok_or(IngestionError::InvalidRange {
                start: index,
                end: index,
                len,
            })?;
        *slot = base;
        self.dirty = true;
        Ok(())
    }

    /// Three-point moving average over the interior of `range` for each named channel.
    ///
    /// Points `start + 1 .. end` are replaced in order, so each average sees the already
    /// smoothed predecessor. The range end points are left as they are.
    ///
    /// Every name and the range are checked before any value changes; on error the buffer is
    /// untouched.
    pub fn smooth(&mut self, range: RowRange, names: &[String]) -> IngestionResult<()> {
        let mut targets = Vec::with_capacity(names.len());
        for name in names {
            let idx = self.position(name)?;
            range.validate(self.channels[idx].values.len())?;
            targets.push(idx);
        }

        for &idx in &targets {
            let v = &mut self.channels[idx].values;
            for i in range.start + 1..range.end {
                v[i] = (v[i - 1] + v[i] + v[i + 1]) / 3.0;
            }
        }
        if !targets.is_empty() {
            self.dirty = true;
        }
        Ok(())
    }

    /// Discard every edit and copy the channels from `record` again.
    pub fn reset(&mut self, record: &NormalizedRecord) {
        self.channels = record.channels.clone();
        self.dirty = false;
    }

    fn position(&self, name: &str) -> IngestionResult<usize> {
        self.channels
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| IngestionError::UnknownChannel {
                name: name.to_owned(),
            })
    }

    fn channel_mut(&mut self, name: &str) -> IngestionResult<&mut Channel> {
        let idx = self.position(name)?;
        Ok(&mut self.channels[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::ingest_table;
    use crate::types::RawTable;

    fn record() -> NormalizedRecord {
        ingest_table(&RawTable::from_cells(vec![
            vec!["Time", "Contact Travel 1", "Aux"],
            vec!["0", "0", "1"],
            vec!["1", "3", "1"],
            vec!["2", "6", "1"],
            vec!["3", "0", "1"],
        ]))
        .unwrap()
    }

    #[test]
    fn set_point_converts_display_value_to_base() {
        let r = record();
        let mut buf = EditBuffer::from_record(&r);
        let mut prefs = UnitPreferences::default();
        prefs.travel = "cm".to_string();

        buf.set_point("Contact Travel 1", 1, 2.0, &prefs).unwrap();
        assert_eq!(buf.values("Contact Travel 1").unwrap()[1], 20.0);
        assert!(buf.has_changes());
        // The record is untouched.
        assert_eq!(r.channel("Contact Travel 1").unwrap().values[1], 3.0);
    }

    #[test]
    fn set_point_rejects_bad_targets() {
        let r = record();
        let mut buf = EditBuffer::from_record(&r);
        let prefs = UnitPreferences::default();
        assert!(matches!(
            buf.set_point("Nope", 0, 1.0, &prefs),
            Err(IngestionError::UnknownChannel { .. })
        ));
        assert!(matches!(
            buf.set_point("Aux", 4, 1.0, &prefs),
            Err(IngestionError::InvalidRange { len: 4, .. })
        ));
        assert!(!buf.has_changes());
    }

    #[test]
    fn smooth_is_sequential_and_keeps_end_points() {
        let r = record();
        let mut buf = EditBuffer::from_record(&r);
        buf.smooth(RowRange::new(0, 3), &["Contact Travel 1".to_string()]).unwrap();

        let v = buf.values("Contact Travel 1").unwrap();
        assert_eq!(v[0], 0.0);
        assert_eq!(v[1], 3.0);
        // (3 + 6 + 0) / 3, using the smoothed v[1].
        assert_eq!(v[2], 3.0);
        assert_eq!(v[3], 0.0);
        assert_eq!(buf.values("Aux").unwrap(), &[1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn failed_smooth_leaves_buffer_untouched() {
        let r = record();
        let mut buf = EditBuffer::from_record(&r);
        let names = ["Contact Travel 1".to_string(), "Missing".to_string()];

        let err = buf.smooth(RowRange::new(0, 2), &names).unwrap_err();
        assert!(matches!(err, IngestionError::UnknownChannel { ref name } if name == "Missing"));
        assert_eq!(buf.values("Contact Travel 1").unwrap(), &[0.0, 3.0, 6.0, 0.0]);
        assert!(!buf.has_changes());

        let err = buf.smooth(RowRange::new(0, 9), &names[..1]).unwrap_err();
        assert!(matches!(err, IngestionError::InvalidRange { len: 4, .. }));
        assert_eq!(buf.channels(), r.channels.as_slice());
    }

    #[test]
    fn reset_restores_record_values() {
        let r = record();
        let mut buf = EditBuffer::from_record(&r);
        buf.set_point("Aux", 0, 9.0, &UnitPreferences::default()).unwrap();
        buf.reset(&r);
        assert_eq!(buf.channels(), r.channels.as_slice());
        assert!(!buf.has_changes());
    }
}
