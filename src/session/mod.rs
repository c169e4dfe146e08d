//! Interactive state around one loaded record.
//!
//! A [`Session`] owns at most one [`NormalizedRecord`] together with what a viewer needs around
//! it: the selected channels, the active [`RowRange`], the display [`UnitPreferences`] and an
//! [`EditBuffer`] working copy. Loading a new record replaces all of it.
//!
//! ```rust
//! use dcrm_ingest::ingestion::ingest_from_str;
//! use dcrm_ingest::processing::RowRange;
//! use dcrm_ingest::session::Session;
//!
//! let record = ingest_from_str("Time,Coil Current 1,Aux\n0,1,5\n1,2,5\n2,3,5\n")?;
//! let mut session = Session::new();
//! session.load(record);
//!
//! assert_eq!(session.selected(), ["Coil Current 1".to_string()]);
//! session.set_range(RowRange::new(1, 2))?;
//! let stats = session.stats()?;
//! assert_eq!(stats[0].mean, 2.5);
//! # Ok::<(), dcrm_ingest::IngestionError>(())
//! ```

pub mod edit;

use std::io::Write;
use std::path::Path;

use log::{debug, info};

use crate::error::{IngestionError, IngestionResult};
use crate::export::{write_edited_csv, write_range_csv};
use crate::ingestion::{IngestionOptions, ingest_from_path};
use crate::processing::{ChannelStats, RowRange, range_stats};
use crate::types::NormalizedRecord;
use crate::units::UnitPreferences;

pub use edit::EditBuffer;

/// One loaded record plus its view and edit state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    record: Option<NormalizedRecord>,
    edits: Option<EditBuffer>,
    selected: Vec<String>,
    range: Option<RowRange>,
    /// Display units used for statistics and point edits.
    pub units: UnitPreferences,
}

impl Session {
    /// An empty session with default units.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty session with the given units.
    pub fn with_units(units: UnitPreferences) -> Self {
        Self {
            units,
            ..Self::default()
        }
    }

    /// Replace the current record.
    ///
    /// Resets the range to the whole record, selects the first coil current (or the first
    /// channel when there is none) and starts a fresh working copy.
    pub fn load(&mut self, record: NormalizedRecord) {
        self.range = RowRange::full(record.row_count());
        self.selected = record
            .groups
            .coil_currents
            .first()
            .or_else(|| record.channels.first().map(|c| &c.name))
            .cloned()
            .into_iter()
            .collect();
        self.edits = Some(EditBuffer::from_record(&record));
        info!(
            "session loaded record: {} row(s), {} channel(s), layout {:?}",
            record.row_count(),
            record.channels.len(),
            record.layout
        );
        self.record = Some(record);
    }

    /// Ingest `path` and load the result.
    ///
    /// On failure the previously loaded record stays in place.
    pub fn load_path(&mut self, path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<()> {
        let record = ingest_from_path(path, options)?;
        self.load(record);
        Ok(())
    }

    /// Drop the record and every piece of state derived from it. Units are kept.
    pub fn clear(&mut self) {
        self.record = None;
        self.edits = None;
        self.selected.clear();
        self.range = None;
        debug!("session cleared");
    }

    /// The loaded record, if any.
    pub fn record(&self) -> Option<&NormalizedRecord> {
        self.record.as_ref()
    }

    /// Selected channel names, in selection order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Add `name` to the selection, or remove it if already selected.
    ///
    /// Returns whether the channel is selected afterwards.
    pub fn toggle_selected(&mut self, name: &str) -> IngestionResult<bool> {
        self.loaded()?.channel(name).ok_or_else(|| IngestionError::UnknownChannel {
            name: name.to_owned(),
        })?;
        if let Some(pos) = self.selected.iter().position(|n| n == name) {
            self.selected.remove(pos);
            Ok(false)
        } else {
            self.selected.push(name.to_owned());
            Ok(true)
        }
    }

    /// The active range; `None` with no record or an empty one.
    pub fn range(&self) -> Option<RowRange> {
        self.range
    }

    /// Set the active range after checking it against the record.
    pub fn set_range(&mut self, range: RowRange) -> IngestionResult<()> {
        range.validate(self.loaded()?.row_count())?;
        self.range = Some(range);
        Ok(())
    }

    /// Statistics of every selected channel over the active range, in display units.
    pub fn stats(&self) -> IngestionResult<Vec<ChannelStats>> {
        let record = self.loaded()?;
        let range = self.active_range(record)?;
        self.selected
            .iter()
            .map(|name| range_stats(record, name, range, &self.units))
            .collect()
    }

    /// The working copy, if a record is loaded.
    pub fn edits(&self) -> Option<&EditBuffer> {
        self.edits.as_ref()
    }

    /// Overwrite one sample of the working copy with a display-unit value.
    pub fn set_point(&mut self, name: &str, index: usize, display_value: f64) -> IngestionResult<()> {
        let units = &self.units;
        self.edits
            .as_mut()
            .ok_or_else(no_record)?
            .set_point(name, index, display_value, units)
    }

    /// Smooth the selected channels of the working copy over the active range.
    pub fn smooth_selected(&mut self) -> IngestionResult<()> {
        let range = self.active_range(self.loaded()?)?;
        let names = self.selected.clone();
        self.edits.as_mut().ok_or_else(no_record)?.smooth(range, &names)
    }

    /// Discard every edit.
    pub fn reset_edits(&mut self) -> IngestionResult<()> {
        let record = self.record.as_ref().ok_or_else(no_record)?;
        self.edits.as_mut().ok_or_else(no_record)?.reset(record);
        Ok(())
    }

    /// Write the working copy in the instrument's export layout.
    pub fn export_edited<W: Write>(&self, out: W) -> IngestionResult<()> {
        let record = self.loaded()?;
        let edits = self.edits.as_ref().ok_or_else(no_record)?;
        write_edited_csv(out, &record.metadata, edits.channels(), &record.time)
    }

    /// Write the unedited record over the active range as plain CSV.
    pub fn export_range<W: Write>(&self, out: W) -> IngestionResult<()> {
        let record = self.loaded()?;
        write_range_csv(out, record, self.active_range(record)?)
    }

    fn loaded(&self) -> IngestionResult<&NormalizedRecord> {
        self.record.as_ref().ok_or_else(no_record)
    }

    fn active_range(&self, record: &NormalizedRecord) -> IngestionResult<RowRange> {
        self.range.ok_or(IngestionError::InvalidRange {
            start: 0,
            end: 0,
            len: record.row_count(),
        })
    }
}

fn no_record() -> IngestionError {
    IngestionError::NoRecordLoaded
}
