//! Core data model types for DCRM ingestion.
//!
//! Ingestion turns a [`RawTable`] (rows of string cells, as produced by a CSV tokenizer) into a
//! [`NormalizedRecord`]: a time axis, equal-length numeric [`Channel`]s in header order, the
//! [`ChannelGroups`] partition and a free-form [`Metadata`] mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Free-form key/value test parameters taken from the preamble rows, in file order.
///
/// Re-inserting a key keeps its first position and replaces the value.
pub type Metadata = IndexMap<String, String>;

/// Raw tokenized input: ordered rows of ordered string cells.
///
/// Rows do not need to have the same number of cells; missing cells read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Rows in file order; row 0 is the first row of the file.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a table from owned rows.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a table from borrowed cells. Handy for tests and in-memory fixtures.
    pub fn from_cells<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|c| c.as_ref().to_owned()).collect())
                .collect(),
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(row, col)`, or `None` if either index is out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Which of the two on-disk layouts a record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordLayout {
    /// No metadata preamble; time comes from a column.
    Legacy,
    /// Metadata preamble present; time is synthesized from the sampling rate.
    WithMetadata,
}

/// A single named numeric time-series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Column header the channel was read from (trimmed).
    pub name: String,
    /// One value per entry of [`NormalizedRecord::time`].
    pub values: Vec<f64>,
}

impl Channel {
    /// Create an empty channel.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the channel has no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Semantic group a channel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChannelGroup {
    CoilCurrents,
    ContactTravel,
    DcrmResistance,
    DcrmCurrent,
    Others,
}

impl ChannelGroup {
    /// All groups in display order.
    pub const ALL: [ChannelGroup; 5] = [
        ChannelGroup::CoilCurrents,
        ChannelGroup::ContactTravel,
        ChannelGroup::DcrmResistance,
        ChannelGroup::DcrmCurrent,
        ChannelGroup::Others,
    ];
}

/// Partition of channel names into the five [`ChannelGroup`]s.
///
/// Each list keeps header order. A name appears in exactly one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelGroups {
    pub coil_currents: Vec<String>,
    pub contact_travel: Vec<String>,
    pub dcrm_resistance: Vec<String>,
    pub dcrm_current: Vec<String>,
    pub others: Vec<String>,
}

impl ChannelGroups {
    /// Names assigned to `group`.
    pub fn get(&self, group: ChannelGroup) -> &[String] {
        match group {
            ChannelGroup::CoilCurrents => &self.coil_currents,
            ChannelGroup::ContactTravel => &self.contact_travel,
            ChannelGroup::DcrmResistance => &self.dcrm_resistance,
            ChannelGroup::DcrmCurrent => &self.dcrm_current,
            ChannelGroup::Others => &self.others,
        }
    }

    /// Append `name` to `group`.
    pub fn push(&mut self, group: ChannelGroup, name: impl Into<String>) {
        let list = match group {
            ChannelGroup::CoilCurrents => &mut self.coil_currents,
            ChannelGroup::ContactTravel => &mut self.contact_travel,
            ChannelGroup::DcrmResistance => &mut self.dcrm_resistance,
            ChannelGroup::DcrmCurrent => &mut self.dcrm_current,
            ChannelGroup::Others => &mut self.others,
        };
        list.push(name.into());
    }

    /// The group containing `name`, if any.
    pub fn group_of(&self, name: &str) -> Option<ChannelGroup> {
        ChannelGroup::ALL
            .into_iter()
            .find(|g| self.get(*g).iter().any(|n| n == name))
    }

    /// Total number of grouped names.
    pub fn len(&self) -> usize {
        ChannelGroup::ALL.iter().map(|g| self.get(*g).len()).sum()
    }

    /// Whether no names are grouped.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The normalized result of ingesting one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Preamble key/value pairs (empty for the legacy layout).
    pub metadata: Metadata,
    /// Sample times in seconds.
    pub time: Vec<f64>,
    /// Channels in header column order; each has `time.len()` values.
    pub channels: Vec<Channel>,
    /// Group assignment for every channel name.
    pub groups: ChannelGroups,
    /// Layout the record was read from.
    pub layout: RecordLayout,
    /// Index of the data-column header row in the raw table.
    pub header_row: usize,
}

impl NormalizedRecord {
    /// Number of samples (rows) in the record.
    pub fn row_count(&self) -> usize {
        self.time.len()
    }

    /// Look up a channel by name.
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Channel names in header order.
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.name.as_str())
    }

    /// Whether every channel has exactly as many values as there are time samples.
    pub fn is_rectangular(&self) -> bool {
        self.channels.iter().all(|c| c.len() == self.time.len())
    }
}
