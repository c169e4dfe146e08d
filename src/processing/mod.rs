//! Read-side operations over a [`crate::types::NormalizedRecord`].
//!
//! Everything here takes the record by reference and addresses rows with an inclusive
//! [`RowRange`]:
//!
//! - [`range`]: range validation and range-bounded slices of time and channels
//! - [`reduce()`]: count/sum/min/max/mean of a channel over a range, in a display unit
//! - [`view`]: downsampled plot indices and converted grid rows
//!
//! ## Example
//!
//! ```rust
//! use dcrm_ingest::ingestion::ingest_table;
//! use dcrm_ingest::processing::{range_stats, RowRange};
//! use dcrm_ingest::types::RawTable;
//! use dcrm_ingest::units::UnitPreferences;
//!
//! let table = RawTable::from_cells(vec![
//!     vec!["Time", "Contact Travel 1"],
//!     vec!["0.0", "10"],
//!     vec!["0.1", "20"],
//!     vec!["0.2", "60"],
//! ]);
//! let record = ingest_table(&table)?;
//!
//! let mut prefs = UnitPreferences::default();
//! prefs.travel = "cm".to_string();
//! let stats = range_stats(&record, "Contact Travel 1", RowRange::new(1, 2), &prefs)?;
//! assert_eq!(stats.unit, "cm");
//! assert_eq!(stats.max, 6.0);
//! # Ok::<(), dcrm_ingest::IngestionError>(())
//! ```

pub mod range;
pub mod reduce;
pub mod view;

pub use range::{RowRange, slice_channel, slice_time};
pub use reduce::{ChannelStats, ReduceOp, range_stats, reduce};
pub use view::{DisplayRow, display_indices, display_rows};
