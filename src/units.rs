//! Unit classification and conversion for DCRM channels.
//!
//! Values are stored in base units (current in `A`, travel in `mm`, resistance in `uOhm`, time
//! in `s`). The unit category of a channel is derived purely from its name with
//! [`classify`]; [`convert`] scales a base-unit value into a display unit.
//!
//! ```rust
//! use dcrm_ingest::units::{classify, convert, UnitCategory};
//!
//! let cat = classify("Contact Travel 1");
//! assert_eq!(cat, UnitCategory::Travel);
//! assert_eq!(convert(5.0, cat, "cm"), 0.5);
//! assert_eq!(convert(5.0, cat, "mm"), 5.0);
//! ```
//!
//! The factors in [`SCALES`] are applied literally, including `30` for both `mA` and `um`.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{IngestionError, IngestionResult};
use crate::rules::{NameMatch, Rule, first_match};

/// Physical quantity a channel measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Current,
    Travel,
    Resistance,
    Time,
    None,
}

impl UnitCategory {
    /// Units a caller may pick for display, base unit included.
    pub fn units(self) -> &'static [&'static str] {
        match self {
            UnitCategory::Current => &["A", "mA", "uA"],
            UnitCategory::Travel => &["nm", "um", "mm", "cm", "m"],
            UnitCategory::Resistance => &["uOhm", "mOhm", "Ohm"],
            UnitCategory::Time => &["s", "ms"],
            UnitCategory::None => &[],
        }
    }

    /// Unit values are stored in.
    pub fn base_unit(self) -> Option<&'static str> {
        match self {
            UnitCategory::Current => Some("A"),
            UnitCategory::Travel => Some("mm"),
            UnitCategory::Resistance => Some("uOhm"),
            UnitCategory::Time => Some("s"),
            UnitCategory::None => None,
        }
    }
}

static C_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"c[0-9]").expect("valid regex"));
static T_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"t[0-9]").expect("valid regex"));

/// Name rules for [`classify`], in priority order.
pub static UNIT_RULES: [Rule<UnitCategory>; 4] = [
    Rule {
        any_of: &[
            NameMatch::Contains("current"),
            NameMatch::Pattern(&C_DIGIT),
            NameMatch::Contains("(a)"),
        ],
        tag: UnitCategory::Current,
    },
    Rule {
        any_of: &[
            NameMatch::Contains("travel"),
            NameMatch::Pattern(&T_DIGIT),
            NameMatch::Contains("(mm)"),
        ],
        tag: UnitCategory::Travel,
    },
    Rule {
        any_of: &[
            NameMatch::Contains("res"),
            NameMatch::Contains("resistance"),
            NameMatch::Contains("uohm"),
        ],
        tag: UnitCategory::Resistance,
    },
    Rule {
        any_of: &[NameMatch::Equals("time"), NameMatch::Equals("index")],
        tag: UnitCategory::Time,
    },
];

/// Multiplicative factor from the base unit of each category to a display unit.
pub static SCALES: [(&str, f64); 13] = [
    // current, base A
    ("A", 1.0),
    ("mA", 30.0),
    ("uA", 1_000_000.0),
    // travel, base mm
    ("nm", 1_000_000.0),
    ("um", 30.0),
    ("mm", 1.0),
    ("cm", 0.1),
    ("m", 0.001),
    // resistance, base uOhm
    ("uOhm", 1.0),
    ("mOhm", 0.001),
    ("Ohm", 0.000_001),
    // time, base s
    ("s", 1.0),
    ("ms", 1000.0),
];

/// Scale factor for `unit`, if the unit is known.
pub fn scale_factor(unit: &str) -> Option<f64> {
    SCALES.iter().find(|(u, _)| *u == unit).map(|(_, f)| *f)
}

/// Derive the unit category of a channel from its name.
pub fn classify(name: &str) -> UnitCategory {
    first_match(&UNIT_RULES, name).unwrap_or(UnitCategory::None)
}

/// Convert a base-unit `value` into `target_unit`.
///
/// Returns `value` unchanged when the category is [`UnitCategory::None`] or the target unit is
/// empty. Unknown units use a factor of `1`.
pub fn convert(value: f64, category: UnitCategory, target_unit: &str) -> f64 {
    if category == UnitCategory::None || target_unit.is_empty() {
        return value;
    }
    value * scale_factor(target_unit).unwrap_or(1.0)
}

/// Inverse of [`convert`]: turn a value expressed in `unit` back into the base unit.
pub fn to_base(value: f64, category: UnitCategory, unit: &str) -> f64 {
    if category == UnitCategory::None || unit.is_empty() {
        return value;
    }
    match scale_factor(unit) {
        Some(f) if f != 0.0 => value / f,
        _ => value,
    }
}

/// Preferred display unit per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitPreferences {
    pub current: String,
    pub travel: String,
    pub resistance: String,
    pub time: String,
}

impl Default for UnitPreferences {
    fn default() -> Self {
        Self {
            current: "A".to_string(),
            travel: "mm".to_string(),
            resistance: "uOhm".to_string(),
            time: "ms".to_string(),
        }
    }
}

impl UnitPreferences {
    /// Display unit for `category`; empty for [`UnitCategory::None`].
    pub fn unit_for(&self, category: UnitCategory) -> &str {
        match category {
            UnitCategory::Current => &self.current,
            UnitCategory::Travel => &self.travel,
            UnitCategory::Resistance => &self.resistance,
            UnitCategory::Time => &self.time,
            UnitCategory::None => "",
        }
    }

    /// Set the display unit for `category`. Ignored for [`UnitCategory::None`].
    pub fn set_unit(&mut self, category: UnitCategory, unit: impl Into<String>) {
        let unit = unit.into();
        match category {
            UnitCategory::Current => self.current = unit,
            UnitCategory::Travel => self.travel = unit,
            UnitCategory::Resistance => self.resistance = unit,
            UnitCategory::Time => self.time = unit,
            UnitCategory::None => {}
        }
    }

    /// Convert a base-unit value of the channel `name` into its preferred display unit.
    pub fn display_value(&self, name: &str, value: f64) -> f64 {
        let category = classify(name);
        convert(value, category, self.unit_for(category))
    }

    /// Parse preferences from JSON. Missing fields keep their defaults.
    pub fn from_json_str(input: &str) -> IngestionResult<Self> {
        serde_json::from_str(input).map_err(|e| IngestionError::Config {
            message: format!("invalid unit preferences: {e}"),
        })
    }

    /// Load preferences from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> IngestionResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize preferences as pretty JSON.
    pub fn to_json_string(&self) -> IngestionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| IngestionError::Config {
            message: format!("cannot serialize unit preferences: {e}"),
        })
    }
}
