//! Raw maintenance-log inputs
//!
//! The input record mirrors what a technician types into a calculator form:
//! durations with the unit they were measured in, and plain counts. Nothing
//! here rejects bad data. Empty, missing, or non-numeric fields become NaN
//! and flow through the engine as undefined metrics.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::core::units::{convert_to_hours, TimeUnit, UnitParseError};
use crate::yaml::{parse_yaml_file, YamlError};

/// Parse a user-entered number. Anything that isn't a finite number becomes NaN.
pub fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    finite_or_nan(trimmed.parse::<f64>().unwrap_or(f64::NAN))
}

fn finite_or_nan(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        f64::NAN
    }
}

/// A duration as entered: a number plus the unit it was measured in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "QuantityRepr")]
pub struct TimeQuantity {
    pub value: f64,

    /// Unit name as entered. Kept as text so an unrecognized unit survives
    /// loading and shows up as an undefined duration plus a warning.
    pub unit: String,
}

impl TimeQuantity {
    pub fn new(value: f64, unit: TimeUnit) -> Self {
        Self {
            value,
            unit: unit.as_str().to_string(),
        }
    }

    pub fn hours(value: f64) -> Self {
        Self::new(value, TimeUnit::Hours)
    }

    /// An empty field
    pub fn undefined() -> Self {
        Self::hours(f64::NAN)
    }

    /// Parsed unit, if recognized
    pub fn time_unit(&self) -> Result<TimeUnit, UnitParseError> {
        self.unit.parse()
    }

    /// Value normalized to hours (NaN for bad value or unknown unit)
    pub fn in_hours(&self) -> f64 {
        convert_to_hours(self.value, &self.unit)
    }
}

impl Default for TimeQuantity {
    fn default() -> Self {
        Self::undefined()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
}

impl LenientNumber {
    fn value(self) -> f64 {
        match self {
            LenientNumber::Number(n) => finite_or_nan(n),
            LenientNumber::Text(s) => parse_number(&s),
        }
    }
}

fn lenient_value(n: Option<LenientNumber>) -> f64 {
    n.map(LenientNumber::value).unwrap_or(f64::NAN)
}

/// `{ value, unit }` form of a duration; a misspelled key is an error
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct QuantityFields {
    #[serde(default)]
    value: Option<LenientNumber>,
    #[serde(default)]
    unit: Option<String>,
}

/// Accepted YAML shapes for a duration: `5000` (hours) or `{ value, unit }`
#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityRepr {
    Full(QuantityFields),
    Bare(Option<LenientNumber>),
}

impl From<QuantityRepr> for TimeQuantity {
    fn from(repr: QuantityRepr) -> Self {
        match repr {
            QuantityRepr::Full(QuantityFields { value, unit }) => TimeQuantity {
                value: lenient_value(value),
                unit: unit.unwrap_or_else(|| TimeUnit::Hours.as_str().to_string()),
            },
            QuantityRepr::Bare(value) => TimeQuantity::hours(lenient_value(value)),
        }
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<LenientNumber> = Option::deserialize(deserializer)?;
    Ok(lenient_value(value))
}

fn undefined_count() -> f64 {
    f64::NAN
}

/// Everything a single calculation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawInputs {
    /// Name of the asset or fleet under study (report title only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Cumulative operating time of all non-repairable items
    #[serde(default)]
    pub item_operating_time: TimeQuantity,

    /// Number of items that failed
    #[serde(default = "undefined_count", deserialize_with = "lenient_count")]
    pub failed_items: f64,

    /// Cumulative operating time of the repairable system or fleet
    #[serde(default)]
    pub operating_time: TimeQuantity,

    /// Number of failure events
    #[serde(default = "undefined_count", deserialize_with = "lenient_count")]
    pub failures: f64,

    /// Cumulative corrective repair time over all failures
    #[serde(default)]
    pub repair_time: TimeQuantity,

    /// Cumulative time-to-detect over all failures
    #[serde(default)]
    pub detection_time: TimeQuantity,

    /// Cumulative preventive maintenance time
    #[serde(default)]
    pub pm_time: TimeQuantity,

    /// Number of preventive maintenance actions behind `pm_time`
    #[serde(default = "undefined_count", deserialize_with = "lenient_count")]
    pub pm_actions: f64,

    /// Planned maintenance actions (MTBM accounting)
    #[serde(default = "undefined_count", deserialize_with = "lenient_count")]
    pub planned_actions: f64,

    /// Unplanned (corrective) maintenance actions (MTBM accounting)
    #[serde(default = "undefined_count", deserialize_with = "lenient_count")]
    pub corrective_actions: f64,
}

impl Default for RawInputs {
    fn default() -> Self {
        Self {
            name: None,
            item_operating_time: TimeQuantity::undefined(),
            failed_items: f64::NAN,
            operating_time: TimeQuantity::undefined(),
            failures: f64::NAN,
            repair_time: TimeQuantity::undefined(),
            detection_time: TimeQuantity::undefined(),
            pm_time: TimeQuantity::undefined(),
            pm_actions: f64::NAN,
            planned_actions: f64::NAN,
            corrective_actions: f64::NAN,
        }
    }
}

/// Inputs with every duration normalized to hours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourInputs {
    pub item_hours: f64,
    pub failed_items: f64,
    pub total_hours: f64,
    pub failures: f64,
    pub repair_hours: f64,
    pub detect_hours: f64,
    pub pm_hours: f64,
    pub pm_actions: f64,
    pub planned_actions: f64,
    pub corrective_actions: f64,
}

impl RawInputs {
    /// Load an input record from a YAML file
    pub fn load(path: &Path) -> Result<Self, YamlError> {
        let inputs: RawInputs = parse_yaml_file(path)?;
        tracing::debug!(path = %path.display(), "loaded inputs");
        Ok(inputs)
    }

    /// Normalize all durations to hours
    pub fn normalize(&self) -> HourInputs {
        HourInputs {
            item_hours: self.item_operating_time.in_hours(),
            failed_items: self.failed_items,
            total_hours: self.operating_time.in_hours(),
            failures: self.failures,
            repair_hours: self.repair_time.in_hours(),
            detect_hours: self.detection_time.in_hours(),
            pm_hours: self.pm_time.in_hours(),
            pm_actions: self.pm_actions,
            planned_actions: self.planned_actions,
            corrective_actions: self.corrective_actions,
        }
    }

    /// Durations with their field names, in form order
    pub fn durations(&self) -> [(&'static str, &TimeQuantity); 5] {
        [
            ("item_operating_time", &self.item_operating_time),
            ("operating_time", &self.operating_time),
            ("repair_time", &self.repair_time),
            ("detection_time", &self.detection_time),
            ("pm_time", &self.pm_time),
        ]
    }

    /// Counts with their field names, in form order
    pub fn counts(&self) -> [(&'static str, f64); 5] {
        [
            ("failed_items", self.failed_items),
            ("failures", self.failures),
            ("pm_actions", self.pm_actions),
            ("planned_actions", self.planned_actions),
            ("corrective_actions", self.corrective_actions),
        ]
    }
}
