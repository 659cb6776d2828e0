//! Time units and conversion to/from hours
//!
//! All KPI arithmetic happens in hours. Durations are normalized on the way in
//! and converted back to the requested display unit on the way out. Conversion
//! never fails: a non-finite value or an unrecognized unit yields NaN.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hours in one day
pub const HOURS_PER_DAY: f64 = 24.0;

/// Hours in one calendar year (365.25 days, so leap years average out)
pub const HOURS_PER_YEAR: f64 = 365.25 * HOURS_PER_DAY;

/// Unit a duration is entered or displayed in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Hours,
    Days,
    Years,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 3] = [TimeUnit::Hours, TimeUnit::Days, TimeUnit::Years];

    /// Number of hours in one of this unit
    pub fn hours_per_unit(self) -> f64 {
        match self {
            TimeUnit::Hours => 1.0,
            TimeUnit::Days => HOURS_PER_DAY,
            TimeUnit::Years => HOURS_PER_YEAR,
        }
    }

    /// Canonical name, also the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
            TimeUnit::Years => "years",
        }
    }

    /// Short suffix for compact tables ("h", "d", "y")
    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
            TimeUnit::Years => "y",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time unit '{0}' (expected hours, days or years)")]
pub struct UnitParseError(pub String);

impl FromStr for TimeUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hours" | "hour" | "h" | "hr" | "hrs" => Ok(TimeUnit::Hours),
            "days" | "day" | "d" => Ok(TimeUnit::Days),
            "years" | "year" | "y" | "yr" | "yrs" => Ok(TimeUnit::Years),
            _ => Err(UnitParseError(s.to_string())),
        }
    }
}

/// Convert a value in `unit` to hours. Non-finite input or overflow gives NaN.
pub fn to_hours(value: f64, unit: TimeUnit) -> f64 {
    finite_or_nan(value * unit.hours_per_unit())
}

/// Convert hours to `unit`. Non-finite input gives NaN.
pub fn from_hours(hours: f64, unit: TimeUnit) -> f64 {
    finite_or_nan(hours / unit.hours_per_unit())
}

fn finite_or_nan(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        f64::NAN
    }
}

/// String-unit variant of [`to_hours`] for values straight from user input.
/// An unrecognized unit gives NaN.
pub fn convert_to_hours(value: f64, unit: &str) -> f64 {
    match unit.parse::<TimeUnit>() {
        Ok(unit) => to_hours(value, unit),
        Err(_) => f64::NAN,
    }
}

/// String-unit variant of [`from_hours`].
pub fn convert_from_hours(hours: f64, unit: &str) -> f64 {
    match unit.parse::<TimeUnit>() {
        Ok(unit) => from_hours(hours, unit),
        Err(_) => f64::NAN,
    }
}
