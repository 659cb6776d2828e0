//! KPI result record and metric metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived reliability metrics, all durations in hours.
///
/// Any metric that could not be computed, or that does not apply to the
/// analysis mode, is NaN. Serialized to JSON these become `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiResult {
    pub mttf: f64,
    pub mtbf: f64,
    pub mttr: f64,
    pub mttd: f64,
    pub mcmt: f64,
    pub mpmt: f64,
    pub mmt: f64,
    pub mtbm: f64,
    pub uptime: f64,
    /// Fraction of time operational, 0..1
    pub availability: f64,
    /// Failures per hour
    pub lambda: f64,
    /// Failures per 10^9 hours
    pub fit: f64,
}

impl KpiResult {
    /// A result with every metric undefined
    pub fn undefined() -> Self {
        Self {
            mttf: f64::NAN,
            mtbf: f64::NAN,
            mttr: f64::NAN,
            mttd: f64::NAN,
            mcmt: f64::NAN,
            mpmt: f64::NAN,
            mmt: f64::NAN,
            mtbm: f64::NAN,
            uptime: f64::NAN,
            availability: f64::NAN,
            lambda: f64::NAN,
            fit: f64::NAN,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Mttf => self.mttf,
            Metric::Mtbf => self.mtbf,
            Metric::Mttr => self.mttr,
            Metric::Mttd => self.mttd,
            Metric::Mcmt => self.mcmt,
            Metric::Mpmt => self.mpmt,
            Metric::Mmt => self.mmt,
            Metric::Mtbm => self.mtbm,
            Metric::Uptime => self.uptime,
            Metric::Availability => self.availability,
            Metric::Lambda => self.lambda,
            Metric::Fit => self.fit,
        }
    }

    /// Bitwise equality, treating NaN fields as equal to each other
    pub fn same_bits(&self, other: &KpiResult) -> bool {
        Metric::ALL
            .iter()
            .all(|m| self.get(*m).to_bits() == other.get(*m).to_bits())
    }
}

impl Default for KpiResult {
    fn default() -> Self {
        Self::undefined()
    }
}

/// How a metric is measured, which decides conversion and formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Hours internally, converted to the display unit
    Duration,
    /// Dimensionless 0..1, shown as a percentage
    Ratio,
    /// Per hour
    Rate,
    /// Per 10^9 hours
    Fit,
}

/// One named KPI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Mttf,
    Mtbf,
    Mttr,
    Mttd,
    Mcmt,
    Mpmt,
    Mmt,
    Mtbm,
    Uptime,
    Availability,
    Lambda,
    Fit,
}

impl Metric {
    pub const ALL: [Metric; 12] = [
        Metric::Mttf,
        Metric::Mtbf,
        Metric::Mttr,
        Metric::Mttd,
        Metric::Mcmt,
        Metric::Mpmt,
        Metric::Mmt,
        Metric::Mtbm,
        Metric::Uptime,
        Metric::Availability,
        Metric::Lambda,
        Metric::Fit,
    ];

    /// Lowercase identifier, same as the serialized form
    pub fn key(self) -> &'static str {
        match self {
            Metric::Mttf => "mttf",
            Metric::Mtbf => "mtbf",
            Metric::Mttr => "mttr",
            Metric::Mttd => "mttd",
            Metric::Mcmt => "mcmt",
            Metric::Mpmt => "mpmt",
            Metric::Mmt => "mmt",
            Metric::Mtbm => "mtbm",
            Metric::Uptime => "uptime",
            Metric::Availability => "availability",
            Metric::Lambda => "lambda",
            Metric::Fit => "fit",
        }
    }

    /// Short display label
    pub fn label(self) -> &'static str {
        match self {
            Metric::Mttf => "MTTF",
            Metric::Mtbf => "MTBF",
            Metric::Mttr => "MTTR",
            Metric::Mttd => "MTTD",
            Metric::Mcmt => "MCMT",
            Metric::Mpmt => "MPMT",
            Metric::Mmt => "MMT",
            Metric::Mtbm => "MTBM",
            Metric::Uptime => "Uptime",
            Metric::Availability => "Availability",
            Metric::Lambda => "Failure rate (λ)",
            Metric::Fit => "FIT",
        }
    }

    pub fn kind(self) -> MetricKind {
        match self {
            Metric::Availability => MetricKind::Ratio,
            Metric::Lambda => MetricKind::Rate,
            Metric::Fit => MetricKind::Fit,
            _ => MetricKind::Duration,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
