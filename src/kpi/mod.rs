//! Reliability KPI computation
//!
//! Pure, stateless functions from [`RawInputs`](crate::core::RawInputs) to
//! [`KpiResult`]. Nothing in here performs I/O or returns errors: an
//! undefined metric is NaN.

pub mod arith;
pub mod definitions;
pub mod engine;
pub mod format;
pub mod result;
pub mod validate;

pub use arith::safe_div;
pub use engine::{
    applicable_metrics, compute, compute_non_repairable, compute_repairable, AnalysisMode,
    FormulaFamily, KpiOptions, ReliabilityCalculator,
};
pub use format::{format_number, format_percent, Locale, NumberFormat, Precision, PLACEHOLDER};
pub use result::{KpiResult, Metric, MetricKind};
pub use validate::{validate, warning_messages, Warning};
