//! Advisory input checks
//!
//! Warnings never block a calculation. They are printed next to the results
//! so the user can judge whether the numbers are trustworthy.

use serde::Serialize;
use std::fmt;

use crate::core::input::RawInputs;

/// A plausibility problem found in the inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Warning {
    /// Some duration is below zero
    NegativeDuration,
    /// Some count is below zero
    NegativeCount,
    /// Total repair time is longer than the operating time it happened in
    RepairExceedsOperatingTime,
    /// More failures than logged maintenance actions
    FailuresExceedMaintenanceActions,
    /// More failed items than item operating hours.
    ///
    /// Compares a count with a duration, so it only catches grossly wrong
    /// entries (e.g. the two fields swapped).
    FailedItemsExceedOperatingTime,
    /// A duration was entered in a unit we don't know
    UnknownUnit { field: String, unit: String },
}

impl Warning {
    /// Stable identifier for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            Warning::NegativeDuration => "negative-duration",
            Warning::NegativeCount => "negative-count",
            Warning::RepairExceedsOperatingTime => "repair-exceeds-operating-time",
            Warning::FailuresExceedMaintenanceActions => "failures-exceed-maintenance-actions",
            Warning::FailedItemsExceedOperatingTime => "failed-items-exceed-operating-time",
            Warning::UnknownUnit { .. } => "unknown-unit",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NegativeDuration => write!(f, "Negative durations are not allowed."),
            Warning::NegativeCount => write!(f, "Negative counts are not allowed."),
            Warning::RepairExceedsOperatingTime => write!(
                f,
                "Total repair time exceeds total operating time. Check the measurement period."
            ),
            Warning::FailuresExceedMaintenanceActions => write!(
                f,
                "Failure count exceeds the number of maintenance actions. Check that all actions were logged."
            ),
            Warning::FailedItemsExceedOperatingTime => write!(
                f,
                "Number of failed items exceeds item operating hours. Check that the fields are not swapped."
            ),
            Warning::UnknownUnit { field, unit } => write!(
                f,
                "Unknown unit '{}' for {}; expected hours, days or years.",
                unit, field
            ),
        }
    }
}

/// Check inputs for implausible values. Returns an empty list when all is well.
pub fn validate(inputs: &RawInputs) -> Vec<Warning> {
    let h = inputs.normalize();
    let mut warnings = Vec::new();

    // NaN compares false everywhere below, so empty fields never warn
    if [h.item_hours, h.total_hours, h.repair_hours, h.detect_hours, h.pm_hours]
        .iter()
        .any(|&v| v < 0.0)
    {
        warnings.push(Warning::NegativeDuration);
    }

    if inputs.counts().iter().any(|&(_, v)| v < 0.0) {
        warnings.push(Warning::NegativeCount);
    }

    if h.repair_hours > h.total_hours && h.total_hours > 0.0 {
        warnings.push(Warning::RepairExceedsOperatingTime);
    }

    if h.failures > 0.0 && h.failures > h.planned_actions + h.corrective_actions {
        warnings.push(Warning::FailuresExceedMaintenanceActions);
    }

    if h.failed_items > 0.0 && h.failed_items > h.item_hours {
        warnings.push(Warning::FailedItemsExceedOperatingTime);
    }

    for (field, quantity) in inputs.durations() {
        if quantity.time_unit().is_err() {
            warnings.push(Warning::UnknownUnit {
                field: field.to_string(),
                unit: quantity.unit.clone(),
            });
        }
    }

    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "input warnings");
    }

    warnings
}

/// Warning texts, for callers that only want strings
pub fn warning_messages(warnings: &[Warning]) -> Vec<String> {
    warnings.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::TimeQuantity;

    fn clean_inputs() -> RawInputs {
        RawInputs {
            item_operating_time: TimeQuantity::hours(20_000.0),
            failed_items: 1.0,
            operating_time: TimeQuantity::hours(5000.0),
            failures: 1.0,
            repair_time: TimeQuantity::hours(8.0),
            planned_actions: 0.0,
            corrective_actions: 1.0,
            ..RawInputs::default()
        }
    }

    #[test]
    fn test_clean_inputs_have_no_warnings() {
        assert!(validate(&clean_inputs()).is_empty());
    }

    #[test]
    fn test_all_zero_inputs_have_no_negative_warnings() {
        let inputs = RawInputs {
            item_operating_time: TimeQuantity::hours(0.0),
            failed_items: 0.0,
            operating_time: TimeQuantity::hours(0.0),
            failures: 0.0,
            repair_time: TimeQuantity::hours(0.0),
            detection_time: TimeQuantity::hours(0.0),
            pm_time: TimeQuantity::hours(0.0),
            pm_actions: 0.0,
            planned_actions: 0.0,
            corrective_actions: 0.0,
            name: None,
        };
        let warnings = validate(&inputs);
        assert!(!warnings.contains(&Warning::NegativeDuration));
        assert!(!warnings.contains(&Warning::NegativeCount));
    }

    #[test]
    fn test_empty_inputs_have_no_warnings() {
        assert!(validate(&RawInputs::default()).is_empty());
    }

    #[test]
    fn test_negative_duration() {
        let inputs = RawInputs {
            detection_time: TimeQuantity::hours(-1.0),
            ..clean_inputs()
        };
        assert_eq!(validate(&inputs), vec![Warning::NegativeDuration]);
    }

    #[test]
    fn test_negative_count() {
        let inputs = RawInputs {
            corrective_actions: -2.0,
            ..clean_inputs()
        };
        let warnings = validate(&inputs);
        assert!(warnings.contains(&Warning::NegativeCount));
    }

    #[test]
    fn test_repair_exceeds_operating_time() {
        let inputs = RawInputs {
            repair_time: TimeQuantity::hours(6000.0),
            ..clean_inputs()
        };
        assert!(validate(&inputs).contains(&Warning::RepairExceedsOperatingTime));

        // no operating time recorded: nothing to compare against
        let inputs = RawInputs {
            operating_time: TimeQuantity::hours(0.0),
            ..inputs
        };
        assert!(!validate(&inputs).contains(&Warning::RepairExceedsOperatingTime));
    }

    #[test]
    fn test_repair_compared_in_hours() {
        // 2 days of repair in 30 hours of operation
        let inputs = RawInputs {
            operating_time: TimeQuantity::hours(30.0),
            repair_time: TimeQuantity::new(2.0, crate::core::units::TimeUnit::Days),
            ..clean_inputs()
        };
        assert!(validate(&inputs).contains(&Warning::RepairExceedsOperatingTime));
    }

    #[test]
    fn test_failures_exceed_maintenance_actions() {
        let inputs = RawInputs {
            failures: 5.0,
            planned_actions: 1.0,
            corrective_actions: 2.0,
            ..clean_inputs()
        };
        assert!(validate(&inputs).contains(&Warning::FailuresExceedMaintenanceActions));

        // variant without action counts: rule does not apply
        let inputs = RawInputs {
            planned_actions: f64::NAN,
            corrective_actions: f64::NAN,
            ..inputs
        };
        assert!(!validate(&inputs).contains(&Warning::FailuresExceedMaintenanceActions));
    }

    #[test]
    fn test_failed_items_exceed_item_hours() {
        let inputs = RawInputs {
            item_operating_time: TimeQuantity::hours(10.0),
            failed_items: 12.0,
            ..clean_inputs()
        };
        assert!(validate(&inputs).contains(&Warning::FailedItemsExceedOperatingTime));
    }

    #[test]
    fn test_unknown_unit() {
        let mut inputs = clean_inputs();
        inputs.operating_time.unit = "weeks".to_string();

        let warnings = validate(&inputs);
        assert_eq!(
            warnings,
            vec![Warning::UnknownUnit {
                field: "operating_time".to_string(),
                unit: "weeks".to_string(),
            }]
        );
        assert!(warnings[0].to_string().contains("weeks"));
    }

    #[test]
    fn test_warning_messages() {
        let msgs = warning_messages(&[Warning::NegativeCount, Warning::RepairExceedsOperatingTime]);
        assert_eq!(msgs.len(), 2);
        assert!(msgs[1].contains("measurement period"));
    }
}
