//! KPI engine - reliability formulas for repairable systems and non-repairable items
//!
//! One engine covers every calculator variant. The analysis mode picks the
//! perspective (repairable fleet, non-repairable items, or both side by side)
//! and [`KpiOptions`] picks the accounting scheme:
//!
//! - [`FormulaFamily::Simple`]: availability from MTBF/(MTBF+MTTR), MTBM and
//!   MCMT from planned/unplanned action counts, λ = failures / operating time.
//! - [`FormulaFamily::DetectionAware`]: corrective time includes detection
//!   (MCMT = MTTR + MTTD), uptime per cycle drives availability, λ = 1/MTBF.
//!
//! Preventive maintenance tracking adds MPMT (and feeds MMT and uptime where
//! the family uses them). Every ratio goes through [`safe_div`], so missing or
//! zero denominators give NaN, never infinity or a panic.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::input::{HourInputs, RawInputs};
use crate::kpi::arith::{finite, reciprocal, safe_div, to_fit};
use crate::kpi::result::{KpiResult, Metric};

/// Which perspective to analyse
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    /// Repairable system or fleet: MTBF, MTTR, availability
    Repairable,
    /// Non-repairable items: MTTF
    NonRepairable,
    /// Both perspectives in one result (failure rate from the repairable side)
    #[default]
    Combined,
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Repairable => write!(f, "repairable"),
            AnalysisMode::NonRepairable => write!(f, "non-repairable"),
            AnalysisMode::Combined => write!(f, "combined"),
        }
    }
}

/// Accounting scheme for the repairable formulas
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FormulaFamily {
    #[default]
    Simple,
    DetectionAware,
}

impl fmt::Display for FormulaFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaFamily::Simple => write!(f, "simple"),
            FormulaFamily::DetectionAware => write!(f, "detection-aware"),
        }
    }
}

/// Engine feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KpiOptions {
    #[serde(default)]
    pub family: FormulaFamily,

    /// Model preventive maintenance time (MPMT, and its share of MMT/uptime)
    #[serde(default)]
    pub tracks_preventive_maintenance: bool,
}

impl KpiOptions {
    pub fn new(family: FormulaFamily, tracks_preventive_maintenance: bool) -> Self {
        Self {
            family,
            tracks_preventive_maintenance,
        }
    }

    /// Detection time is part of the detection-aware family
    pub fn tracks_detection_time(&self) -> bool {
        self.family == FormulaFamily::DetectionAware
    }
}

/// KPIs for a repairable system or fleet
pub fn compute_repairable(inputs: &RawInputs, options: &KpiOptions) -> KpiResult {
    repairable(&inputs.normalize(), options)
}

/// KPIs for non-repairable items
pub fn compute_non_repairable(inputs: &RawInputs, options: &KpiOptions) -> KpiResult {
    non_repairable(&inputs.normalize(), options)
}

/// Dispatch on the analysis mode
pub fn compute(inputs: &RawInputs, mode: AnalysisMode, options: &KpiOptions) -> KpiResult {
    let h = inputs.normalize();
    tracing::debug!(%mode, family = %options.family, pm = options.tracks_preventive_maintenance, "computing KPIs");

    match mode {
        AnalysisMode::Repairable => repairable(&h, options),
        AnalysisMode::NonRepairable => non_repairable(&h, options),
        AnalysisMode::Combined => KpiResult {
            mttf: safe_div(h.item_hours, h.failed_items),
            ..repairable(&h, options)
        },
    }
}

fn repairable(h: &HourInputs, options: &KpiOptions) -> KpiResult {
    let mtbf = safe_div(h.total_hours, h.failures);
    let mttr = safe_div(h.repair_hours, h.failures);
    let mpmt = if options.tracks_preventive_maintenance {
        safe_div(h.pm_hours, h.pm_actions)
    } else {
        f64::NAN
    };

    match options.family {
        FormulaFamily::Simple => {
            let availability = if mtbf.is_finite() && mttr.is_finite() && mtbf > 0.0 && mttr >= 0.0
            {
                mtbf / (mtbf + mttr)
            } else {
                f64::NAN
            };
            // Same value as 1/MTBF, and undefined whenever MTBF is
            let lambda = if mtbf.is_finite() {
                safe_div(h.failures, h.total_hours)
            } else {
                f64::NAN
            };

            KpiResult {
                mtbf,
                mttr,
                mpmt,
                mtbm: safe_div(h.total_hours, h.planned_actions + h.corrective_actions),
                mcmt: safe_div(h.repair_hours, h.corrective_actions),
                availability,
                lambda,
                fit: to_fit(lambda),
                ..KpiResult::undefined()
            }
        }
        FormulaFamily::DetectionAware => {
            let mttd = safe_div(h.detect_hours, h.failures);
            let mcmt = finite(mttr + mttd);

            let (mmt, uptime) = if options.tracks_preventive_maintenance {
                (
                    safe_div(
                        h.pm_hours + h.detect_hours + h.repair_hours,
                        h.pm_actions + h.failures,
                    ),
                    finite(mtbf - mcmt - mpmt),
                )
            } else {
                (
                    safe_div(h.detect_hours + h.repair_hours, h.failures),
                    finite(mtbf - mcmt),
                )
            };

            // Negative uptime is left as-is: it flags inconsistent input data
            let availability = if uptime.is_finite() && mtbf.is_finite() && mtbf > 0.0 {
                uptime / mtbf
            } else {
                f64::NAN
            };
            let lambda = reciprocal(mtbf);

            KpiResult {
                mtbf,
                mttr,
                mttd,
                mcmt,
                mpmt,
                mmt,
                uptime,
                availability,
                lambda,
                fit: to_fit(lambda),
                ..KpiResult::undefined()
            }
        }
    }
}

fn non_repairable(h: &HourInputs, options: &KpiOptions) -> KpiResult {
    // Some forms only have the generic failure counter
    let failed = if h.failed_items.is_finite() {
        h.failed_items
    } else {
        h.failures
    };

    let mttf = safe_div(h.item_hours, failed);
    let lambda = reciprocal(mttf);

    let mut result = KpiResult {
        mttf,
        lambda,
        fit: to_fit(lambda),
        ..KpiResult::undefined()
    };

    if options.tracks_preventive_maintenance {
        let mpmt = safe_div(h.pm_hours, h.pm_actions);
        let uptime = finite(mttf - mpmt);
        result.mpmt = mpmt;
        // No corrective component for items that are replaced, not repaired
        result.mmt = mpmt;
        result.uptime = uptime;
        result.availability = safe_div(uptime, mttf);
    }

    result
}

/// Metrics that carry meaning for a mode/options pair, in display order
pub fn applicable_metrics(mode: AnalysisMode, options: &KpiOptions) -> Vec<Metric> {
    let pm = options.tracks_preventive_maintenance;
    let mut metrics = Vec::new();

    if matches!(mode, AnalysisMode::NonRepairable | AnalysisMode::Combined) {
        metrics.push(Metric::Mttf);
    }

    if matches!(mode, AnalysisMode::Repairable | AnalysisMode::Combined) {
        metrics.extend([Metric::Mtbf, Metric::Mttr]);
        match options.family {
            FormulaFamily::Simple => {
                metrics.extend([Metric::Mtbm, Metric::Mcmt]);
                if pm {
                    metrics.push(Metric::Mpmt);
                }
            }
            FormulaFamily::DetectionAware => {
                metrics.extend([Metric::Mttd, Metric::Mcmt]);
                if pm {
                    metrics.push(Metric::Mpmt);
                }
                metrics.extend([Metric::Mmt, Metric::Uptime]);
            }
        }
        metrics.push(Metric::Availability);
    } else if pm {
        metrics.extend([Metric::Mpmt, Metric::Mmt, Metric::Uptime, Metric::Availability]);
    }

    metrics.extend([Metric::Lambda, Metric::Fit]);
    metrics
}

/// A configured calculator: mode plus options, reusable across inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReliabilityCalculator {
    pub mode: AnalysisMode,
    pub options: KpiOptions,
}

impl ReliabilityCalculator {
    pub fn new(mode: AnalysisMode, options: KpiOptions) -> Self {
        Self { mode, options }
    }

    pub fn compute(&self, inputs: &RawInputs) -> KpiResult {
        compute(inputs, self.mode, &self.options)
    }

    pub fn metrics(&self) -> Vec<Metric> {
        applicable_metrics(self.mode, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::TimeQuantity;
    use crate::core::units::TimeUnit;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    fn fleet(total: f64, failures: f64, repair: f64) -> RawInputs {
        RawInputs {
            operating_time: TimeQuantity::hours(total),
            failures,
            repair_time: TimeQuantity::hours(repair),
            ..RawInputs::default()
        }
    }

    fn items(total: f64, failed: f64) -> RawInputs {
        RawInputs {
            item_operating_time: TimeQuantity::hours(total),
            failed_items: failed,
            ..RawInputs::default()
        }
    }

    #[test]
    fn test_repairable_simple() {
        let inputs = RawInputs {
            planned_actions: 0.0,
            corrective_actions: 1.0,
            ..fleet(5000.0, 1.0, 8.0)
        };
        let r = compute_repairable(&inputs, &KpiOptions::default());

        assert_eq!(r.mtbf, 5000.0);
        assert_eq!(r.mttr, 8.0);
        assert!(approx(r.availability, 5000.0 / 5008.0));
        assert!(approx(r.availability, 0.998403));
        assert_eq!(r.mtbm, 5000.0);
        assert_eq!(r.mcmt, 8.0);
        assert!(approx(r.lambda, 0.0002));
        assert!(approx(r.fit, 200_000.0));
        assert!(r.mttf.is_nan());
        assert!(r.mttd.is_nan());
    }

    #[test]
    fn test_repairable_simple_mtbm_over_all_actions() {
        let inputs = RawInputs {
            planned_actions: 3.0,
            corrective_actions: 2.0,
            ..fleet(10_000.0, 2.0, 12.0)
        };
        let r = compute_repairable(&inputs, &KpiOptions::default());

        assert_eq!(r.mtbm, 2000.0);
        assert_eq!(r.mcmt, 6.0);
    }

    #[test]
    fn test_repairable_detection_aware() {
        let inputs = RawInputs {
            detection_time: TimeQuantity::hours(2.0),
            ..fleet(1000.0, 1.0, 6.0)
        };
        let options = KpiOptions::new(FormulaFamily::DetectionAware, false);
        let r = compute_repairable(&inputs, &options);

        assert_eq!(r.mtbf, 1000.0);
        assert_eq!(r.mttd, 2.0);
        assert_eq!(r.mcmt, 8.0);
        assert_eq!(r.uptime, 992.0);
        assert!(approx(r.availability, 0.992));
        assert_eq!(r.mmt, 8.0);
        assert!(approx(r.lambda, 0.001));
        assert!(approx(r.fit, 1_000_000.0));
        assert!(r.mpmt.is_nan());
        assert!(r.mtbm.is_nan());
    }

    #[test]
    fn test_detection_aware_with_preventive_maintenance() {
        let inputs = RawInputs {
            detection_time: TimeQuantity::hours(4.0),
            pm_time: TimeQuantity::hours(12.0),
            pm_actions: 3.0,
            ..fleet(2000.0, 2.0, 10.0)
        };
        let options = KpiOptions::new(FormulaFamily::DetectionAware, true);
        let r = compute_repairable(&inputs, &options);

        // MTBF 1000, MTTR 5, MTTD 2, MPMT 4
        assert_eq!(r.mcmt, 7.0);
        assert_eq!(r.mpmt, 4.0);
        assert_eq!(r.uptime, 989.0);
        assert!(approx(r.availability, 0.989));
        // (12 + 4 + 10) / (3 + 2)
        assert!(approx(r.mmt, 5.2));
    }

    #[test]
    fn test_negative_uptime_is_not_clamped() {
        let inputs = RawInputs {
            detection_time: TimeQuantity::hours(50.0),
            ..fleet(100.0, 1.0, 80.0)
        };
        let options = KpiOptions::new(FormulaFamily::DetectionAware, false);
        let r = compute_repairable(&inputs, &options);

        assert_eq!(r.uptime, -30.0);
        assert!(approx(r.availability, -0.3));
    }

    #[test]
    fn test_non_repairable() {
        let r = compute_non_repairable(&items(20_000.0, 1.0), &KpiOptions::default());

        assert_eq!(r.mttf, 20_000.0);
        assert_eq!(r.lambda, 1.0 / 20_000.0);
        assert!(approx(r.lambda, 0.00005));
        assert!(approx(r.fit, 50_000.0));
        assert!(r.mtbf.is_nan());
        assert!(r.mttr.is_nan());
        assert!(r.mcmt.is_nan());
        assert!(r.mtbm.is_nan());
        assert!(r.availability.is_nan());
    }

    #[test]
    fn test_non_repairable_with_preventive_maintenance() {
        let inputs = RawInputs {
            pm_time: TimeQuantity::hours(40.0),
            pm_actions: 4.0,
            ..items(1000.0, 1.0)
        };
        let r = compute_non_repairable(&inputs, &KpiOptions::new(FormulaFamily::Simple, true));

        assert_eq!(r.mpmt, 10.0);
        assert_eq!(r.mmt, 10.0);
        assert_eq!(r.uptime, 990.0);
        assert!(approx(r.availability, 0.99));
    }

    #[test]
    fn test_non_repairable_falls_back_to_failures() {
        let inputs = RawInputs {
            item_operating_time: TimeQuantity::hours(900.0),
            failures: 3.0,
            ..RawInputs::default()
        };
        let r = compute_non_repairable(&inputs, &KpiOptions::default());
        assert_eq!(r.mttf, 300.0);
    }

    #[test]
    fn test_combined_matches_both_perspectives() {
        let inputs = RawInputs {
            item_operating_time: TimeQuantity::hours(20_000.0),
            failed_items: 1.0,
            planned_actions: 2.0,
            corrective_actions: 3.0,
            ..fleet(5000.0, 1.0, 8.0)
        };
        let r = compute(&inputs, AnalysisMode::Combined, &KpiOptions::default());

        assert_eq!(r.mttf, 20_000.0);
        assert_eq!(r.mtbf, 5000.0);
        assert_eq!(r.mtbm, 1000.0);
        // failure rate follows the repairable side
        assert!(approx(r.lambda, 0.0002));
    }

    #[test]
    fn test_zero_failures_is_never_infinite() {
        let inputs = RawInputs {
            planned_actions: 0.0,
            corrective_actions: 0.0,
            ..fleet(5000.0, 0.0, 0.0)
        };
        for family in [FormulaFamily::Simple, FormulaFamily::DetectionAware] {
            let r = compute_repairable(&inputs, &KpiOptions::new(family, false));
            for value in [r.mtbf, r.mttr, r.mtbm, r.lambda, r.fit, r.availability] {
                assert!(value.is_nan(), "{family}: expected NaN, got {value}");
            }
        }

        let r = compute_non_repairable(&items(100.0, 0.0), &KpiOptions::default());
        assert!(r.mttf.is_nan());
        assert!(r.lambda.is_nan());
    }

    #[test]
    fn test_extreme_counts_stay_finite_or_undefined() {
        let families = [
            KpiOptions::new(FormulaFamily::Simple, true),
            KpiOptions::new(FormulaFamily::DetectionAware, true),
        ];
        let cases = [
            "operating_time: 5000\nfailures: .inf\nrepair_time: 8\n",
            "operating_time: 5000\nfailures: 1e-320\nrepair_time: 8\n",
            "operating_time: { value: 1e308, unit: years }\nfailures: 1\n",
            "item_operating_time: 20000\nfailed_items: 1e-320\n",
        ];

        for yaml in cases {
            let inputs: RawInputs = serde_yml::from_str(yaml).unwrap();
            for options in &families {
                for mode in [
                    AnalysisMode::Repairable,
                    AnalysisMode::NonRepairable,
                    AnalysisMode::Combined,
                ] {
                    let r = compute(&inputs, mode, options);
                    for m in Metric::ALL {
                        let v = r.get(m);
                        assert!(
                            v.is_finite() || v.is_nan(),
                            "{} = {} for {:?}",
                            m.key(),
                            v,
                            yaml
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_lambda_is_reciprocal_in_both_families() {
        let inputs = fleet(7300.0, 7.0, 21.0);
        let simple = compute_repairable(&inputs, &KpiOptions::default());
        let aware = compute_repairable(
            &RawInputs {
                detection_time: TimeQuantity::hours(0.0),
                ..inputs.clone()
            },
            &KpiOptions::new(FormulaFamily::DetectionAware, false),
        );

        assert!(approx(simple.lambda, 1.0 / simple.mtbf));
        assert!(approx(aware.lambda, simple.lambda));
    }

    #[test]
    fn test_units_are_normalized_before_computing() {
        let inputs = RawInputs {
            operating_time: TimeQuantity::new(1.0, TimeUnit::Years),
            failures: 2.0,
            repair_time: TimeQuantity::new(1.0, TimeUnit::Days),
            ..RawInputs::default()
        };
        let r = compute_repairable(&inputs, &KpiOptions::default());

        assert_eq!(r.mtbf, 4383.0);
        assert_eq!(r.mttr, 12.0);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let inputs = RawInputs {
            detection_time: TimeQuantity::hours(3.3),
            pm_time: TimeQuantity::hours(7.7),
            pm_actions: 3.0,
            ..fleet(12_345.6, 7.0, 19.1)
        };
        let calc = ReliabilityCalculator::new(
            AnalysisMode::Repairable,
            KpiOptions::new(FormulaFamily::DetectionAware, true),
        );

        assert!(calc.compute(&inputs).same_bits(&calc.compute(&inputs)));
    }

    #[test]
    fn test_missing_inputs_give_nan_not_panic() {
        for mode in [
            AnalysisMode::Repairable,
            AnalysisMode::NonRepairable,
            AnalysisMode::Combined,
        ] {
            let r = compute(&RawInputs::default(), mode, &KpiOptions::new(FormulaFamily::DetectionAware, true));
            assert!(Metric::ALL.iter().all(|m| r.get(*m).is_nan()));
        }
    }

    #[test]
    fn test_applicable_metrics() {
        let simple = applicable_metrics(AnalysisMode::Repairable, &KpiOptions::default());
        assert!(simple.contains(&Metric::Mtbm));
        assert!(!simple.contains(&Metric::Mttf));
        assert!(!simple.contains(&Metric::Mttd));

        let items = applicable_metrics(AnalysisMode::NonRepairable, &KpiOptions::default());
        assert_eq!(items, vec![Metric::Mttf, Metric::Lambda, Metric::Fit]);

        let aware = applicable_metrics(
            AnalysisMode::Combined,
            &KpiOptions::new(FormulaFamily::DetectionAware, true),
        );
        assert_eq!(aware.first(), Some(&Metric::Mttf));
        assert!(aware.contains(&Metric::Mpmt));
        assert!(aware.contains(&Metric::Uptime));
    }
}
