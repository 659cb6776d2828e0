//! Plain-language KPI definitions for `rkt explain`

use serde::Serialize;

use crate::kpi::result::Metric;

/// Explanation of one KPI
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Definition {
    pub metric: Metric,
    pub title: &'static str,
    pub formula: &'static str,
    pub meaning: &'static str,
    pub interpretation: &'static str,
}

pub fn definition(metric: Metric) -> Definition {
    match metric {
        Metric::Mttf => Definition {
            metric,
            title: "Mean Time To Failure",
            formula: "MTTF = item operating time / failed items",
            meaning: "Average service life of items that are replaced rather than repaired \
                      (lamps, batteries, seals, disposable parts).",
            interpretation: "An MTTF of 20,000 h means a typical item lasts about 20,000 operating \
                             hours before it has to be replaced. Use it to plan replacement intervals \
                             and spares.",
        },
        Metric::Mtbf => Definition {
            metric,
            title: "Mean Time Between Failures",
            formula: "MTBF = operating time / failures",
            meaning: "Average operating time between consecutive failures of a repairable system.",
            interpretation: "An MTBF of 5,000 h means one failure is expected every 5,000 running \
                             hours. Higher is better: fewer stoppages, steadier production.",
        },
        Metric::Mttr => Definition {
            metric,
            title: "Mean Time To Repair",
            formula: "MTTR = repair time / failures",
            meaning: "Average time to restore the system after a failure.",
            interpretation: "An MTTR of 8 h means a failure is fixed in 8 hours on average. Spares \
                             stock, technician training and better diagnostics bring it down.",
        },
        Metric::Mttd => Definition {
            metric,
            title: "Mean Time To Detect",
            formula: "MTTD = detection time / failures",
            meaning: "Average time between a failure occurring and it being noticed.",
            interpretation: "Long detection times add hidden downtime. Condition monitoring and \
                             alarms shorten it.",
        },
        Metric::Mcmt => Definition {
            metric,
            title: "Mean Corrective Maintenance Time",
            formula: "MCMT = repair time / unplanned actions  (detection-aware: MTTR + MTTD)",
            meaning: "Average downtime per unplanned maintenance action.",
            interpretation: "A high MCMT points at failures that are hard to reach, diagnose or \
                             fix.",
        },
        Metric::Mpmt => Definition {
            metric,
            title: "Mean Preventive Maintenance Time",
            formula: "MPMT = preventive maintenance time / preventive actions",
            meaning: "Average duration of one planned maintenance action.",
            interpretation: "Planned work still takes the asset out of service; MPMT shows how \
                             much each visit costs in availability.",
        },
        Metric::Mmt => Definition {
            metric,
            title: "Mean Maintenance Time",
            formula: "MMT = (PM time + detection time + repair time) / (PM actions + failures)",
            meaning: "Average duration of any maintenance action, planned or unplanned.",
            interpretation: "Blends corrective and preventive work into one figure for capacity \
                             planning of the maintenance crew.",
        },
        Metric::Mtbm => Definition {
            metric,
            title: "Mean Time Between Maintenance",
            formula: "MTBM = operating time / (planned actions + unplanned actions)",
            meaning: "Average operating time between any two maintenance actions.",
            interpretation: "An MTBM of 1,000 h means some maintenance happens every 1,000 hours. \
                             Tuning preventive intervals can stretch it.",
        },
        Metric::Uptime => Definition {
            metric,
            title: "Uptime per cycle",
            formula: "Uptime = MTBF - MCMT (- MPMT)   or   MTTF - MPMT",
            meaning: "Productive time left in an average failure cycle once maintenance is \
                      subtracted.",
            interpretation: "A negative uptime means the inputs are inconsistent: more \
                             maintenance time than operating time.",
        },
        Metric::Availability => Definition {
            metric,
            title: "Availability",
            formula: "A = MTBF / (MTBF + MTTR)   (detection-aware: uptime / MTBF)",
            meaning: "Share of time the system is ready for use.",
            interpretation: "95% availability means the asset is down 5% of the time for failures \
                             and maintenance. Critical processes usually aim above 99%.",
        },
        Metric::Lambda => Definition {
            metric,
            title: "Failure rate (λ)",
            formula: "λ = 1 / MTBF  (or 1 / MTTF for non-repairable items)",
            meaning: "Expected number of failures per operating hour.",
            interpretation: "λ = 0.0002 /h is one failure per 5,000 hours. Used in probabilistic \
                             and safety calculations.",
        },
        Metric::Fit => Definition {
            metric,
            title: "Failures In Time",
            formula: "FIT = λ × 10^9",
            meaning: "Failures per billion operating hours.",
            interpretation: "Convenient for very reliable parts such as electronics: 200 FIT is one \
                             failure per 5 million hours.",
        },
    }
}

/// All definitions in display order
pub fn all_definitions() -> Vec<Definition> {
    Metric::ALL.iter().map(|m| definition(*m)).collect()
}
