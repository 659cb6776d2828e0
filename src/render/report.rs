//! Markdown analysis report

use chrono::Local;
use serde::Serialize;

use crate::core::input::{RawInputs, TimeQuantity};
use crate::core::units::TimeUnit;
use crate::kpi::{
    definitions::definition, AnalysisMode, FormulaFamily, KpiOptions, KpiResult, NumberFormat,
    Warning,
};
use crate::render::table::{markdown_table, result_rows};
use crate::render::template::{TemplateError, TemplateGenerator, REPORT_TEMPLATE};

/// Everything a report shows
pub struct ReportData<'a> {
    pub title: &'a str,
    pub inputs: &'a RawInputs,
    pub result: &'a KpiResult,
    pub mode: AnalysisMode,
    pub options: KpiOptions,
    pub unit: TimeUnit,
    pub format: NumberFormat,
    pub warnings: &'a [Warning],
}

#[derive(Debug, Serialize)]
struct InputRow {
    label: &'static str,
    value: String,
}

/// A formula and the same formula with numbers filled in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaLine {
    pub formula: &'static str,
    pub substituted: String,
}

#[derive(Debug, Serialize)]
struct DefinitionRow {
    title: &'static str,
    meaning: &'static str,
}

pub fn render_report(
    generator: &TemplateGenerator,
    data: &ReportData<'_>,
) -> Result<String, TemplateError> {
    let metrics = crate::kpi::applicable_metrics(data.mode, &data.options);
    let rows = result_rows(data.result, &metrics, data.unit, &data.format);

    let definitions: Vec<DefinitionRow> = metrics
        .iter()
        .map(|&m| {
            let d = definition(m);
            DefinitionRow {
                title: d.title,
                meaning: d.meaning,
            }
        })
        .collect();

    let mut context = tera::Context::new();
    context.insert("title", data.title);
    context.insert("name", &data.inputs.name);
    context.insert("generated", &Local::now().format("%Y-%m-%d %H:%M").to_string());
    context.insert("mode", &data.mode.to_string());
    context.insert("family", &data.options.family.to_string());
    context.insert(
        "preventive_maintenance",
        &data.options.tracks_preventive_maintenance,
    );
    context.insert("unit", data.unit.as_str());
    context.insert("inputs", &input_rows(data.inputs, &data.format));
    context.insert("results_table", &markdown_table(&rows));
    context.insert(
        "formulas",
        &formula_lines(data.inputs, data.result, data.mode, &data.options, &data.format),
    );
    let warnings: Vec<String> = data.warnings.iter().map(ToString::to_string).collect();
    context.insert("warnings", &warnings);
    context.insert("definitions", &definitions);

    generator.render(REPORT_TEMPLATE, &context)
}

fn input_rows(inputs: &RawInputs, fmt: &NumberFormat) -> Vec<InputRow> {
    let duration = |q: &TimeQuantity| {
        if q.value.is_finite() {
            format!("{} {}", fmt.number(q.value, fmt.precision.duration), q.unit)
        } else {
            fmt.number(q.value, 0)
        }
    };
    let count = |v: f64| fmt.number(v, 0);

    vec![
        InputRow {
            label: "Total operating time of all items",
            value: duration(&inputs.item_operating_time),
        },
        InputRow {
            label: "Failed items",
            value: count(inputs.failed_items),
        },
        InputRow {
            label: "Total operating time",
            value: duration(&inputs.operating_time),
        },
        InputRow {
            label: "Failures",
            value: count(inputs.failures),
        },
        InputRow {
            label: "Total repair time",
            value: duration(&inputs.repair_time),
        },
        InputRow {
            label: "Total detection time",
            value: duration(&inputs.detection_time),
        },
        InputRow {
            label: "Total preventive maintenance time",
            value: duration(&inputs.pm_time),
        },
        InputRow {
            label: "Preventive maintenance actions",
            value: count(inputs.pm_actions),
        },
        InputRow {
            label: "Planned maintenance actions",
            value: count(inputs.planned_actions),
        },
        InputRow {
            label: "Unplanned maintenance actions",
            value: count(inputs.corrective_actions),
        },
    ]
}

/// Formulas used for `mode`, each with the inputs substituted (all in hours)
pub fn formula_lines(
    inputs: &RawInputs,
    result: &KpiResult,
    mode: AnalysisMode,
    options: &KpiOptions,
    fmt: &NumberFormat,
) -> Vec<FormulaLine> {
    let h = inputs.normalize();
    let d = |x: f64| fmt.number(x, fmt.precision.duration);
    let n = |x: f64| fmt.number(x, 0);
    let pct = |x: f64| fmt.percent(x, fmt.precision.percent);
    let rate = |x: f64| fmt.number(x, fmt.precision.rate);
    let pm = options.tracks_preventive_maintenance;

    let mut lines = Vec::new();
    let mut push = |formula: &'static str, substituted: String| {
        lines.push(FormulaLine {
            formula,
            substituted,
        })
    };

    if mode == AnalysisMode::NonRepairable {
        let failed = if h.failed_items.is_finite() {
            h.failed_items
        } else {
            h.failures
        };
        push(
            "MTTF = item operating time / failed items",
            format!("{} / {} = {} h", d(h.item_hours), n(failed), d(result.mttf)),
        );
        if pm {
            push(
                "MPMT = PM time / PM actions",
                format!("{} / {} = {} h", d(h.pm_hours), n(h.pm_actions), d(result.mpmt)),
            );
            push(
                "Uptime = MTTF - MPMT",
                format!("{} - {} = {} h", d(result.mttf), d(result.mpmt), d(result.uptime)),
            );
            push(
                "A = uptime / MTTF",
                format!("{} / {} = {}", d(result.uptime), d(result.mttf), pct(result.availability)),
            );
        }
        push(
            "λ = 1 / MTTF",
            format!("1 / {} = {} per hour", d(result.mttf), rate(result.lambda)),
        );
    } else {
        if mode == AnalysisMode::Combined {
            push(
                "MTTF = item operating time / failed items",
                format!("{} / {} = {} h", d(h.item_hours), n(h.failed_items), d(result.mttf)),
            );
        }
        push(
            "MTBF = operating time / failures",
            format!("{} / {} = {} h", d(h.total_hours), n(h.failures), d(result.mtbf)),
        );
        push(
            "MTTR = repair time / failures",
            format!("{} / {} = {} h", d(h.repair_hours), n(h.failures), d(result.mttr)),
        );

        match options.family {
            FormulaFamily::Simple => {
                push(
                    "A = MTBF / (MTBF + MTTR)",
                    format!(
                        "{} / ({} + {}) = {}",
                        d(result.mtbf),
                        d(result.mtbf),
                        d(result.mttr),
                        pct(result.availability)
                    ),
                );
                push(
                    "λ = failures / operating time",
                    format!("{} / {} = {} per hour", n(h.failures), d(h.total_hours), rate(result.lambda)),
                );
                push(
                    "MTBM = operating time / (planned + unplanned actions)",
                    format!(
                        "{} / ({} + {}) = {} h",
                        d(h.total_hours),
                        n(h.planned_actions),
                        n(h.corrective_actions),
                        d(result.mtbm)
                    ),
                );
                push(
                    "MCMT = repair time / unplanned actions",
                    format!("{} / {} = {} h", d(h.repair_hours), n(h.corrective_actions), d(result.mcmt)),
                );
                if pm {
                    push(
                        "MPMT = PM time / PM actions",
                        format!("{} / {} = {} h", d(h.pm_hours), n(h.pm_actions), d(result.mpmt)),
                    );
                }
            }
            FormulaFamily::DetectionAware => {
                push(
                    "MTTD = detection time / failures",
                    format!("{} / {} = {} h", d(h.detect_hours), n(h.failures), d(result.mttd)),
                );
                push(
                    "MCMT = MTTR + MTTD",
                    format!("{} + {} = {} h", d(result.mttr), d(result.mttd), d(result.mcmt)),
                );
                if pm {
                    push(
                        "MPMT = PM time / PM actions",
                        format!("{} / {} = {} h", d(h.pm_hours), n(h.pm_actions), d(result.mpmt)),
                    );
                    push(
                        "MMT = (PM + detection + repair time) / (PM actions + failures)",
                        format!(
                            "({} + {} + {}) / ({} + {}) = {} h",
                            d(h.pm_hours),
                            d(h.detect_hours),
                            d(h.repair_hours),
                            n(h.pm_actions),
                            n(h.failures),
                            d(result.mmt)
                        ),
                    );
                    push(
                        "Uptime = MTBF - MCMT - MPMT",
                        format!(
                            "{} - {} - {} = {} h",
                            d(result.mtbf),
                            d(result.mcmt),
                            d(result.mpmt),
                            d(result.uptime)
                        ),
                    );
                } else {
                    push(
                        "MMT = (detection + repair time) / failures",
                        format!(
                            "({} + {}) / {} = {} h",
                            d(h.detect_hours),
                            d(h.repair_hours),
                            n(h.failures),
                            d(result.mmt)
                        ),
                    );
                    push(
                        "Uptime = MTBF - MCMT",
                        format!("{} - {} = {} h", d(result.mtbf), d(result.mcmt), d(result.uptime)),
                    );
                }
                push(
                    "A = uptime / MTBF",
                    format!("{} / {} = {}", d(result.uptime), d(result.mtbf), pct(result.availability)),
                );
                push(
                    "λ = 1 / MTBF",
                    format!("1 / {} = {} per hour", d(result.mtbf), rate(result.lambda)),
                );
            }
        }
    }

    push(
        "FIT = λ × 10^9",
        format!("{} × 10^9 = {}", rate(result.lambda), fmt.number(result.fit, fmt.precision.fit)),
    );
    lines
}
