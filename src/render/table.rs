//! Result rows shared by `calc` output and the report

use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::core::units::{from_hours, TimeUnit};
use crate::kpi::{KpiResult, Metric, MetricKind, NumberFormat};

/// One displayed KPI: value converted and formatted, plus its unit label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub metric: Metric,
    pub label: &'static str,
    /// Value in display units; NaN serializes as null
    pub value: f64,
    pub formatted: String,
    pub unit: String,
}

pub fn unit_label(kind: MetricKind, unit: TimeUnit) -> String {
    match kind {
        MetricKind::Duration => unit.as_str().to_string(),
        MetricKind::Ratio => String::new(),
        MetricKind::Rate => "per hour".to_string(),
        MetricKind::Fit => "per 10^9 h".to_string(),
    }
}

/// Value of `metric` in display units (durations converted, others as-is)
pub fn display_value(result: &KpiResult, metric: Metric, unit: TimeUnit) -> f64 {
    let raw = result.get(metric);
    match metric.kind() {
        MetricKind::Duration => from_hours(raw, unit),
        _ => raw,
    }
}

pub fn result_rows(
    result: &KpiResult,
    metrics: &[Metric],
    unit: TimeUnit,
    fmt: &NumberFormat,
) -> Vec<ResultRow> {
    metrics
        .iter()
        .map(|&metric| {
            let value = display_value(result, metric, unit);
            ResultRow {
                metric,
                label: metric.label(),
                value,
                formatted: fmt.metric(metric, value),
                unit: unit_label(metric.kind(), unit),
            }
        })
        .collect()
}

/// Markdown table of result rows
pub fn markdown_table(rows: &[ResultRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["KPI", "Value", "Unit"]);
    for row in rows {
        builder.push_record([row.label, row.formatted.as_str(), row.unit.as_str()]);
    }
    builder.build().with(Style::markdown()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::PLACEHOLDER;

    fn rows() -> Vec<ResultRow> {
        let result = KpiResult {
            mtbf: 48.0,
            availability: 0.5,
            lambda: 1.0 / 48.0,
            ..KpiResult::undefined()
        };
        result_rows(
            &result,
            &[Metric::Mtbf, Metric::Mttr, Metric::Availability, Metric::Lambda],
            TimeUnit::Days,
            &NumberFormat::default(),
        )
    }

    #[test]
    fn test_rows_convert_durations_only() {
        let rows = rows();
        assert_eq!(rows[0].value, 2.0);
        assert_eq!(rows[0].formatted, "2.00");
        assert_eq!(rows[0].unit, "days");
        assert_eq!(rows[1].formatted, PLACEHOLDER);
        assert_eq!(rows[2].formatted, "50.0000%");
        assert_eq!(rows[3].formatted, "0.020833");
        assert_eq!(rows[3].unit, "per hour");
    }

    #[test]
    fn test_markdown_table() {
        let table = markdown_table(&rows());
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("| KPI"));
        assert!(lines[1].starts_with("|--"));
        assert!(table.contains("| MTBF"));
    }
}
