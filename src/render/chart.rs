//! Chart series for KPI results
//!
//! A series is rebuilt from scratch for every result; whoever draws it owns
//! any chart state.

use serde::Serialize;

use crate::core::units::{from_hours, TimeUnit};
use crate::kpi::{AnalysisMode, KpiOptions, KpiResult, Metric, MetricKind, NumberFormat, PLACEHOLDER};

/// Value axis a point is plotted against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Durations, in the series' display unit
    Duration,
    /// Percentages, 0..100
    Ratio,
    /// Failures per hour
    Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    /// NaN serializes as null
    pub value: f64,
    pub axis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub unit: TimeUnit,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn on_axis(&self, axis: Axis) -> impl Iterator<Item = &ChartPoint> {
        self.points.iter().filter(move |p| p.axis == axis)
    }
}

/// Metrics charted for a mode, durations first
pub fn chart_metrics(mode: AnalysisMode, options: &KpiOptions) -> Vec<Metric> {
    let mut metrics = match mode {
        AnalysisMode::Combined => vec![Metric::Mttf, Metric::Mttr, Metric::Mtbm, Metric::Mtbf],
        AnalysisMode::Repairable => {
            let mut m = vec![Metric::Mttr];
            if options.tracks_detection_time() {
                m.push(Metric::Mttd);
            } else {
                m.push(Metric::Mtbm);
            }
            m.push(Metric::Mtbf);
            m
        }
        AnalysisMode::NonRepairable => vec![Metric::Mttf],
    };
    if options.tracks_preventive_maintenance {
        metrics.push(Metric::Mpmt);
    }
    if mode != AnalysisMode::NonRepairable || options.tracks_preventive_maintenance {
        metrics.push(Metric::Availability);
    }
    metrics.push(Metric::Lambda);
    metrics
}

/// Build a series for `metrics`, converting durations to `unit`.
/// FIT is left out; it is λ on another scale.
pub fn chart_series(result: &KpiResult, metrics: &[Metric], unit: TimeUnit) -> ChartSeries {
    let points = metrics
        .iter()
        .filter_map(|&metric| {
            let raw = result.get(metric);
            let (value, axis) = match metric.kind() {
                MetricKind::Duration => (from_hours(raw, unit), Axis::Duration),
                MetricKind::Ratio => (raw * 100.0, Axis::Ratio),
                MetricKind::Rate => (raw, Axis::Rate),
                MetricKind::Fit => return None,
            };
            Some(ChartPoint {
                label: metric.label().to_string(),
                value,
                axis,
            })
        })
        .collect();

    ChartSeries { unit, points }
}

/// Horizontal text bars for the duration axis, one line per point
pub fn text_bars(series: &ChartSeries, fmt: &NumberFormat, width: usize) -> Vec<String> {
    let points: Vec<&ChartPoint> = series.on_axis(Axis::Duration).collect();
    let max = points
        .iter()
        .map(|p| p.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let label_width = points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);

    points
        .iter()
        .map(|p| {
            let bar = if p.value.is_finite() && p.value > 0.0 && max > 0.0 {
                let len = ((p.value / max) * width as f64).round() as usize;
                "█".repeat(len.max(1))
            } else {
                String::new()
            };
            let value = if p.value.is_finite() {
                format!(
                    "{} {}",
                    fmt.number(p.value, fmt.precision.duration),
                    series.unit
                )
            } else {
                PLACEHOLDER.to_string()
            };
            format!(
                "{:<label_width$}  {:<bar_width$}  {}",
                p.label,
                bar,
                value,
                label_width = label_width,
                bar_width = width
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KpiResult {
        KpiResult {
            mttf: 20_000.0,
            mtbf: 5000.0,
            mttr: 8.0,
            mtbm: 1000.0,
            availability: 0.5,
            lambda: 0.0002,
            fit: 200_000.0,
            ..KpiResult::undefined()
        }
    }

    #[test]
    fn test_series_axes_and_conversion() {
        let metrics = [
            Metric::Mttf,
            Metric::Mttr,
            Metric::Availability,
            Metric::Lambda,
            Metric::Fit,
        ];
        let series = chart_series(&sample(), &metrics, TimeUnit::Days);

        assert_eq!(series.points.len(), 4);
        assert_eq!(series.points[0].label, "MTTF");
        assert!((series.points[0].value - 20_000.0 / 24.0).abs() < 1e-9);
        assert_eq!(series.points[2].axis, Axis::Ratio);
        assert_eq!(series.points[2].value, 50.0);
        assert_eq!(series.points[3].axis, Axis::Rate);
        assert_eq!(series.on_axis(Axis::Duration).count(), 2);
    }

    #[test]
    fn test_chart_metrics_per_mode() {
        let combined = chart_metrics(AnalysisMode::Combined, &KpiOptions::default());
        assert_eq!(
            combined,
            [
                Metric::Mttf,
                Metric::Mttr,
                Metric::Mtbm,
                Metric::Mtbf,
                Metric::Availability,
                Metric::Lambda
            ]
        );

        let items = chart_metrics(AnalysisMode::NonRepairable, &KpiOptions::default());
        assert_eq!(items, [Metric::Mttf, Metric::Lambda]);

        let options = KpiOptions::new(crate::kpi::FormulaFamily::DetectionAware, true);
        let repairable = chart_metrics(AnalysisMode::Repairable, &options);
        assert!(repairable.contains(&Metric::Mttd));
        assert!(repairable.contains(&Metric::Mpmt));
    }

    #[test]
    fn test_series_is_fresh_each_call() {
        let metrics = [Metric::Mtbf];
        let a = chart_series(&sample(), &metrics, TimeUnit::Hours);
        let b = chart_series(&sample(), &metrics, TimeUnit::Hours);
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_bars() {
        let metrics = [Metric::Mtbf, Metric::Mttr, Metric::Mttd];
        let series = chart_series(&sample(), &metrics, TimeUnit::Hours);
        let lines = text_bars(&series, &NumberFormat::default(), 20);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains(&"█".repeat(20)));
        assert!(lines[0].ends_with("5,000.00 hours"));
        // small but non-zero values still get a visible bar
        assert!(lines[1].contains('█'));
        assert!(lines[2].ends_with(PLACEHOLDER));
    }

    #[test]
    fn test_json_shape() {
        let series = chart_series(&sample(), &[Metric::Mttd], TimeUnit::Hours);
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["unit"], "hours");
        assert_eq!(json["points"][0]["axis"], "duration");
        assert!(json["points"][0]["value"].is_null());
    }
}
