//! # SVG diagrams
//!
//! Failure-cycle timeline, availability gauge and duration bar chart. Every
//! function returns a complete SVG document as a string.

use std::f64::consts::PI;
use std::fmt::Write;

use crate::core::units::{from_hours, TimeUnit};
use crate::kpi::{AnalysisMode, FormulaFamily, KpiOptions, KpiResult, NumberFormat};
use crate::render::chart::{Axis, ChartSeries};

pub const COLOR_UPTIME: &str = "#13d17c";
pub const COLOR_DETECT: &str = "#f5a623";
pub const COLOR_REPAIR: &str = "#e5484d";
pub const COLOR_PREVENTIVE: &str = "#3e7bfa";
pub const COLOR_TRACK: &str = "#e3e6ea";
pub const COLOR_TEXT: &str = "#222c38";
pub const COLOR_MUTED: &str = "#6b7480";

/// SVG document builder (screen coordinates, origin top-left)
pub struct SvgDocument {
    pub width: u32,
    pub height: u32,
    content: String,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            content: String::with_capacity(4096),
        }
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        let _ = write!(
            self.content,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            x, y, w, h, fill
        );
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, stroke_width: f64) {
        let _ = write!(
            self.content,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.1}"/>"#,
            x1, y1, x2, y2, stroke, stroke_width
        );
    }

    /// Stroked path, no fill
    pub fn stroke_path(&mut self, d: &str, stroke: &str, stroke_width: f64) {
        let _ = write!(
            self.content,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            d, stroke, stroke_width
        );
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, font_size: f64, fill: &str, anchor: &str) {
        let _ = write!(
            self.content,
            r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{:.1}" fill="{}" text-anchor="{}">{}</text>"#,
            x,
            y,
            font_size,
            fill,
            anchor,
            escape(content)
        );
    }

    pub fn to_svg(&self) -> String {
        format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">
<rect width="100%" height="100%" fill="#ffffff"/>
{content}
</svg>
"##,
            w = self.width,
            h = self.height,
            content = self.content
        )
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// One stretch of a failure cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub label: &'static str,
    pub hours: f64,
    pub color: &'static str,
}

/// Break the governing cycle (MTBF, or MTTF for items) into its parts.
///
/// Returns an empty list when the cycle itself is undefined.
pub fn cycle_segments(result: &KpiResult, mode: AnalysisMode, options: &KpiOptions) -> Vec<Segment> {
    let seg = |label, hours, color| Segment { label, hours, color };
    let pm = options.tracks_preventive_maintenance && result.mpmt.is_finite();

    let segments = match mode {
        AnalysisMode::NonRepairable => {
            if !result.mttf.is_finite() {
                return Vec::new();
            }
            if pm {
                vec![
                    seg("Uptime", result.uptime, COLOR_UPTIME),
                    seg("MPMT", result.mpmt, COLOR_PREVENTIVE),
                ]
            } else {
                vec![seg("MTTF", result.mttf, COLOR_UPTIME)]
            }
        }
        AnalysisMode::Repairable | AnalysisMode::Combined => {
            if !result.mtbf.is_finite() {
                return Vec::new();
            }
            match options.family {
                // repair follows the operating stretch: cycle = MTBF + MTTR
                FormulaFamily::Simple => vec![
                    seg("MTBF", result.mtbf, COLOR_UPTIME),
                    seg("MTTR", result.mttr, COLOR_REPAIR),
                ],
                // maintenance is carved out of the MTBF
                FormulaFamily::DetectionAware => {
                    let mut parts = vec![seg("Uptime", result.uptime, COLOR_UPTIME)];
                    if pm {
                        parts.push(seg("MPMT", result.mpmt, COLOR_PREVENTIVE));
                    }
                    parts.push(seg("MTTD", result.mttd, COLOR_DETECT));
                    parts.push(seg("MTTR", result.mttr, COLOR_REPAIR));
                    parts
                }
            }
        }
    };

    segments
        .into_iter()
        .filter(|s| s.hours.is_finite())
        .collect()
}

/// Horizontal failure-cycle timeline
pub fn timeline(
    result: &KpiResult,
    mode: AnalysisMode,
    options: &KpiOptions,
    unit: TimeUnit,
    fmt: &NumberFormat,
) -> String {
    let mut doc = SvgDocument::new(800, 220);
    let title = match mode {
        AnalysisMode::NonRepairable => "Item life (one MTTF)",
        _ => "Failure cycle (one MTBF)",
    };
    doc.text(40.0, 36.0, title, 18.0, COLOR_TEXT, "start");

    let segments = cycle_segments(result, mode, options);
    // negative stretches (inconsistent data) take no room on the bar
    let total: f64 = segments.iter().map(|s| s.hours.max(0.0)).sum();

    if segments.is_empty() || total <= 0.0 {
        doc.text(400.0, 120.0, "Not enough data to draw the cycle", 14.0, COLOR_MUTED, "middle");
        return doc.to_svg();
    }

    let (left, bar_y, bar_w, bar_h) = (40.0, 80.0, 720.0, 40.0);
    doc.rect(left, bar_y, bar_w, bar_h, COLOR_TRACK);

    let mut x = left;
    for (i, s) in segments.iter().enumerate() {
        let share = s.hours.max(0.0) / total;
        // keep short stretches visible
        let w = if share > 0.0 { (share * bar_w).max(2.0) } else { 0.0 };
        let w = w.min(left + bar_w - x);
        doc.rect(x, bar_y, w, bar_h, s.color);

        let label_y = bar_y + bar_h + 22.0 + (i % 2) as f64 * 18.0;
        let value = fmt.number(from_hours(s.hours, unit), fmt.precision.duration);
        doc.line(x + w / 2.0, bar_y + bar_h, x + w / 2.0, label_y - 12.0, COLOR_MUTED, 1.0);
        doc.text(
            x + w / 2.0,
            label_y,
            &format!("{} {} {}", s.label, value, unit.suffix()),
            12.0,
            COLOR_TEXT,
            "middle",
        );
        x += w;
    }

    if segments.iter().any(|s| s.hours < 0.0) {
        doc.text(40.0, 205.0, "Negative uptime: check the inputs", 12.0, COLOR_REPAIR, "start");
    }

    doc.to_svg()
}

/// Point on the gauge arc for a fill fraction (0 = left, 1 = right)
fn arc_point(cx: f64, cy: f64, r: f64, fraction: f64) -> (f64, f64) {
    let angle = PI * (1.0 - fraction);
    (cx + r * angle.cos(), cy - r * angle.sin())
}

/// Semicircular availability gauge
pub fn gauge(availability: f64, fmt: &NumberFormat) -> String {
    let mut doc = SvgDocument::new(320, 200);
    let (cx, cy, r) = (160.0, 160.0, 120.0);

    let (x0, y0) = arc_point(cx, cy, r, 0.0);
    let (x1, y1) = arc_point(cx, cy, r, 1.0);
    doc.stroke_path(
        &format!("M {:.2} {:.2} A {r} {r} 0 0 1 {:.2} {:.2}", x0, y0, x1, y1, r = r),
        COLOR_TRACK,
        22.0,
    );

    if availability.is_finite() {
        let fraction = availability.clamp(0.0, 1.0);
        let color = if availability >= 0.99 {
            COLOR_UPTIME
        } else if availability >= 0.95 {
            COLOR_DETECT
        } else {
            COLOR_REPAIR
        };
        if fraction > 0.0 {
            let (xv, yv) = arc_point(cx, cy, r, fraction);
            doc.stroke_path(
                &format!("M {:.2} {:.2} A {r} {r} 0 0 1 {:.2} {:.2}", x0, y0, xv, yv, r = r),
                color,
                22.0,
            );
        }
    }

    doc.text(
        cx,
        cy - 10.0,
        &fmt.percent(availability, fmt.precision.percent.min(2)),
        28.0,
        COLOR_TEXT,
        "middle",
    );
    doc.text(cx, cy + 22.0, "Availability", 13.0, COLOR_MUTED, "middle");
    doc.to_svg()
}

/// Vertical bars for the duration points of a series
pub fn bars(series: &ChartSeries, fmt: &NumberFormat) -> String {
    let points: Vec<_> = series.on_axis(Axis::Duration).collect();
    let mut doc = SvgDocument::new(640, 360);
    doc.text(40.0, 30.0, &format!("KPI durations ({})", series.unit), 16.0, COLOR_TEXT, "start");

    let (left, top, plot_w, plot_h) = (60.0, 50.0, 540.0, 250.0);
    let baseline = top + plot_h;
    doc.line(left, baseline, left + plot_w, baseline, COLOR_MUTED, 1.0);

    let max = points
        .iter()
        .map(|p| p.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    if points.is_empty() {
        return doc.to_svg();
    }

    let slot = plot_w / points.len() as f64;
    for (i, p) in points.iter().enumerate() {
        let cx = left + slot * (i as f64 + 0.5);
        let h = if p.value.is_finite() && p.value > 0.0 && max > 0.0 {
            p.value / max * plot_h
        } else {
            0.0
        };
        if h > 0.0 {
            doc.rect(cx - slot * 0.3, baseline - h, slot * 0.6, h, COLOR_PREVENTIVE);
        }
        doc.text(
            cx,
            baseline - h - 6.0,
            &fmt.number(p.value, fmt.precision.duration),
            11.0,
            COLOR_TEXT,
            "middle",
        );
        doc.text(cx, baseline + 18.0, &p.label, 12.0, COLOR_TEXT, "middle");
    }

    doc.to_svg()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::chart::{chart_metrics, chart_series};

    fn detection_result() -> KpiResult {
        KpiResult {
            mtbf: 1000.0,
            mttr: 6.0,
            mttd: 2.0,
            mcmt: 8.0,
            uptime: 992.0,
            availability: 0.992,
            ..KpiResult::undefined()
        }
    }

    #[test]
    fn test_document_wrapper() {
        let mut doc = SvgDocument::new(100, 50);
        doc.rect(0.0, 0.0, 10.0, 10.0, "red");
        let svg = doc.to_svg();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(svg.contains("<rect x=\"0.00\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = SvgDocument::new(10, 10);
        doc.text(0.0, 0.0, "A<B & C", 10.0, "black", "start");
        assert!(doc.to_svg().contains("A&lt;B &amp; C"));
    }

    #[test]
    fn test_cycle_segments_detection_aware() {
        let options = KpiOptions::new(FormulaFamily::DetectionAware, false);
        let segs = cycle_segments(&detection_result(), AnalysisMode::Repairable, &options);

        let labels: Vec<_> = segs.iter().map(|s| s.label).collect();
        assert_eq!(labels, ["Uptime", "MTTD", "MTTR"]);
        let total: f64 = segs.iter().map(|s| s.hours).sum();
        assert_eq!(total, 1000.0);
    }

    #[test]
    fn test_cycle_segments_simple_and_items() {
        let result = KpiResult {
            mtbf: 5000.0,
            mttr: 8.0,
            mttf: 20_000.0,
            ..KpiResult::undefined()
        };
        let simple = cycle_segments(&result, AnalysisMode::Combined, &KpiOptions::default());
        assert_eq!(simple.len(), 2);
        assert_eq!(simple[1].label, "MTTR");

        let items = cycle_segments(&result, AnalysisMode::NonRepairable, &KpiOptions::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].hours, 20_000.0);
    }

    #[test]
    fn test_cycle_segments_undefined() {
        let segs = cycle_segments(&KpiResult::undefined(), AnalysisMode::Repairable, &KpiOptions::default());
        assert!(segs.is_empty());
    }

    #[test]
    fn test_timeline_svg() {
        let options = KpiOptions::new(FormulaFamily::DetectionAware, false);
        let svg = timeline(
            &detection_result(),
            AnalysisMode::Repairable,
            &options,
            TimeUnit::Hours,
            &NumberFormat::default(),
        );
        assert!(svg.contains(COLOR_DETECT));
        assert!(svg.contains("MTTD 2.00 h"));
        assert!(svg.contains("Uptime 992.00 h"));
    }

    #[test]
    fn test_timeline_without_data() {
        let svg = timeline(
            &KpiResult::undefined(),
            AnalysisMode::Repairable,
            &KpiOptions::default(),
            TimeUnit::Days,
            &NumberFormat::default(),
        );
        assert!(svg.contains("Not enough data"));
    }

    #[test]
    fn test_arc_point_endpoints() {
        let (x, y) = arc_point(100.0, 100.0, 50.0, 0.0);
        assert!((x - 50.0).abs() < 1e-9 && (y - 100.0).abs() < 1e-9);
        let (x, y) = arc_point(100.0, 100.0, 50.0, 0.5);
        assert!((x - 100.0).abs() < 1e-9 && (y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_gauge() {
        let svg = gauge(0.992, &NumberFormat::default());
        assert!(svg.contains("99.20%"));
        assert!(svg.contains(COLOR_UPTIME) || svg.contains(COLOR_DETECT));

        let empty = gauge(f64::NAN, &NumberFormat::default());
        assert!(empty.contains(crate::kpi::PLACEHOLDER));
        assert!(!empty.contains(COLOR_REPAIR));
    }

    #[test]
    fn test_bars() {
        let result = KpiResult {
            mtbf: 5000.0,
            mttr: 8.0,
            ..KpiResult::undefined()
        };
        let series = chart_series(
            &result,
            &chart_metrics(AnalysisMode::Repairable, &KpiOptions::default()),
            TimeUnit::Hours,
        );
        let svg = bars(&series, &NumberFormat::default());
        assert!(svg.contains(">MTBF<"));
        assert!(svg.contains("5,000.00"));
        assert!(svg.contains(crate::kpi::PLACEHOLDER)); // MTBM undefined
    }
}
