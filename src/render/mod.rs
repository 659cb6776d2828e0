//! Presentation of KPI results: chart series, SVG diagrams, tables and reports

pub mod chart;
pub mod report;
pub mod svg;
pub mod table;
pub mod template;

pub use chart::{chart_metrics, chart_series, text_bars, Axis, ChartPoint, ChartSeries};
pub use report::{formula_lines, render_report, FormulaLine, ReportData};
pub use table::{markdown_table, result_rows, ResultRow};
pub use template::{InputsContext, TemplateError, TemplateGenerator};
