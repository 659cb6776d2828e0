//! RKT: Reliability KPI Toolkit
//!
//! Reliability and maintenance KPIs (MTTF, MTBF, MTTR, MTBM, availability,
//! failure rate and friends) from cumulative operating data, with a CLI for
//! tables, charts, SVG diagrams and Markdown reports.

pub mod cli;
pub mod core;
pub mod kpi;
pub mod render;
pub mod yaml;
