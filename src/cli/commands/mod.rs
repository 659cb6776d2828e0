//! CLI command implementations

pub mod calc;
pub mod chart;
pub mod check;
pub mod completions;
pub mod diagram;
pub mod explain;
pub mod init;
pub mod report;
