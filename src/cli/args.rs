//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    calc::CalcArgs, chart::ChartArgs, check::CheckArgs, completions::CompletionsArgs,
    diagram::DiagramArgs, explain::ExplainArgs, init::InitArgs, report::ReportArgs,
};

#[derive(Parser)]
#[command(name = "rkt")]
#[command(author, version, about = "Reliability and maintenance KPI calculator")]
#[command(long_about = "Computes MTTF, MTBF, MTTR, MTBM, availability, failure rate and related \
maintenance KPIs from cumulative operating data, and renders them as tables, charts, SVG diagrams \
and Markdown reports.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter input file
    Init(InitArgs),

    /// Compute KPIs and print them
    Calc(CalcArgs),

    /// Check inputs for implausible values
    Check(CheckArgs),

    /// Show KPIs as a bar chart
    Chart(ChartArgs),

    /// Draw an SVG diagram (failure cycle, availability gauge, duration bars)
    Diagram(DiagramArgs),

    /// Generate a Markdown analysis report
    Report(ReportArgs),

    /// Explain what each KPI means
    Explain(ExplainArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled table for the terminal
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}
