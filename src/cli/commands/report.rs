//! `rkt report` command - Markdown analysis report

use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{print_warnings, write_output};
use crate::cli::session::{AnalysisArgs, InputArgs, Session};
use crate::cli::GlobalOpts;
use crate::render::{render_report, ReportData, TemplateGenerator};

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Report heading (default from config)
    #[arg(long)]
    pub title: Option<String>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::prepare(&args.input, &args.analysis)?;
    let result = session.compute();
    let warnings = session.warnings();
    let title = args.title.unwrap_or_else(|| session.config.report_title());

    let generator = TemplateGenerator::new().map_err(|e| miette::miette!("{}", e))?;
    let report = render_report(
        &generator,
        &ReportData {
            title: &title,
            inputs: &session.inputs,
            result: &result,
            mode: session.mode,
            options: session.options,
            unit: session.unit,
            format: session.format,
            warnings: &warnings,
        },
    )
    .map_err(|e| miette::miette!("{}", e))?;

    // Warnings are in the report body; echo them only when it goes to a file
    if args.output.is_some() {
        print_warnings(&warnings, global);
    }
    write_output(&report, args.output, global)
}
