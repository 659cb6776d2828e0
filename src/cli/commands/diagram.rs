//! `rkt diagram` command - SVG diagrams of the KPI results

use clap::ValueEnum;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::write_output;
use crate::cli::session::{AnalysisArgs, InputArgs, Session};
use crate::cli::GlobalOpts;
use crate::render::svg;
use crate::render::{chart_metrics, chart_series};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiagramKind {
    /// One failure cycle split into uptime, detection, repair and PM
    #[default]
    Timeline,
    /// Availability on a semicircular gauge
    Gauge,
    /// Duration KPIs as vertical bars
    Bars,
}

#[derive(clap::Args, Debug)]
pub struct DiagramArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Diagram to draw
    #[arg(long, short = 'k', default_value = "timeline")]
    pub kind: DiagramKind,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: DiagramArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::prepare(&args.input, &args.analysis)?;
    let result = session.compute();
    tracing::debug!(kind = ?args.kind, "drawing diagram");

    let document = match args.kind {
        DiagramKind::Timeline => svg::timeline(
            &result,
            session.mode,
            &session.options,
            session.unit,
            &session.format,
        ),
        DiagramKind::Gauge => svg::gauge(result.availability, &session.format),
        DiagramKind::Bars => {
            let series = chart_series(
                &result,
                &chart_metrics(session.mode, &session.options),
                session.unit,
            );
            svg::bars(&series, &session.format)
        }
    };

    write_output(&document, args.output, global)
}
