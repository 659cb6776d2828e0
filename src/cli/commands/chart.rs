//! `rkt chart` command - KPI bar chart in the terminal

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::plain_value;
use crate::cli::session::{AnalysisArgs, InputArgs, Session};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::render::{chart_metrics, chart_series, text_bars, Axis, ChartSeries};

#[derive(clap::Args, Debug)]
pub struct ChartArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Width of the longest bar, in characters
    #[arg(long, default_value = "40")]
    pub width: usize,
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Duration => "duration",
        Axis::Ratio => "ratio",
        Axis::Rate => "rate",
    }
}

pub fn run(args: ChartArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::prepare(&args.input, &args.analysis)?;
    let result = session.compute();
    let series = chart_series(
        &result,
        &chart_metrics(session.mode, &session.options),
        session.unit,
    );

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&series).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&series).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["label", "axis", "value"]).into_diagnostic()?;
            for p in &series.points {
                let value = plain_value(p.value);
                wtr.write_record([p.label.as_str(), axis_name(p.axis), value.as_str()])
                    .into_diagnostic()?;
            }
            wtr.flush().into_diagnostic()?;
        }
        OutputFormat::Tsv => {
            for p in &series.points {
                println!("{}\t{}\t{}", p.label, axis_name(p.axis), plain_value(p.value));
            }
        }
        OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(["KPI", "Axis", "Value"]);
            for p in &series.points {
                builder.push_record([
                    p.label.clone(),
                    axis_name(p.axis).to_string(),
                    plain_value(p.value),
                ]);
            }
            println!("{}", builder.build().with(Style::markdown()));
        }
        OutputFormat::Auto => print_chart(&session, &series, args.width, global),
    }

    Ok(())
}

fn print_chart(session: &Session, series: &ChartSeries, width: usize, global: &GlobalOpts) {
    if !global.quiet {
        println!(
            "{}",
            style(format!("KPI durations ({})", series.unit)).bold().underlined()
        );
    }
    for line in text_bars(series, &session.format, width) {
        println!("{}", line);
    }

    let fmt = &session.format;
    for p in series.on_axis(Axis::Ratio) {
        let value = fmt.number(p.value, fmt.precision.percent);
        let suffix = if p.value.is_finite() { "%" } else { "" };
        println!("{}  {}{}", style(&p.label).bold(), value, suffix);
    }
    for p in series.on_axis(Axis::Rate) {
        let value = fmt.number(p.value, fmt.precision.rate);
        let suffix = if p.value.is_finite() { " per hour" } else { "" };
        println!("{}  {}{}", style(&p.label).bold(), value, suffix);
    }
}
