//! `rkt calc` command - compute and print KPIs

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{plain_value, print_warnings};
use crate::cli::session::{AnalysisArgs, InputArgs, Session};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::units::TimeUnit;
use crate::kpi::{AnalysisMode, FormulaFamily, Warning};
use crate::render::{markdown_table, result_rows, ResultRow};

#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Machine-readable calculation output
#[derive(Debug, Serialize)]
struct CalcOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    mode: AnalysisMode,
    family: FormulaFamily,
    preventive_maintenance: bool,
    unit: TimeUnit,
    results: &'a [ResultRow],
    warnings: &'a [Warning],
}

pub fn run(args: CalcArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::prepare(&args.input, &args.analysis)?;
    let result = session.compute();
    let rows = result_rows(&result, &session.metrics(), session.unit, &session.format);
    let warnings = session.warnings();

    let output = CalcOutput {
        name: session.inputs.name.as_deref(),
        mode: session.mode,
        family: session.options.family,
        preventive_maintenance: session.options.tracks_preventive_maintenance,
        unit: session.unit,
        results: &rows,
        warnings: &warnings,
    };

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&output).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["metric", "label", "value", "unit"])
                .into_diagnostic()?;
            for row in &rows {
                wtr.write_record([
                    row.metric.key().to_string(),
                    row.label.to_string(),
                    plain_value(row.value),
                    row.unit.clone(),
                ])
                .into_diagnostic()?;
            }
            wtr.flush().into_diagnostic()?;
            print_warnings(&warnings, global);
        }
        OutputFormat::Tsv => {
            for row in &rows {
                println!("{}\t{}\t{}", row.metric.key(), plain_value(row.value), row.unit);
            }
            print_warnings(&warnings, global);
        }
        OutputFormat::Md => {
            println!("{}", markdown_table(&rows));
            print_warnings(&warnings, global);
        }
        OutputFormat::Auto => {
            print_table(&session, &rows, global);
            print_warnings(&warnings, global);
        }
    }

    Ok(())
}

fn print_table(session: &Session, rows: &[ResultRow], global: &GlobalOpts) {
    if !global.quiet {
        let title = session
            .inputs
            .name
            .clone()
            .unwrap_or_else(|| "Reliability KPIs".to_string());
        println!("{}", style(title).bold().underlined());
        println!(
            "{}",
            style(format!(
                "mode: {}  formulas: {}  pm: {}  unit: {}",
                session.mode,
                session.options.family,
                if session.options.tracks_preventive_maintenance { "yes" } else { "no" },
                session.unit
            ))
            .dim()
        );
        println!();
    }

    let label_width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|r| r.formatted.chars().count()).max().unwrap_or(0);

    for row in rows {
        let label = format!("{:<width$}", row.label, width = label_width);
        let value = format!("{:>width$}", row.formatted, width = value_width);
        let value = if row.value.is_finite() {
            style(value).cyan()
        } else {
            style(value).dim()
        };
        println!("{}  {}  {}", style(label).bold(), value, style(&row.unit).dim());
    }
}
