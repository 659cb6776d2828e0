//! `rkt explain` command - plain-language KPI definitions

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::truncate_str;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::kpi::definitions::{all_definitions, definition, Definition};
use crate::kpi::Metric;

#[derive(clap::Args, Debug)]
pub struct ExplainArgs {
    /// KPI to explain (default: list all)
    #[arg(value_enum)]
    pub kpi: Option<Metric>,
}

pub fn run(args: ExplainArgs, global: &GlobalOpts) -> Result<()> {
    let defs = match args.kpi {
        Some(metric) => vec![definition(metric)],
        None => all_definitions(),
    };

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&defs).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&defs).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(["KPI", "Formula", "Meaning"]);
            for d in &defs {
                builder.push_record([d.title, d.formula, d.meaning]);
            }
            println!("{}", builder.build().with(Style::markdown()));
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            let sep = if global.format == OutputFormat::Tsv { '\t' } else { ',' };
            let mut wtr = csv::WriterBuilder::new()
                .delimiter(sep as u8)
                .from_writer(std::io::stdout());
            for d in &defs {
                wtr.write_record([d.metric.key(), d.title, d.formula])
                    .into_diagnostic()?;
            }
            wtr.flush().into_diagnostic()?;
        }
        OutputFormat::Auto => {
            if args.kpi.is_some() {
                for d in &defs {
                    print_full(d);
                }
            } else {
                let width = defs.iter().map(|d| d.metric.key().len()).max().unwrap_or(0);
                for d in &defs {
                    println!(
                        "{:<width$}  {}  {}",
                        style(d.metric.key()).cyan(),
                        style(d.title).bold(),
                        style(truncate_str(d.meaning, 60)).dim(),
                        width = width
                    );
                }
                if !global.quiet {
                    println!();
                    println!("Details: {}", style("rkt explain <KPI>").yellow());
                }
            }
        }
    }

    Ok(())
}

fn print_full(d: &Definition) {
    println!("{}", style(d.title).bold().underlined());
    println!();
    println!("  {}", style(d.formula).cyan());
    println!();
    println!("{}", d.meaning);
    println!();
    println!("{}", d.interpretation);
}
