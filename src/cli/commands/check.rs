//! `rkt check` command - plausibility checks on the inputs

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::session::InputArgs;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::kpi::validate;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Exit with an error when any warning is found
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct CheckEntry {
    code: &'static str,
    message: String,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let inputs = args.input.load()?;
    let entries: Vec<CheckEntry> = validate(&inputs)
        .iter()
        .map(|w| CheckEntry {
            code: w.code(),
            message: w.to_string(),
        })
        .collect();

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entries).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&entries).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["code", "message"]).into_diagnostic()?;
            for e in &entries {
                wtr.write_record([e.code, e.message.as_str()])
                    .into_diagnostic()?;
            }
            wtr.flush().into_diagnostic()?;
        }
        OutputFormat::Tsv => {
            for e in &entries {
                println!("{}\t{}", e.code, e.message);
            }
        }
        OutputFormat::Md => {
            for e in &entries {
                println!("- **{}**: {}", e.code, e.message);
            }
        }
        OutputFormat::Auto => {
            if entries.is_empty() {
                if !global.quiet {
                    println!("{} No problems found", style("✓").green());
                }
            } else {
                for e in &entries {
                    println!("{} {}", style("⚠").yellow(), e.message);
                }
            }
        }
    }

    if args.strict && !entries.is_empty() {
        return Err(miette::miette!("{} input warning(s) found", entries.len()));
    }

    Ok(())
}
