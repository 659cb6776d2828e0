//! `rkt init` command - write a starter input file

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::units::TimeUnit;
use crate::core::Config;
use crate::render::{InputsContext, TemplateGenerator};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// File to create
    #[arg(default_value = "inputs.yaml")]
    pub path: PathBuf,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,

    /// Fill in a worked example instead of empty fields
    #[arg(long)]
    pub example: bool,

    /// Name of the asset or fleet
    #[arg(long)]
    pub name: Option<String>,

    /// Unit for the duration fields (default from config)
    #[arg(long, short = 'u')]
    pub unit: Option<TimeUnit>,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(miette::miette!(
            help = "use --force to overwrite it",
            "{} already exists",
            args.path.display()
        ));
    }

    let unit = args.unit.unwrap_or_else(|| Config::load().display_unit());
    let mut ctx = InputsContext::new(unit).with_example(args.example);
    if let Some(name) = args.name {
        ctx = ctx.with_name(name);
    }

    let generator = TemplateGenerator::new().map_err(|e| miette::miette!("{}", e))?;
    let content = generator
        .generate_inputs(&ctx)
        .map_err(|e| miette::miette!("{}", e))?;

    if let Some(parent) = args.path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).into_diagnostic()?;
        }
    }
    std::fs::write(&args.path, content).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Created {}",
            style("✓").green(),
            style(args.path.display()).cyan()
        );
        println!();
        println!("Next steps:");
        println!(
            "  {} Fill in the measured values",
            style(format!("$EDITOR {}", args.path.display())).yellow()
        );
        println!(
            "  {} Compute the KPIs",
            style(format!("rkt calc {}", args.path.display())).yellow()
        );
        println!(
            "  {} Check the inputs for mistakes",
            style(format!("rkt check {}", args.path.display())).yellow()
        );
    }

    Ok(())
}
