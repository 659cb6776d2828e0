use clap::Parser;
use miette::Result;
use rkt::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    // RUST_LOG wins over --verbose
    let default_level = if global.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init(args) => rkt::cli::commands::init::run(args, &global),
        Commands::Calc(args) => rkt::cli::commands::calc::run(args, &global),
        Commands::Check(args) => rkt::cli::commands::check::run(args, &global),
        Commands::Chart(args) => rkt::cli::commands::chart::run(args, &global),
        Commands::Diagram(args) => rkt::cli::commands::diagram::run(args, &global),
        Commands::Report(args) => rkt::cli::commands::report::run(args, &global),
        Commands::Explain(args) => rkt::cli::commands::explain::run(args, &global),
        Commands::Completions(args) => rkt::cli::commands::completions::run(args),
    }
}
