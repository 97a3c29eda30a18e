mod cli;
mod commands;
mod context;
mod output;
mod prompt;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(args, cli.config, cli.verbose),
        Commands::Template => commands::template::run(),
        Commands::Doctor { json } => commands::doctor::run(json, cli.config, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
