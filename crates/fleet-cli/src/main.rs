use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fleet_cli::commands::{intervals, metrics, pairs, resolve_date};
use fleet_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so report output on stdout stays machine-readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match &cli.command {
        Some(Commands::Metrics(args)) => metrics::run(args, &config)?,
        Some(Commands::Intervals(args)) => intervals::run(args, &config)?,
        Some(Commands::Pairs(args)) => pairs::run(args, &config)?,
        Some(Commands::ResolveDate { values }) => resolve_date::run(values),
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
