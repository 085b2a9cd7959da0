//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Flags override the file, the file overrides the defaults
    let options = cli.lookup_options(config.lookup);
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    tracing::debug!(?options, %output_format, "resolved lookup options");

    let ctx = commands::Context {
        options,
        output_format,
        detailed: cli.detailed,
    };

    match cli.command {
        Commands::Check(args) => commands::check::execute(ctx, args).await,
        Commands::Batch(args) => commands::batch::execute(ctx, args).await,
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
