//! Compass CLI - documentation site configuration.
//!
//! Provides commands for:
//! - `check`: Validate the config and resolve the sidebar
//! - `nav`: Print the resolved sidebar as JSON
//! - `export`: Print the normalized site config as TOML or JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ExportArgs, NavArgs};
use output::Output;

/// Compass - documentation site configuration.
#[derive(Parser)]
#[command(name = "compass", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and resolve every sidebar entry.
    Check(CheckArgs),
    /// Print the resolved sidebar as JSON.
    Nav(NavArgs),
    /// Print the normalized site configuration.
    Export(ExportArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(&output),
        Commands::Nav(args) => args.execute(&output),
        Commands::Export(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
