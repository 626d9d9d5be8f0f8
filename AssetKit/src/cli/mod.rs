//! AssetKit CLI - Command-line interface for the avatar asset pipeline

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "assetkit")]
#[command(version, about = "AssetKit: avatar asset pipeline tools (GLTF binding, GLB packing, app icon)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the AssetKit CLI
///
/// # Errors
/// Returns an error if the selected command fails.
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging; commands print their own warnings, so default to errors only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
