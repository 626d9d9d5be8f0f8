//! `assetkit` command-line entry point.

fn main() -> anyhow::Result<()> {
    assetkit::cli::run_cli()
}
