//! CLI command for running a pipeline manifest

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{
    LINK, LOOKING_GLASS, PACKAGE, PICTURE, format_size, print_done, print_step, print_warnings,
    simple_spinner,
};
use crate::config::PipelineConfig;
use crate::pipeline::run_pipeline;

/// Run every enabled step of the manifest at `config_path`.
pub fn execute(config_path: &Path, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        println!("Running pipeline: {}", config_path.display());
        println!();
        print_step(1, 2, LOOKING_GLASS, "Loading manifest...");
    }
    let config = PipelineConfig::load(config_path)?;

    if !quiet {
        print_step(2, 2, PACKAGE, "Running steps...");
    }
    let spinner = (!quiet).then(|| simple_spinner("Working..."));
    let report = run_pipeline(&config);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = report?;

    if !quiet {
        if let Some((written, bytes)) = &report.icon {
            println!();
            println!("{}Icon copied: {} ({})", PICTURE, written.display(), format_size(*bytes));
        }
        if let Some(bound) = &report.bind {
            println!();
            println!(
                "{}Materials bound: {}/{} -> {}",
                LINK,
                bound.result.bound_count(),
                bound.result.bindings.len(),
                bound.output.display()
            );
        }
        if let Some(packed) = &report.pack {
            super::pack::print_summary(packed);
        }
        print_done(started.elapsed());
    }
    print_warnings(report.warnings());

    Ok(())
}
