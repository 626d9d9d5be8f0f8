//! CLI command for GLB packing

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{DISK, GEAR, PACKAGE, format_size, print_done, print_step, print_warnings, simple_spinner};
use crate::converter::{PackOptions, PackResult, pack};

/// Pack a GLTF scene into a GLB with embedded resources.
pub fn execute(
    input: &Path,
    output: &Path,
    resource_dir: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    let mut options = PackOptions::new(input, output);
    if let Some(dir) = resource_dir {
        options = options.with_resource_dir(dir);
    }

    if !quiet {
        println!("Converting GLTF to GLB with embedded textures...");
        println!("  Input:  {}", input.display());
        println!("  Output: {}", output.display());
        println!();
        print_step(1, 2, PACKAGE, "Embedding textures and buffers...");
    }

    let spinner = (!quiet).then(|| simple_spinner("Packing..."));
    let result = pack(&options);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let result = result?;

    if !quiet {
        print_step(2, 2, DISK, "GLB container written");
        print_summary(&result);
        print_done(started.elapsed());
    }
    print_warnings(&result.warnings);

    Ok(())
}

pub(super) fn print_summary(result: &PackResult) {
    println!();
    println!("{}GLB created: {}", GEAR, result.output.display());
    println!(
        "  Textures:  {}/{} embedded",
        result.images_embedded, result.images_total
    );
    println!(
        "  Buffers:   {}/{} embedded",
        result.buffers_embedded, result.buffers_total
    );
    println!("  Payload:   {}", format_size(result.embedded_bytes as u64));
    println!("  File size: {}", format_size(result.output_size));
}
