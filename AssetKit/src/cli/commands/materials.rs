//! CLI command for material binding

use std::path::Path;
use std::time::Instant;

use console::style;

use crate::cli::progress::{LINK, LOOKING_GLASS, print_done, print_step, print_warnings};
use crate::materials::{BindOptions, BindOutput, TextureMapping, fix_material_bindings};

/// Bind materials to textures and write the fixed scene.
pub fn execute(
    input: &Path,
    output: Option<&Path>,
    mapping: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    let mapping = match mapping {
        Some(path) => TextureMapping::load(path)?,
        None => TextureMapping::bundled(),
    };

    let mut options = BindOptions::new(input).with_mapping(mapping);
    if let Some(out) = output {
        options = options.with_output(out);
    }

    if !quiet {
        println!("Fixing GLTF material bindings...");
        println!("  Input: {}", input.display());
        println!();
        print_step(1, 2, LOOKING_GLASS, "Reading scene...");
    }

    let bound = fix_material_bindings(&options)?;

    if !quiet {
        print_step(2, 2, LINK, "Connecting materials to textures...");
        print_summary(&bound);
        print_done(started.elapsed());
    }
    print_warnings(&bound.result.warnings);

    Ok(())
}

pub(super) fn print_summary(bound: &BindOutput) {
    let result = &bound.result;
    println!();
    println!("Current state:");
    println!("  Materials: {}", result.material_count);
    println!("  Textures:  {}", result.texture_count);
    println!("  Images:    {}", result.image_count);
    println!();
    for binding in &result.bindings {
        match binding.texture {
            Some(texture) => println!(
                "  {} {} -> texture {}",
                style("ok").green(),
                binding.name,
                texture
            ),
            None => println!("  {} {} -> no matching texture", style("--").yellow(), binding.name),
        }
    }
    println!();
    println!(
        "Bound {}/{} materials, saved to: {}",
        result.bound_count(),
        result.bindings.len(),
        bound.output.display()
    );
}
