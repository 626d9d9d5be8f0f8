use clap::Subcommand;
use std::path::PathBuf;

use crate::config::{DEFAULT_BOUND_SCENE, DEFAULT_GLB, DEFAULT_SCENE};
use crate::icon::{DEFAULT_ICON_DESTINATION, DEFAULT_ICON_SOURCE};

mod execute;

pub mod icon;
pub mod inspect;
pub mod materials;
pub mod pack;
pub mod run;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a GLTF scene to a GLB with all textures and buffers embedded
    Pack {
        /// Source .gltf file
        #[arg(short, long, default_value = DEFAULT_BOUND_SCENE)]
        input: PathBuf,

        /// Output .glb file (overwritten if it exists)
        #[arg(short, long, default_value = DEFAULT_GLB)]
        output: PathBuf,

        /// Directory that texture/buffer URIs are relative to (defaults to the input's directory)
        #[arg(long)]
        resource_dir: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Connect GLTF materials to their base color textures
    #[command(name = "bind-materials")]
    BindMaterials {
        /// Source .gltf file
        #[arg(short, long, default_value = DEFAULT_SCENE)]
        input: PathBuf,

        /// Output .gltf file (defaults to scene_fixed.gltf beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML file with [[mapping]] pattern/texture rules (defaults to the bundled avatar mapping)
        #[arg(short, long)]
        mapping: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Copy the app icon into the iOS asset catalog
    #[command(name = "copy-icon")]
    CopyIcon {
        /// Icon image to copy
        #[arg(short, long, default_value = DEFAULT_ICON_SOURCE)]
        source: PathBuf,

        /// Destination file or directory
        #[arg(short, long, default_value = DEFAULT_ICON_DESTINATION)]
        destination: PathBuf,
    },

    /// Show the header, chunks and resources of a GLB file
    Inspect {
        /// GLB file to inspect
        path: PathBuf,
    },

    /// Run the steps configured in a pipeline manifest
    Run {
        /// Pipeline manifest (TOML)
        #[arg(short, long, default_value = "pipeline.toml")]
        config: PathBuf,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
}
