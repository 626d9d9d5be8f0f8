//! # AssetKit
//!
//! Build-pipeline tools for the mobile app's 3D avatar assets.
//!
//! ## Tools
//!
//! - **GLB packing** - inline external textures and buffers of a `.gltf`
//!   scene as base64 `data:` URIs and write a single-chunk `.glb`
//! - **Material binding** - connect materials to base color textures using an
//!   ordered name-pattern mapping
//! - **Icon copy** - install the app icon into the iOS asset catalog
//!
//! ## Quick Start
//!
//! ### Packing a scene
//!
//! ```no_run
//! use assetkit::converter::{PackOptions, pack};
//!
//! let result = pack(&PackOptions::new("scene_fixed.gltf", "test_model.glb"))?;
//! println!("Embedded {} textures", result.images_embedded);
//! for warning in &result.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! # Ok::<(), assetkit::Error>(())
//! ```
//!
//! ### Binding materials
//!
//! ```no_run
//! use assetkit::materials::{BindOptions, TextureMapping, fix_material_bindings};
//!
//! let mapping = TextureMapping::new().with("Body", 5).with("Head", 7);
//! let output = fix_material_bindings(&BindOptions::new("scene.gltf").with_mapping(mapping))?;
//! println!("Bound {} materials", output.result.bound_count());
//! # Ok::<(), assetkit::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `assetkit` command-line binary

pub mod config;
pub mod converter;
pub mod error;
pub mod glb;
pub mod gltf;
pub mod icon;
pub mod materials;
pub mod pipeline;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::config::PipelineConfig;
    pub use crate::converter::{PackOptions, PackResult, convert_gltf_to_glb, pack};
    pub use crate::glb::{GlbContainer, encode_glb, read_glb, read_glb_file, write_glb};
    pub use crate::gltf::{SceneDocument, decode_data_uri, embed_resources};
    pub use crate::icon::copy_icon;
    pub use crate::materials::{
        BindOptions, BindResult, TextureBinding, TextureMapping, bind_materials,
        fix_material_bindings,
    };
    pub use crate::pipeline::{PipelineReport, run_pipeline};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
