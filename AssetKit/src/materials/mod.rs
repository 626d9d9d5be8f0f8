//! Material to texture binding for GLTF scenes.
//!
//! Exported avatar scenes carry their textures but the materials do not
//! reference them. The binder patches `pbrMetallicRoughness` on every
//! material using an ordered name-pattern mapping.

pub mod binder;
pub mod mapping;

pub use binder::{
    BindOptions, BindOutput, BindResult, DEFAULT_BASE_COLOR_FACTOR, DEFAULT_BOUND_FILE_NAME,
    MaterialBinding, bind_materials, default_bound_path, fix_material_bindings,
};
pub use mapping::{TextureBinding, TextureMapping};
