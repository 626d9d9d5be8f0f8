//! Format conversion utilities

pub mod gltf_to_glb;

pub use gltf_to_glb::{PackOptions, PackResult, convert_gltf_to_glb, pack};
