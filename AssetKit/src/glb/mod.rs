//! Binary glTF (GLB) container.
//!
//! Layout written by this crate (little-endian):
//!
//! | Offset | Size | Field         |
//! |--------|------|---------------|
//! | 0      | 4    | magic `glTF`  |
//! | 4      | 4    | version (2)   |
//! | 8      | 4    | total length  |
//! | 12     | 4    | JSON length   |
//! | 16     | 4    | `JSON` type   |
//! | 20     | n    | JSON + spaces |
//!
//! Only a JSON chunk is ever written. Binary payloads travel as base64
//! `data:` URIs inside the JSON, so there is no BIN chunk.

mod reader;
mod writer;

pub use reader::{GlbChunk, GlbContainer, read_glb, read_glb_file};
pub use writer::{GlbLayout, encode_glb, json_padding, write_glb};

/// `glTF` in little-endian.
pub const GLB_MAGIC: u32 = 0x46546C67;
/// The only container version produced or accepted.
pub const GLB_VERSION: u32 = 2;
/// `JSON` chunk type.
pub const CHUNK_JSON: u32 = 0x4E4F534A;
/// `BIN\0` chunk type (recognised when reading).
pub const CHUNK_BIN: u32 = 0x004E4942;
/// Magic + version + total length.
pub const HEADER_SIZE: usize = 12;
/// Chunk length + chunk type.
pub const CHUNK_HEADER_SIZE: usize = 8;
