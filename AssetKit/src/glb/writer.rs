//! GLB writing

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use super::{CHUNK_HEADER_SIZE, CHUNK_JSON, GLB_MAGIC, GLB_VERSION, HEADER_SIZE};
use crate::error::{Error, Result};
use crate::gltf::SceneDocument;

/// Number of spaces needed to bring `len` up to a multiple of 4.
#[must_use]
pub fn json_padding(len: usize) -> usize {
    (4 - (len % 4)) % 4
}

/// Byte layout of a single-JSON-chunk container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlbLayout {
    /// Unpadded UTF-8 JSON length.
    pub json_length: usize,
    /// Trailing spaces appended to the JSON.
    pub padding: usize,
    /// Chunk length field: JSON plus padding.
    pub chunk_length: u32,
    /// Header length field: whole file size.
    pub total_length: u32,
}

impl GlbLayout {
    /// Compute the layout for `json_length` bytes of JSON.
    ///
    /// # Errors
    /// Returns [`Error::GlbTooLarge`] if the file would not fit the 32-bit
    /// length field.
    pub fn for_json(json_length: usize) -> Result<Self> {
        let padding = json_padding(json_length);
        let chunk = json_length + padding;
        let total = HEADER_SIZE + CHUNK_HEADER_SIZE + chunk;

        let total_length = u32::try_from(total).map_err(|_| Error::GlbTooLarge { size: total })?;

        Ok(Self {
            json_length,
            padding,
            chunk_length: chunk as u32,
            total_length,
        })
    }
}

fn write_container<W: Write>(writer: &mut W, json: &[u8], layout: &GlbLayout) -> Result<()> {
    // Header
    writer.write_u32::<LittleEndian>(GLB_MAGIC)?;
    writer.write_u32::<LittleEndian>(GLB_VERSION)?;
    writer.write_u32::<LittleEndian>(layout.total_length)?;

    // JSON chunk
    writer.write_u32::<LittleEndian>(layout.chunk_length)?;
    writer.write_u32::<LittleEndian>(CHUNK_JSON)?;
    writer.write_all(json)?;
    for _ in 0..layout.padding {
        writer.write_u8(b' ')?;
    }

    Ok(())
}

/// Serialize a document into GLB bytes.
///
/// # Errors
/// Returns an error if JSON serialization fails or the output is too large.
pub fn encode_glb(document: &SceneDocument) -> Result<Vec<u8>> {
    let json = document.to_compact_bytes()?;
    let layout = GlbLayout::for_json(json.len())?;

    let mut output = Vec::with_capacity(layout.total_length as usize);
    write_container(&mut output, &json, &layout)?;
    Ok(output)
}

/// Write a document to disk as a GLB file, replacing any existing file.
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_glb<P: AsRef<Path>>(path: P, document: &SceneDocument) -> Result<GlbLayout> {
    let json = document.to_compact_bytes()?;
    let layout = GlbLayout::for_json(json.len())?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_container(&mut writer, &json, &layout)?;
    writer.flush()?;

    Ok(layout)
}
