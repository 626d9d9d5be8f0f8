//! GLB reading

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use serde_json::Value;

use super::{CHUNK_BIN, CHUNK_HEADER_SIZE, CHUNK_JSON, GLB_MAGIC, GLB_VERSION, HEADER_SIZE};
use crate::error::{Error, Result};

/// A chunk entry from the container's chunk table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlbChunk {
    pub chunk_type: u32,
    /// Data length, excluding the 8-byte chunk header.
    pub length: u32,
    /// Offset of the chunk data from the start of the file.
    pub offset: usize,
}

impl GlbChunk {
    #[must_use]
    pub fn type_name(&self) -> String {
        match self.chunk_type {
            CHUNK_JSON => "JSON".to_string(),
            CHUNK_BIN => "BIN".to_string(),
            other => format!("0x{other:08X}"),
        }
    }
}

/// A parsed GLB file.
#[derive(Debug, Clone)]
pub struct GlbContainer {
    pub version: u32,
    pub total_length: u32,
    /// Never empty; the first entry is the JSON chunk.
    chunks: Vec<GlbChunk>,
    /// Parsed contents of the first (JSON) chunk.
    pub json: Value,
}

impl GlbContainer {
    /// Chunk table in file order.
    #[must_use]
    pub fn chunks(&self) -> &[GlbChunk] {
        &self.chunks
    }

    /// The JSON chunk entry. [`read_glb`] only builds containers that have one.
    #[must_use]
    pub fn json_chunk(&self) -> &GlbChunk {
        &self.chunks[0]
    }
}

/// Parse GLB bytes.
///
/// # Errors
/// Returns an error if the magic, version or declared length are wrong, the
/// first chunk is not JSON, the data is truncated, or the JSON is malformed.
pub fn read_glb(data: &[u8]) -> Result<GlbContainer> {
    if data.len() < HEADER_SIZE {
        return Err(Error::UnexpectedEof);
    }

    let mut cursor = Cursor::new(data);

    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic)?;
    if u32::from_le_bytes(magic) != GLB_MAGIC {
        return Err(Error::InvalidGlbMagic(magic));
    }

    let version = cursor.read_u32::<LittleEndian>()?;
    if version != GLB_VERSION {
        return Err(Error::UnsupportedGlbVersion { version });
    }

    let total_length = cursor.read_u32::<LittleEndian>()?;
    if total_length as usize != data.len() {
        return Err(Error::GlbLengthMismatch {
            declared: total_length,
            actual: data.len(),
        });
    }

    let mut chunks = Vec::new();
    let mut offset = HEADER_SIZE;
    while offset + CHUNK_HEADER_SIZE <= data.len() {
        cursor.set_position(offset as u64);
        let length = cursor.read_u32::<LittleEndian>()?;
        let chunk_type = cursor.read_u32::<LittleEndian>()?;

        let start = offset + CHUNK_HEADER_SIZE;
        let end = start
            .checked_add(length as usize)
            .filter(|&end| end <= data.len())
            .ok_or(Error::UnexpectedEof)?;

        chunks.push(GlbChunk {
            chunk_type,
            length,
            offset: start,
        });
        offset = end;
    }

    // Trailing bytes too short for another chunk header
    if offset != data.len() {
        return Err(Error::UnexpectedEof);
    }

    let first = chunks.first().ok_or(Error::UnexpectedEof)?;
    if first.chunk_type != CHUNK_JSON {
        return Err(Error::GlbMissingJsonChunk {
            chunk_type: first.chunk_type,
        });
    }

    let json_bytes = &data[first.offset..first.offset + first.length as usize];
    let json = serde_json::from_slice(json_bytes)?;

    Ok(GlbContainer {
        version,
        total_length,
        chunks,
        json,
    })
}

/// Read and parse a GLB file from disk.
///
/// # Errors
/// Returns an IO error if the file cannot be read, or any [`read_glb`] error.
pub fn read_glb_file<P: AsRef<Path>>(path: P) -> Result<GlbContainer> {
    let data = fs::read(path)?;
    read_glb(&data)
}
