//! Error types for `AssetKit`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `AssetKit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Scene Document Errors ====================
    /// The GLTF document to read does not exist.
    #[error("GLTF file not found: {path}")]
    DocumentNotFound {
        /// The missing document path.
        path: PathBuf,
    },

    /// The document parsed as JSON but is not a GLTF object.
    #[error("invalid GLTF document: {message}")]
    InvalidDocument {
        /// Description of what is invalid.
        message: String,
    },

    /// A section required by the operation is absent from the document.
    #[error("GLTF document has no '{section}' section")]
    MissingSection {
        /// The top-level key that was expected.
        section: &'static str,
    },

    // ==================== Data URI Errors ====================
    /// A `data:` URI could not be split into media type and payload.
    #[error("malformed data URI: {message}")]
    MalformedDataUri {
        /// Description of what is malformed.
        message: String,
    },

    /// Base64 payload could not be decoded.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    // ==================== GLB Container Errors ====================
    /// The file does not start with the `glTF` magic.
    #[error("invalid GLB magic: expected glTF, found {0:?}")]
    InvalidGlbMagic([u8; 4]),

    /// The container version is not 2.
    #[error("unsupported GLB version: {version} (supported: 2)")]
    UnsupportedGlbVersion {
        /// The version number found in the header.
        version: u32,
    },

    /// The header length field disagrees with the data.
    #[error("GLB length mismatch: header declares {declared} bytes, found {actual}")]
    GlbLengthMismatch {
        /// Length declared in the header.
        declared: u32,
        /// Number of bytes actually available.
        actual: usize,
    },

    /// The first chunk of the container is not a JSON chunk.
    #[error("GLB first chunk is not JSON (type 0x{chunk_type:08X})")]
    GlbMissingJsonChunk {
        /// The chunk type that was found instead.
        chunk_type: u32,
    },

    /// The serialized container would not fit in the 32-bit length field.
    #[error("GLB too large: {size} bytes exceeds the 4 GiB container limit")]
    GlbTooLarge {
        /// The computed container size.
        size: usize,
    },

    /// Unexpected end of data.
    #[error("unexpected end of file")]
    UnexpectedEof,

    // ==================== File Copy Errors ====================
    /// The file to copy does not exist.
    #[error("source file not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML manifest parsing error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    // ==================== Configuration Errors ====================
    /// The pipeline manifest does not exist.
    #[error("pipeline manifest not found: {path}")]
    ManifestNotFound {
        /// Manifest path that was looked up.
        path: PathBuf,
    },

    /// The pipeline manifest is missing or contains unusable values.
    #[error("invalid pipeline config: {message}")]
    InvalidConfig {
        /// The validation error message.
        message: String,
    },
}

/// A specialized Result type for `AssetKit` operations.
pub type Result<T> = std::result::Result<T, Error>;
