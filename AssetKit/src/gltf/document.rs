//! GLTF scene document loading and saving.
//!
//! The document is kept as a generic JSON tree rather than typed GLTF
//! structs: only a handful of sections are touched, and everything else must
//! come back out exactly as it went in (key order included, via
//! `serde_json`'s `preserve_order`).

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Top-level key for the image list.
pub const IMAGES: &str = "images";
/// Top-level key for the buffer list.
pub const BUFFERS: &str = "buffers";
/// Top-level key for the material list.
pub const MATERIALS: &str = "materials";
/// Top-level key for the texture list.
pub const TEXTURES: &str = "textures";

/// An in-memory GLTF JSON document.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDocument {
    root: Map<String, Value>,
}

impl SceneDocument {
    /// Load a `.gltf` file from disk.
    ///
    /// # Errors
    /// Returns [`Error::DocumentNotFound`] if the path does not exist, an IO
    /// error if it cannot be read, or a JSON error if it is not well-formed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!("Reading GLTF document: {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse a document from JSON text.
    ///
    /// # Errors
    /// Returns a JSON error for malformed input, or
    /// [`Error::InvalidDocument`] if the top-level value is not an object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Wrap an already-parsed JSON value.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDocument`] if the value is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(Error::InvalidDocument {
                message: format!("top-level value must be an object, found {}", json_kind(&other)),
            }),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.root
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Whether the document has a top-level `key` at all.
    #[must_use]
    pub fn has_section(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    /// Borrow a top-level array section.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDocument`] if the key exists but is not an array.
    pub fn section(&self, key: &str) -> Result<Option<&Vec<Value>>> {
        match self.root.get(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(not_an_array(key, other)),
        }
    }

    /// Mutably borrow a top-level array section.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDocument`] if the key exists but is not an array.
    pub fn section_mut(&mut self, key: &str) -> Result<Option<&mut Vec<Value>>> {
        match self.root.get_mut(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(not_an_array(key, other)),
        }
    }

    /// Number of entries in a section; absent or non-array sections count as 0.
    #[must_use]
    pub fn section_len(&self, key: &str) -> usize {
        self.root
            .get(key)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Serialize without any whitespace.
    ///
    /// # Errors
    /// Returns an error if JSON serialization fails.
    pub fn to_compact_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.root)?)
    }

    /// Serialize with two-space indentation.
    ///
    /// # Errors
    /// Returns an error if JSON serialization fails.
    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Write the document as indented `.gltf` text, replacing any existing file.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save_pretty<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_pretty_string()?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

fn not_an_array(key: &str, value: &Value) -> Error {
    Error::InvalidDocument {
        message: format!("'{key}' must be an array, found {}", json_kind(value)),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
