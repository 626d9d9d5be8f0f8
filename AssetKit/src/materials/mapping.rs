//! Ordered material-name to texture-index mapping.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Avatar mapping shipped with the pipeline, in match order.
const DEFAULT_BINDINGS: &[(&str, usize)] = &[
    ("Weapon_01", 0),
    ("Weapon_02", 13),
    ("Hair_01", 2),
    ("Hair_02", 4),
    ("Body", 5),
    ("Head", 7),
    ("Eyes_01", 9),
    ("Eyes_02", 10),
    ("Equip_01", 11),
    ("Equip_02", 15),
];

/// A single `pattern -> texture` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureBinding {
    /// Substring looked for in the material name.
    pub pattern: String,
    /// Index into the document's `textures`.
    pub texture: usize,
}

impl TextureBinding {
    pub fn new(pattern: impl Into<String>, texture: usize) -> Self {
        Self {
            pattern: pattern.into(),
            texture,
        }
    }
}

/// Rules checked in order; the first whose pattern occurs in the material
/// name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureMapping {
    #[serde(default)]
    pub mapping: Vec<TextureBinding>,
}

impl TextureMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in avatar mapping.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            mapping: DEFAULT_BINDINGS
                .iter()
                .map(|&(pattern, texture)| TextureBinding::new(pattern, texture))
                .collect(),
        }
    }

    #[must_use]
    pub fn with(mut self, pattern: impl Into<String>, texture: usize) -> Self {
        self.mapping.push(TextureBinding::new(pattern, texture));
        self
    }

    /// Parse a mapping file (`[[mapping]]` tables).
    ///
    /// # Errors
    /// Returns a TOML error for malformed input, or
    /// [`Error::InvalidConfig`] if a rule has an empty pattern.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mapping: Self = toml::from_str(text)?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// Load a mapping file from disk.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be read, or any
    /// [`TextureMapping::from_toml_str`] error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject rules that would match every material.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] naming the offending rule.
    pub fn validate(&self) -> Result<()> {
        if let Some(pos) = self.mapping.iter().position(|b| b.pattern.is_empty()) {
            return Err(Error::InvalidConfig {
                message: format!("mapping rule {pos} has an empty pattern"),
            });
        }
        Ok(())
    }

    /// First rule whose pattern occurs in `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&TextureBinding> {
        self.mapping.iter().find(|b| name.contains(b.pattern.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }
}
