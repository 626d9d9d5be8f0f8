//! Pipeline manifest (`pipeline.toml`).
//!
//! Every path the tools touch is configurable. Defaults reproduce the
//! mobile app's project layout, so an empty manifest (or no flags on the
//! command line) behaves like the historical hard-wired scripts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::converter::PackOptions;
use crate::error::{Error, Result};
use crate::icon::{DEFAULT_ICON_DESTINATION, DEFAULT_ICON_SOURCE};
use crate::materials::{BindOptions, TextureBinding, TextureMapping};

/// Directory holding the avatar scene and its textures.
pub const AVATAR_ASSETS_DIR: &str = "assets/avatars/3d";
/// Scene exported from the DCC tool, before material binding.
pub const DEFAULT_SCENE: &str = "assets/avatars/3d/scene.gltf";
/// Scene after material binding; input to the packer.
pub const DEFAULT_BOUND_SCENE: &str = "assets/avatars/3d/scene_fixed.gltf";
/// Packed model loaded by the app.
pub const DEFAULT_GLB: &str = "assets/avatars/3d/test_model.glb";

fn default_true() -> bool {
    true
}

fn default_scene() -> PathBuf {
    PathBuf::from(DEFAULT_SCENE)
}

fn default_glb() -> PathBuf {
    PathBuf::from(DEFAULT_GLB)
}

fn default_icon_source() -> PathBuf {
    PathBuf::from(DEFAULT_ICON_SOURCE)
}

fn default_icon_destination() -> PathBuf {
    PathBuf::from(DEFAULT_ICON_DESTINATION)
}

/// The full pipeline manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub icon: IconSettings,
    #[serde(default)]
    pub bind: BindSettings,
    #[serde(default)]
    pub pack: PackSettings,
}

/// `[icon]`: copy the app icon into the iOS asset catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_icon_source")]
    pub source: PathBuf,
    #[serde(default = "default_icon_destination")]
    pub destination: PathBuf,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            source: default_icon_source(),
            destination: default_icon_destination(),
        }
    }
}

/// `[bind]`: material to texture binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_scene")]
    pub input: PathBuf,
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Ordered rules; empty means the bundled avatar mapping.
    #[serde(default)]
    pub mapping: Vec<TextureBinding>,
}

impl Default for BindSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            input: default_scene(),
            output: None,
            mapping: Vec::new(),
        }
    }
}

/// `[pack]`: GLB packing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Scene to pack; defaults to the bind step's output.
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default = "default_glb")]
    pub output: PathBuf,
    #[serde(default)]
    pub resource_dir: Option<PathBuf>,
}

impl Default for PackSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            input: None,
            output: default_glb(),
            resource_dir: None,
        }
    }
}

impl PipelineConfig {
    /// Parse a manifest. Relative paths are left as written.
    ///
    /// # Errors
    /// Returns a TOML error for malformed input or
    /// [`Error::InvalidConfig`] if validation fails.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a manifest and resolve its relative paths against the manifest's
    /// own directory.
    ///
    /// # Errors
    /// Returns [`Error::ManifestNotFound`] if the file does not exist, an IO
    /// error if it cannot be read, or any parse/validation error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Make every relative path absolute with respect to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        resolve(&mut self.icon.source);
        resolve(&mut self.icon.destination);
        resolve(&mut self.bind.input);
        if let Some(output) = self.bind.output.as_mut() {
            resolve(output);
        }
        if let Some(input) = self.pack.input.as_mut() {
            resolve(input);
        }
        resolve(&mut self.pack.output);
        if let Some(dir) = self.pack.resource_dir.as_mut() {
            resolve(dir);
        }
    }

    /// Check the manifest is runnable.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] if no step is enabled or a mapping
    /// rule is unusable.
    pub fn validate(&self) -> Result<()> {
        if !self.icon.enabled && !self.bind.enabled && !self.pack.enabled {
            return Err(Error::InvalidConfig {
                message: "no pipeline steps enabled".to_string(),
            });
        }
        self.texture_mapping().validate()
    }

    /// The configured mapping, or the bundled one when none is given.
    #[must_use]
    pub fn texture_mapping(&self) -> TextureMapping {
        if self.bind.mapping.is_empty() {
            TextureMapping::bundled()
        } else {
            TextureMapping {
                mapping: self.bind.mapping.clone(),
            }
        }
    }

    #[must_use]
    pub fn bind_options(&self) -> BindOptions {
        let options = BindOptions::new(&self.bind.input).with_mapping(self.texture_mapping());
        match &self.bind.output {
            Some(output) => options.with_output(output),
            None => options,
        }
    }

    /// Scene the pack step reads: `pack.input`, or whatever the bind
    /// settings write to.
    #[must_use]
    pub fn pack_input(&self) -> PathBuf {
        match &self.pack.input {
            Some(input) => input.clone(),
            None => self.bind_options().resolved_output(),
        }
    }

    #[must_use]
    pub fn pack_options(&self) -> PackOptions {
        let options = PackOptions::new(self.pack_input(), &self.pack.output);
        match &self.pack.resource_dir {
            Some(dir) => options.with_resource_dir(dir),
            None => options,
        }
    }
}
