//! Connect GLTF materials to their base color textures.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};

use super::mapping::TextureMapping;
use crate::error::{Error, Result};
use crate::gltf::SceneDocument;
use crate::gltf::document::{IMAGES, MATERIALS, TEXTURES, json_kind};

/// File name the bound document is written to when no output is given.
pub const DEFAULT_BOUND_FILE_NAME: &str = "scene_fixed.gltf";

/// Base color factor given to materials that have none (opaque white).
pub const DEFAULT_BASE_COLOR_FACTOR: [f64; 4] = [1.0, 1.0, 1.0, 1.0];

/// Outcome for one material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialBinding {
    /// Position in `materials`.
    pub index: usize,
    /// Material name, or `Material_<index>` if it has none.
    pub name: String,
    /// Texture index now referenced by `baseColorTexture`, if any.
    pub texture: Option<usize>,
    /// Whether a default `baseColorFactor` was inserted.
    pub added_base_color_factor: bool,
}

/// Summary of a binding pass.
#[derive(Debug, Clone, Default)]
pub struct BindResult {
    pub material_count: usize,
    pub texture_count: usize,
    pub image_count: usize,
    pub bindings: Vec<MaterialBinding>,
    /// Materials that could not be bound, and why.
    pub warnings: Vec<String>,
}

impl BindResult {
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.texture.is_some()).count()
    }

    pub fn unbound(&self) -> impl Iterator<Item = &MaterialBinding> {
        self.bindings.iter().filter(|b| b.texture.is_none())
    }
}

/// Ensure every material has a PBR block with a base color factor, and bind
/// `baseColorTexture` for names matched by `mapping`.
///
/// A match whose texture index is out of range for `textures` is left
/// unbound and reported as a warning.
///
/// # Errors
/// Returns [`Error::MissingSection`] if the document has no `materials` or no
/// `textures`, and [`Error::InvalidDocument`] if a material's
/// `pbrMetallicRoughness` is not an object.
pub fn bind_materials(document: &mut SceneDocument, mapping: &TextureMapping) -> Result<BindResult> {
    let texture_count = document.section_len(TEXTURES);
    let image_count = document.section_len(IMAGES);

    if document.section(TEXTURES)?.is_none() {
        return Err(Error::MissingSection { section: TEXTURES });
    }
    let materials = document
        .section_mut(MATERIALS)?
        .ok_or(Error::MissingSection { section: MATERIALS })?;

    let mut result = BindResult {
        material_count: materials.len(),
        texture_count,
        image_count,
        ..BindResult::default()
    };

    tracing::debug!(
        "Binding {} materials against {} textures",
        result.material_count,
        texture_count
    );

    for (index, material) in materials.iter_mut().enumerate() {
        let Some(material) = material.as_object_mut() else {
            let warning = format!("materials[{index}] is {}, skipped", json_kind(material));
            tracing::warn!("{}", warning);
            result.warnings.push(warning);
            continue;
        };

        let name = material
            .get("name")
            .and_then(Value::as_str)
            .map_or_else(|| format!("Material_{index}"), str::to_string);

        let pbr = pbr_block(material, index)?;

        let added_base_color_factor = !pbr.contains_key("baseColorFactor");
        if added_base_color_factor {
            pbr.insert("baseColorFactor".to_string(), json!(DEFAULT_BASE_COLOR_FACTOR));
        }

        let texture = mapping
            .lookup(&name)
            .map(|b| b.texture)
            .filter(|&t| t < texture_count);

        if let Some(texture) = texture {
            pbr.insert("baseColorTexture".to_string(), json!({ "index": texture }));
            tracing::debug!("{} -> texture {}", name, texture);
        } else {
            let warning = format!("{name} -> no matching texture found");
            tracing::warn!("{}", warning);
            result.warnings.push(warning);
        }

        result.bindings.push(MaterialBinding {
            index,
            name,
            texture,
            added_base_color_factor,
        });
    }

    Ok(result)
}

fn pbr_block(material: &mut Map<String, Value>, index: usize) -> Result<&mut Map<String, Value>> {
    let pbr = material
        .entry("pbrMetallicRoughness")
        .or_insert_with(|| Value::Object(Map::new()));

    let kind = json_kind(pbr);
    pbr.as_object_mut().ok_or_else(|| Error::InvalidDocument {
        message: format!("materials[{index}].pbrMetallicRoughness is {kind}, expected an object"),
    })
}

/// Inputs for a file-to-file binding run.
#[derive(Debug, Clone)]
pub struct BindOptions {
    pub input: PathBuf,
    /// Defaults to `scene_fixed.gltf` beside the input.
    pub output: Option<PathBuf>,
    pub mapping: TextureMapping,
}

impl BindOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            mapping: TextureMapping::bundled(),
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    #[must_use]
    pub fn with_mapping(mut self, mapping: TextureMapping) -> Self {
        self.mapping = mapping;
        self
    }

    #[must_use]
    pub fn resolved_output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_bound_path(&self.input))
    }
}

/// `scene_fixed.gltf` in the same directory as `input`.
#[must_use]
pub fn default_bound_path(input: &Path) -> PathBuf {
    input.with_file_name(DEFAULT_BOUND_FILE_NAME)
}

/// Result of a file-to-file binding run.
#[derive(Debug, Clone)]
pub struct BindOutput {
    pub output: PathBuf,
    pub result: BindResult,
}

/// Load a document, bind its materials and write it out as indented JSON.
///
/// # Errors
/// Returns any load, [`bind_materials`] or write error. Nothing is written
/// when binding fails.
pub fn fix_material_bindings(options: &BindOptions) -> Result<BindOutput> {
    tracing::info!("Binding materials in {}", options.input.display());

    let mut document = SceneDocument::load(&options.input)?;
    let result = bind_materials(&mut document, &options.mapping)?;

    let output = options.resolved_output();
    document.save_pretty(&output)?;
    tracing::info!("Wrote {}", output.display());

    Ok(BindOutput { output, result })
}
