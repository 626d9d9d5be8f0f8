//! GLTF to self-contained GLB conversion.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::glb::{GlbLayout, write_glb};
use crate::gltf::{ResourceKind, SceneDocument, embed_resources};

/// Inputs for a pack run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOptions {
    /// The `.gltf` document to read.
    pub input: PathBuf,
    /// Where to write the `.glb`.
    pub output: PathBuf,
    /// Directory that relative resource URIs resolve against.
    /// Defaults to the input document's directory.
    pub resource_dir: Option<PathBuf>,
}

impl PackOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            resource_dir: None,
        }
    }

    #[must_use]
    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = Some(dir.into());
        self
    }

    /// The directory resource URIs are resolved against.
    #[must_use]
    pub fn resolved_resource_dir(&self) -> PathBuf {
        self.resource_dir.clone().unwrap_or_else(|| {
            self.input
                .parent()
                .map_or_else(PathBuf::new, Path::to_path_buf)
        })
    }
}

/// Result of a pack run.
#[derive(Debug, Clone)]
pub struct PackResult {
    pub output: PathBuf,
    /// Size of the written file in bytes.
    pub output_size: u64,
    pub layout: GlbLayout,
    pub images_total: usize,
    pub images_embedded: usize,
    pub buffers_total: usize,
    pub buffers_embedded: usize,
    /// Raw bytes inlined across all resources.
    pub embedded_bytes: usize,
    /// Recoverable problems such as missing texture files.
    pub warnings: Vec<String>,
}

/// Convert a `.gltf` with external textures/buffers into a single `.glb`,
/// resolving resources next to the input.
///
/// # Errors
/// See [`pack`].
pub fn convert_gltf_to_glb<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<PackResult> {
    pack(&PackOptions::new(input.as_ref(), output.as_ref()))
}

/// Load the document, inline every external resource that exists, and write
/// the GLB container.
///
/// # Errors
/// Returns [`crate::Error::DocumentNotFound`] if the input is missing, a JSON
/// error if it is malformed, and an IO error for any read/write failure other
/// than a missing resource file.
pub fn pack(options: &PackOptions) -> Result<PackResult> {
    tracing::info!(
        "Packing {} -> {}",
        options.input.display(),
        options.output.display()
    );

    let mut document = SceneDocument::load(&options.input)?;
    let resource_dir = options.resolved_resource_dir();

    let report = embed_resources(&mut document, &resource_dir)?;
    let layout = write_glb(&options.output, &document)?;
    let output_size = fs::metadata(&options.output)?.len();

    tracing::info!(
        "Wrote {} ({} bytes, JSON chunk {} bytes)",
        options.output.display(),
        output_size,
        layout.chunk_length
    );

    Ok(PackResult {
        output: options.output.clone(),
        output_size,
        layout,
        images_total: document.section_len(ResourceKind::Image.section()),
        images_embedded: report.embedded_count(ResourceKind::Image),
        buffers_total: document.section_len(ResourceKind::Buffer.section()),
        buffers_embedded: report.embedded_count(ResourceKind::Buffer),
        embedded_bytes: report.embedded_bytes(),
        warnings: report.warnings,
    })
}
