//! Inline external image and buffer files as base64 `data:` URIs.
//!
//! Only the `uri` field of each record is ever rewritten. Records are never
//! added, removed or reordered, so every index that points into `images` or
//! `buffers` stays valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::data_uri::{BUFFER_MIME, encode_data_uri, image_mime_for_path, is_data_uri};
use super::document::{BUFFERS, IMAGES, SceneDocument, json_kind};
use crate::error::Result;

/// Which top-level section a resource lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Buffer,
}

impl ResourceKind {
    #[must_use]
    pub fn section(self) -> &'static str {
        match self {
            ResourceKind::Image => IMAGES,
            ResourceKind::Buffer => BUFFERS,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Image => "texture",
            ResourceKind::Buffer => "buffer",
        }
    }

    fn mime_for(self, path: &Path) -> &'static str {
        match self {
            ResourceKind::Image => image_mime_for_path(path),
            ResourceKind::Buffer => BUFFER_MIME,
        }
    }
}

/// What happened to a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedOutcome {
    /// The file was read and its bytes inlined.
    Embedded { mime: &'static str, bytes: usize },
    /// The URI was already a `data:` URI.
    AlreadyInline,
    /// The record has no string `uri` (e.g. a `bufferView` image).
    NoUri,
    /// The referenced file does not exist; the URI was left as is.
    Missing { path: PathBuf },
}

/// Per-record result of an embedding pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedResource {
    pub kind: ResourceKind,
    /// Position of the record in its section.
    pub index: usize,
    /// The original external URI, if there was one.
    pub uri: Option<String>,
    pub outcome: EmbedOutcome,
}

/// Summary of an embedding pass over a document.
#[derive(Debug, Clone, Default)]
pub struct EmbedReport {
    pub resources: Vec<EmbeddedResource>,
    /// Recoverable problems, in the order they were hit.
    pub warnings: Vec<String>,
}

impl EmbedReport {
    /// Number of records of `kind` that were inlined by this pass.
    #[must_use]
    pub fn embedded_count(&self, kind: ResourceKind) -> usize {
        self.resources
            .iter()
            .filter(|r| r.kind == kind && matches!(r.outcome, EmbedOutcome::Embedded { .. }))
            .count()
    }

    /// Total raw (pre-base64) bytes inlined by this pass.
    #[must_use]
    pub fn embedded_bytes(&self) -> usize {
        self.resources
            .iter()
            .map(|r| match r.outcome {
                EmbedOutcome::Embedded { bytes, .. } => bytes,
                _ => 0,
            })
            .sum()
    }

    /// Records whose file could not be found.
    pub fn missing(&self) -> impl Iterator<Item = &EmbeddedResource> {
        self.resources
            .iter()
            .filter(|r| matches!(r.outcome, EmbedOutcome::Missing { .. }))
    }
}

/// Embed every external image, then every external buffer.
///
/// Relative URIs are resolved against `base_dir`. A missing file is logged,
/// recorded as a warning and skipped; any other IO failure aborts.
///
/// # Errors
/// Returns an error if `images` or `buffers` is present but not an array, or
/// if an existing resource file cannot be read.
pub fn embed_resources(document: &mut SceneDocument, base_dir: &Path) -> Result<EmbedReport> {
    let mut report = EmbedReport::default();

    for kind in [ResourceKind::Image, ResourceKind::Buffer] {
        embed_section(document, kind, base_dir, &mut report)?;
    }

    Ok(report)
}

fn embed_section(
    document: &mut SceneDocument,
    kind: ResourceKind,
    base_dir: &Path,
    report: &mut EmbedReport,
) -> Result<()> {
    let Some(entries) = document.section_mut(kind.section())? else {
        tracing::debug!("No '{}' section, skipping", kind.section());
        return Ok(());
    };

    tracing::info!("Embedding {} {} entries", entries.len(), kind.label());

    for (index, entry) in entries.iter_mut().enumerate() {
        let resource = embed_entry(entry, kind, index, base_dir, &mut report.warnings)?;
        report.resources.push(resource);
    }

    Ok(())
}

fn embed_entry(
    entry: &mut Value,
    kind: ResourceKind,
    index: usize,
    base_dir: &Path,
    warnings: &mut Vec<String>,
) -> Result<EmbeddedResource> {
    let resource = |uri: Option<String>, outcome| EmbeddedResource {
        kind,
        index,
        uri,
        outcome,
    };

    let Some(uri_value) = entry.get_mut("uri") else {
        return Ok(resource(None, EmbedOutcome::NoUri));
    };
    let Some(uri) = uri_value.as_str() else {
        let warning = format!(
            "{}[{index}].uri is {}, not a string; left unchanged",
            kind.section(),
            json_kind(uri_value)
        );
        tracing::warn!("{}", warning);
        warnings.push(warning);
        return Ok(resource(None, EmbedOutcome::NoUri));
    };

    if is_data_uri(uri) {
        tracing::debug!("{}[{}] already inline", kind.section(), index);
        return Ok(resource(None, EmbedOutcome::AlreadyInline));
    }

    let uri = uri.to_string();
    let path = base_dir.join(&uri);

    if !path.exists() {
        let warning = format!("{} not found: {}", capitalize(kind.label()), path.display());
        tracing::warn!("{}", warning);
        warnings.push(warning);
        return Ok(resource(Some(uri), EmbedOutcome::Missing { path }));
    }

    let data = fs::read(&path)?;
    let mime = kind.mime_for(&path);
    *uri_value = Value::String(encode_data_uri(mime, &data));

    tracing::debug!(
        "Embedded {}: {} ({:.1} KB, {})",
        kind.label(),
        path.display(),
        data.len() as f64 / 1024.0,
        mime
    );

    Ok(resource(
        Some(uri),
        EmbedOutcome::Embedded {
            mime,
            bytes: data.len(),
        },
    ))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_embeds_images_and_buffers() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("skin.jpg"), [1u8, 2, 3]).unwrap();
        fs::write(dir.path().join("mesh.bin"), [9u8; 8]).unwrap();

        let mut doc = SceneDocument::from_value(json!({
            "images": [{"uri": "skin.jpg"}],
            "buffers": [{"uri": "mesh.bin", "byteLength": 8}]
        }))
        .unwrap();

        let report = embed_resources(&mut doc, dir.path()).unwrap();

        assert_eq!(report.embedded_count(ResourceKind::Image), 1);
        assert_eq!(report.embedded_count(ResourceKind::Buffer), 1);
        assert_eq!(report.embedded_bytes(), 11);
        assert!(report.warnings.is_empty());

        let images = doc.section(IMAGES).unwrap().unwrap();
        assert_eq!(images[0]["uri"], "data:image/jpeg;base64,AQID");
        let buffers = doc.section(BUFFERS).unwrap().unwrap();
        assert!(
            buffers[0]["uri"]
                .as_str()
                .unwrap()
                .starts_with("data:application/octet-stream;base64,")
        );
        assert_eq!(buffers[0]["byteLength"], 8);
    }

    #[test]
    fn test_missing_file_is_a_warning() {
        let dir = tempdir().unwrap();
        let mut doc = SceneDocument::from_value(json!({
            "images": [{"uri": "gone.png"}]
        }))
        .unwrap();

        let report = embed_resources(&mut doc, dir.path()).unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.missing().count(), 1);
        let images = doc.section(IMAGES).unwrap().unwrap();
        assert_eq!(images[0]["uri"], "gone.png");
    }

    #[test]
    fn test_records_without_uri_untouched() {
        let dir = tempdir().unwrap();
        let original = json!({
            "images": [{"bufferView": 3, "mimeType": "image/png"}, {"uri": 7}]
        });
        let mut doc = SceneDocument::from_value(original.clone()).unwrap();

        let report = embed_resources(&mut doc, dir.path()).unwrap();

        assert_eq!(doc.into_value(), original);
        assert_eq!(report.resources.len(), 2);
        assert_eq!(report.warnings.len(), 1);
    }
}
