//! `data:` URI helpers for inlined GLTF resources.

use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::error::{Error, Result};

/// Prefix that marks a URI as already inlined.
pub const DATA_URI_PREFIX: &str = "data:";

/// MIME type used for every embedded buffer.
pub const BUFFER_MIME: &str = "application/octet-stream";

/// MIME type for images whose extension is not recognised.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Whether `uri` is an inline data reference rather than a file path.
#[must_use]
pub fn is_data_uri(uri: &str) -> bool {
    uri.starts_with(DATA_URI_PREFIX)
}

/// Pick an image MIME type from the file extension.
///
/// `.png` maps to `image/png`, `.jpg`/`.jpeg` to `image/jpeg`; anything else
/// falls back to `image/png`.
#[must_use]
pub fn image_mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => DEFAULT_IMAGE_MIME,
    }
}

/// Build `data:<mime>;base64,<payload>` for the given bytes.
#[must_use]
pub fn encode_data_uri(mime: &str, data: &[u8]) -> String {
    format!("{DATA_URI_PREFIX}{mime};base64,{}", BASE64.encode(data))
}

/// A decoded inline resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type from the URI header (may be empty).
    pub mime: String,
    /// Decoded payload.
    pub data: Vec<u8>,
}

/// Decode a base64 `data:` URI.
///
/// # Errors
/// Returns [`Error::MalformedDataUri`] if the URI lacks the `data:` prefix,
/// the `,` separator, or the `;base64` marker, and a base64 error if the
/// payload is not valid base64.
pub fn decode_data_uri(uri: &str) -> Result<DataUri> {
    let rest = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| malformed("missing 'data:' prefix"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| malformed("missing ',' separator"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| malformed("only base64 payloads are supported"))?;

    Ok(DataUri {
        mime: mime.to_string(),
        data: BASE64.decode(payload)?,
    })
}

fn malformed(message: &str) -> Error {
    Error::MalformedDataUri {
        message: message.to_string(),
    }
}
