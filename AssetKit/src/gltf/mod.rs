//! GLTF JSON document handling: loading, `data:` URIs and resource embedding.

pub mod data_uri;
pub mod document;
pub mod embed;

pub use data_uri::{DataUri, decode_data_uri, encode_data_uri, image_mime_for_path, is_data_uri};
pub use document::SceneDocument;
pub use embed::{EmbedOutcome, EmbedReport, EmbeddedResource, ResourceKind, embed_resources};
