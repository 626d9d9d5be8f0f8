//! GLB inspection command

use std::path::Path;

use serde_json::Value;

use crate::cli::progress::format_size;
use crate::glb::read_glb_file;
use crate::gltf::{decode_data_uri, is_data_uri};

/// Print the container layout and the state of every image/buffer URI.
pub fn execute(path: &Path) -> anyhow::Result<()> {
    let container = read_glb_file(path)?;

    println!("GLB File Information: {}", path.display());
    println!("====================");
    println!("Version:      {}", container.version);
    println!("Total length: {} bytes", container.total_length);
    println!();

    println!("Chunks:");
    println!("-------");
    for (i, chunk) in container.chunks().iter().enumerate() {
        println!(
            "  [{i}] {:6} {:>10} bytes @ {}",
            chunk.type_name(),
            chunk.length,
            chunk.offset
        );
    }

    for section in ["images", "buffers"] {
        let Some(entries) = container.json.get(section).and_then(Value::as_array) else {
            continue;
        };

        println!();
        println!("{} ({}):", capitalize(section), entries.len());
        for (i, entry) in entries.iter().enumerate() {
            println!("  [{i}] {}", describe_uri(entry));
        }
    }

    Ok(())
}

fn describe_uri(entry: &Value) -> String {
    let Some(uri) = entry.get("uri").and_then(Value::as_str) else {
        return "(no uri)".to_string();
    };

    if !is_data_uri(uri) {
        return format!("external: {uri}");
    }

    match decode_data_uri(uri) {
        Ok(data) => format!("embedded {} ({})", data.mime, format_size(data.data.len() as u64)),
        Err(e) => format!("embedded (undecodable: {e})"),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
