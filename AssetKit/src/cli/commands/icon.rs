//! CLI command for installing the app icon

use std::path::Path;

use crate::cli::progress::{PICTURE, format_size};
use crate::icon::copy_icon;

/// Copy the app icon to its destination.
pub fn execute(source: &Path, destination: &Path) -> anyhow::Result<()> {
    let (written, bytes) = copy_icon(source, destination)?;

    println!(
        "{}Copied {} to {} ({})",
        PICTURE,
        source.display(),
        written.display(),
        format_size(bytes)
    );
    println!("AppIcon setup complete!");

    Ok(())
}
