//! App icon installation.

use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Icon source in the default project layout.
pub const DEFAULT_ICON_SOURCE: &str = "assets/images/app_icon.png";

/// iOS app icon slot in the default project layout.
pub const DEFAULT_ICON_DESTINATION: &str =
    "ios/Runner/Assets.xcassets/AppIcon.appiconset/AppIcon-1024.png";

/// Copy `source` to `destination`, keeping permissions and access/modify times.
///
/// If `destination` is an existing directory the file keeps its name inside
/// it. Returns the path written and the number of bytes copied.
///
/// # Errors
/// Returns [`Error::SourceNotFound`] if `source` does not exist, or an IO
/// error if the copy fails (including a missing destination directory).
pub fn copy_icon<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<(PathBuf, u64)> {
    let source = source.as_ref();
    if !source.exists() {
        return Err(Error::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    let destination = destination.as_ref();
    let target = match source.file_name() {
        Some(name) if destination.is_dir() => destination.join(name),
        _ => destination.to_path_buf(),
    };

    let metadata = fs::metadata(source)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);

    // Permissions are applied last: a read-only source must not lock us out
    // of setting times on the copy.
    let mut reader = File::open(source)?;
    let mut writer = File::create(&target)?;
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.set_times(times)?;
    drop(writer);
    fs::set_permissions(&target, metadata.permissions())?;

    tracing::info!(
        "Copied {} -> {} ({} bytes)",
        source.display(),
        target.display(),
        bytes
    );

    Ok((target, bytes))
}
