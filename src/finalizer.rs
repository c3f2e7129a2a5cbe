//! Publishes the staging tree into the destination directory.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Copies every regular file under `staging_root` to the same relative path
/// under `destination_root`, creating directories as needed. Returns the
/// written destination paths.
///
/// # Errors
/// * `Error::CopyError` if a file cannot be copied. Files copied before the
///   failure stay in place.
pub fn finalize(staging_root: &Path, destination_root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(staging_root).min_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let relative = file.strip_prefix(staging_root).map_err(|e| Error::CopyError {
            path: file.clone(),
            source: std::io::Error::other(e),
        })?;
        let target = destination_root.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| Error::CopyError { path: file.clone(), source })?;
        }
        debug!("Copying '{}' to '{}'.", file.display(), target.display());
        fs::copy(&file, &target).map_err(|source| Error::CopyError { path: file.clone(), source })?;
        written.push(target);
    }
    Ok(written)
}
