//! The staging tree: a private, mutable copy of the template source.

use globset::GlobSet;
use log::debug;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::config::CONFIG_FILES;
use crate::error::Result;
use crate::ignore::IGNORE_FILE;
use crate::pattern::relative_unix_path;

/// A temporary directory holding the working copy of a template. Removed
/// when dropped.
#[derive(Debug)]
pub struct Staging {
    dir: TempDir,
}

/// Whether a template-relative path belongs to kiln itself rather than to the
/// generated project.
fn is_template_metadata(relative: &str) -> bool {
    relative == IGNORE_FILE || CONFIG_FILES.contains(&relative)
}

impl Staging {
    /// Copies `template_root` into a fresh temporary directory, leaving out
    /// the configuration file, the ignore file and every ignored path.
    pub fn create<P: AsRef<Path>>(template_root: P, ignored: &GlobSet) -> Result<Self> {
        let template_root = template_root.as_ref();
        let dir = tempfile::Builder::new().prefix("kiln-").tempdir()?;
        debug!("Staging '{}' in '{}'.", template_root.display(), dir.path().display());

        let mut walker = WalkDir::new(template_root).min_depth(1).into_iter();
        while let Some(entry) = walker.next() {
            let entry = entry?;
            let Some(relative) = relative_unix_path(template_root, entry.path()) else {
                continue;
            };
            if is_template_metadata(&relative) || ignored.is_match(&relative) {
                debug!("Skipping '{relative}'.");
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            }

            let target = dir.path().join(&relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(entry.path(), &target)?;
            }
        }

        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
