//! Filesystem transformations applied to the staging tree.
//!
//! Every operation collects its full match list before touching the tree, so
//! a walk never observes its own mutations.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::pattern::{relative_unix_path, Pattern};
use crate::renderer::TemplateRenderer;
use crate::variables::Variables;

/// Extension marking a file as a template to render and strip.
pub const TEMPLATE_EXTENSION: &str = "ftl";

pub fn is_template_file(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == TEMPLATE_EXTENSION)
}

/// Walks `root` deepest-first and returns every entry accepted by `filter`.
/// Within a directory, subdirectories are visited before files so deeper
/// paths always come first.
fn collect_bottom_up<F>(root: &Path, mut filter: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&walkdir::DirEntry) -> bool,
{
    let walker = WalkDir::new(root)
        .min_depth(1)
        .contents_first(true)
        .sort_by(|a, b| {
            b.file_type()
                .is_dir()
                .cmp(&a.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        });

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry?;
        if filter(&entry) {
            entries.push(entry.into_path());
        }
    }
    Ok(entries)
}

fn collect_matches(root: &Path, pattern: &Pattern, files_only: bool) -> Result<Vec<PathBuf>> {
    collect_bottom_up(root, |entry| {
        if files_only && !entry.file_type().is_file() {
            return false;
        }
        relative_unix_path(root, entry.path())
            .is_some_and(|relative| pattern.matches(&relative))
    })
}

/// Renders every `.ftl` file under `root` in place, writing the output next to
/// it without the marker and deleting the marked file. Returns the written
/// paths. The first failing render aborts the whole operation.
pub fn process_templates(
    renderer: &dyn TemplateRenderer,
    root: &Path,
    variables: &Variables,
) -> Result<Vec<PathBuf>> {
    let templates =
        collect_bottom_up(root, |entry| entry.file_type().is_file() && is_template_file(entry.path()))?;

    let mut written = Vec::with_capacity(templates.len());
    for template in templates {
        let relative = relative_unix_path(root, &template).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("template path is not valid UTF-8: {}", template.display()),
            )
        })?;
        let content = renderer.render_file(root, &relative, variables)?;
        let target = template.with_extension("");
        debug!("Writing rendered template '{}'.", target.display());
        fs::write(&target, content)?;
        fs::remove_file(&template)?;
        written.push(target);
    }
    Ok(written)
}

/// Moves every file matching `from` into the directory `to` (relative to
/// `root`), keeping base names. Returns the new paths.
///
/// # Errors
/// * `Error::InvalidTarget` if `to` exists and is a regular file
/// * `Error::TargetExists` if a moved file would replace an existing one
pub fn move_files(root: &Path, from: &str, to: &str) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(from)?;
    let files = collect_matches(root, &pattern, true)?;

    let destination = root.join(to);
    if !destination.exists() {
        fs::create_dir_all(&destination)?;
    } else if destination.is_file() {
        return Err(Error::InvalidTarget { path: destination });
    }

    let mut moved = Vec::with_capacity(files.len());
    for file in files {
        let Some(file_name) = file.file_name() else {
            continue;
        };
        let target = destination.join(file_name);
        if target == file {
            continue;
        }
        if target.exists() {
            return Err(Error::TargetExists { path: target });
        }
        debug!("Moving '{}' to '{}'.", file.display(), target.display());
        fs::rename(&file, &target)?;
        moved.push(target);
    }
    Ok(moved)
}

/// Renames `file` (relative to `root`) to `new_name` within its directory.
/// Renaming a file to its current name does nothing.
///
/// # Errors
/// * `Error::FileNotFound` if `file` does not exist
/// * `Error::InvalidTarget` if `file` names the staging root itself
/// * `Error::TargetExists` if a sibling named `new_name` already exists
pub fn rename_file(root: &Path, file: &str, new_name: &str) -> Result<PathBuf> {
    let source = root.join(file);
    if !source.exists() {
        return Err(Error::FileNotFound { path: source });
    }
    if source.components().eq(root.components()) {
        return Err(Error::InvalidTarget { path: source });
    }

    if source.file_name().is_some_and(|name| name == new_name) {
        return Ok(source);
    }

    let target = source.with_file_name(new_name);
    if target.exists() {
        return Err(Error::TargetExists { path: target });
    }
    debug!("Renaming '{}' to '{}'.", source.display(), target.display());
    fs::rename(&source, &target)?;
    Ok(target)
}

/// Deletes every file or directory matching `files`. Directories go with all
/// of their contents. Returns the deleted paths.
pub fn delete_files(root: &Path, files: &str) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(files)?;
    let matches = collect_matches(root, &pattern, false)?;

    let mut deleted = Vec::with_capacity(matches.len());
    for path in matches {
        // Deepest first, so a matched directory is only visited after its
        // matched children have been removed.
        let metadata = fs::symlink_metadata(&path)?;
        debug!("Deleting '{}'.", path.display());
        if metadata.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        deleted.push(path);
    }
    Ok(deleted)
}
