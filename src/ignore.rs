//! File and directory ignore pattern handling for kiln templates.
//! Paths matched here never make it into the staging tree.

use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// kiln's ignore file name
pub const IGNORE_FILE: &str = ".kilnignore";

/// Patterns ignored in every template.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 3] = [".git", ".git/**", "**/.DS_Store"];

/// Reads `.kilnignore` from the template root and combines its lines with
/// [`DEFAULT_IGNORE_PATTERNS`].
///
/// A missing file only yields the defaults. Blank lines and lines starting
/// with `#` are skipped.
///
/// # Example
/// ```ignore
/// # Contents of .kilnignore:
/// *.pyc
/// __pycache__/**
/// ```
pub fn parse_kilnignore_file<P: AsRef<Path>>(template_root: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORE_PATTERNS {
        builder.add(Glob::new(pattern)?);
    }

    let ignore_path = template_root.as_ref().join(IGNORE_FILE);
    if let Ok(contents) = read_to_string(&ignore_path) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add(Glob::new(line)?);
        }
    } else {
        debug!("{IGNORE_FILE} does not exist");
    }

    Ok(builder.build()?)
}
