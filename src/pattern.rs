//! Wildcard pattern matching against staging-relative paths.

use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;

use crate::error::Result;

/// Converts host separators into `/` so patterns behave the same everywhere.
pub fn to_unix_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Returns the `/`-separated form of `path` relative to `root`, or `None` if
/// `path` is not below `root` or is not valid UTF-8.
pub fn relative_unix_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> =
        relative.components().map(|component| component.as_os_str().to_str()).collect();
    Some(parts?.join("/"))
}

/// A compiled shell-style wildcard.
///
/// `*` and `?` stay within one path segment, `**` crosses directories, and the
/// whole relative path has to match.
#[derive(Debug, Clone)]
pub struct Pattern {
    matcher: GlobMatcher,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(&to_unix_separators(pattern))
            .literal_separator(true)
            .backslash_escape(false)
            .build()?;
        Ok(Self { matcher: glob.compile_matcher() })
    }

    pub fn matches(&self, relative_path: &str) -> bool {
        self.matcher.is_match(to_unix_separators(relative_path))
    }
}
