//! Path utilities for shell-like path expansion.
//!
//! Configuration values may use `~` for the home directory. Sub-folders listed
//! under `image_folders` are resolved against the parent image directory.

use std::path::{Path, PathBuf};

/// Expands a leading tilde to the user's home directory.
///
/// Absolute and relative paths are returned unchanged. Surrounding whitespace
/// is trimmed; a blank input yields an empty path.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    let expanded = shellexpand::tilde(path);
    PathBuf::from(expanded.as_ref())
}

/// Expands `path` and resolves it against `base_dir` unless it is already absolute.
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);

    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }

    base_dir.join(expanded)
}

/// Builds a `file://` URI for an absolute local path.
#[must_use]
pub fn file_uri(path: &Path) -> String { format!("file://{}", path.display()) }
