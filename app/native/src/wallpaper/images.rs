//! Image discovery.
//!
//! Folders are scanned one level deep and nested directories are skipped.
//! A regular file is accepted when its extension is on the allow-list,
//! compared case-insensitively. Every other entry, including dangling
//! symlinks, is reported to the run log.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use natord::compare;

use crate::logging::DiagnosticLog;

/// Supported image file extensions.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["webp", "svg", "png", "jpeg", "jpg"];

/// Checks if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Collects the supported images from every folder in `folders`.
///
/// Folders that are not directories are logged and skipped. The combined list
/// is sorted with natural ordering.
///
/// # Errors
///
/// Returns an error if an existing folder cannot be read.
pub fn collect_images(folders: &[PathBuf], log: &DiagnosticLog) -> io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for folder in folders {
        if !folder.is_dir() {
            log.error(&format!("invalid folder path '{}'", folder.display()));
            continue;
        }
        scan_folder(folder, log, &mut images)?;
    }

    images.sort_by(|a, b| compare(a.to_string_lossy().as_ref(), b.to_string_lossy().as_ref()));
    Ok(images)
}

fn scan_folder(folder: &Path, log: &DiagnosticLog, images: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut accepted = 0_usize;

    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_dir() {
            continue;
        }

        if path.is_file() && is_supported_image(&path) {
            images.push(path);
            accepted += 1;
        } else {
            log.error(&format!("Invalid image file: {}", path.display()));
        }
    }

    tracing::debug!(folder = %folder.display(), accepted, "scanned image folder");
    Ok(())
}
