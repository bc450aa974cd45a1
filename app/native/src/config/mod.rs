//! Configuration module for wallswitch.
//!
//! This module provides the configuration types, validation of the on-disk
//! file into [`Settings`], the default template, and change detection for
//! live reloading.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod template;
pub mod types;
pub mod validator;
mod watcher;

use std::path::Path;

pub use types::{
    ColorTheme, ConfigFile, DEFAULT_SWITCH_SECS, FatalError, FatalIssue, ImageFolders,
    MIN_SWITCH_SECS, MonitorRole, PictureOptions, ServiceKind, ServiceSettings, Settings,
};
pub use validator::{load, validate};
pub use watcher::{ChangeProbe, ConfigWatcher, has_changed_since};

/// Writes the default configuration file if `path` does not exist yet.
///
/// Returns `true` when a new file was created.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn ensure_config_file(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    template::create_config_file(path)?;
    tracing::info!(path = %path.display(), "created default configuration file");
    Ok(true)
}
