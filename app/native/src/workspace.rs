//! Working directory chosen at startup.
//!
//! Every file the cycler touches (configuration, run log, composite image) lives
//! in one directory. The directory is resolved once and handed to constructors.

use std::path::{Path, PathBuf};

use crate::constants::{COMPOSITE_FILE_NAME, CONFIG_FILE_NAME, LOG_FILE_NAME};
use crate::platform::path::expand;

/// The directory holding the configuration, log and composite files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    /// Creates a workspace rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    /// Resolves the workspace directory.
    ///
    /// An explicit directory (from `--dir` or the environment) wins. Otherwise the
    /// directory containing the running executable is used, falling back to the
    /// user's config directory and finally the current directory.
    #[must_use]
    pub fn resolve(explicit: Option<&str>) -> Self {
        if let Some(dir) = explicit.map(expand).filter(|p| !p.as_os_str().is_empty()) {
            return Self::new(dir);
        }

        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        let dir = exe_dir
            .or_else(|| dirs::config_dir().map(|d| d.join(crate::constants::APP_NAME)))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::new(dir)
    }

    /// Returns the workspace directory.
    #[must_use]
    pub fn dir(&self) -> &Path { &self.dir }

    /// Path to the JSON configuration file.
    #[must_use]
    pub fn config_file(&self) -> PathBuf { self.dir.join(CONFIG_FILE_NAME) }

    /// Path to the plain-text run log.
    #[must_use]
    pub fn log_file(&self) -> PathBuf { self.dir.join(LOG_FILE_NAME) }

    /// Path to the side-by-side composite image.
    #[must_use]
    pub fn composite_file(&self) -> PathBuf { self.dir.join(COMPOSITE_FILE_NAME) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_inside_workspace() {
        let workspace = Workspace::new("/opt/wallswitch");
        assert_eq!(workspace.config_file(), PathBuf::from("/opt/wallswitch/config.json"));
        assert_eq!(workspace.log_file(), PathBuf::from("/opt/wallswitch/errors.log"));
        assert_eq!(
            workspace.composite_file(),
            PathBuf::from("/opt/wallswitch/.joined_file.jpg")
        );
    }

    #[test]
    fn test_resolve_prefers_explicit_dir() {
        let workspace = Workspace::resolve(Some("/srv/walls"));
        assert_eq!(workspace.dir(), Path::new("/srv/walls"));
    }

    #[test]
    fn test_resolve_expands_tilde() {
        let workspace = Workspace::resolve(Some("~/walls"));
        assert!(!workspace.dir().to_string_lossy().starts_with('~'));
        assert!(workspace.dir().ends_with("walls"));
    }

    #[test]
    fn test_resolve_blank_explicit_falls_back() {
        let workspace = Workspace::resolve(Some("   "));
        assert!(!workspace.dir().as_os_str().is_empty());
    }
}
