//! Desktop wallpaper backends.
//!
//! The scheduler talks to the desktop through the [`Desktop`] trait. The
//! production implementation, [`CommandDesktop`], runs `gsettings` and the
//! hydrapaper flatpak synchronously and reports non-zero exits as errors.

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

use crate::config::{ColorTheme, PictureOptions};
use crate::platform::command::resolve_binary;
use crate::platform::path::file_uri;

/// GNOME settings schema holding the wallpaper keys.
const BACKGROUND_SCHEMA: &str = "org.gnome.desktop.background";

/// Flatpak application id of hydrapaper.
const HYDRAPAPER_APP_ID: &str = "org.gabmus.hydrapaper";

/// Errors reported by a wallpaper backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The external program could not be located.
    #[error("{0}")]
    NotFound(String),
    /// The external program could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The external program exited unsuccessfully.
    #[error("{program} exited with {status}{}", stderr_suffix(.stderr))]
    Failed { program: String, status: ExitStatus, stderr: String },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() { String::new() } else { format!(": {stderr}") }
}

/// The desktop operations the scheduler needs.
pub trait Desktop {
    /// Sets how a single image is fitted to the screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend command fails.
    fn apply_picture_options(&mut self, options: PictureOptions) -> Result<(), BackendError>;

    /// Shows one image across the desktop under the key for `theme`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend command fails.
    fn show_single(&mut self, theme: ColorTheme, image: &Path) -> Result<(), BackendError>;

    /// Shows `left` and `right` on the two monitors.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend command fails.
    fn show_pair(&mut self, left: &Path, right: &Path) -> Result<(), BackendError>;
}

/// Desktop backend that shells out to `gsettings` and `flatpak`.
#[derive(Debug, Clone, Default)]
pub struct CommandDesktop;

impl CommandDesktop {
    fn run(program: &str, args: &[&OsStr]) -> Result<(), BackendError> {
        let binary = resolve_binary(program).map_err(BackendError::NotFound)?;
        tracing::debug!(program = %binary.display(), ?args, "running backend command");

        let output = Command::new(&binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| BackendError::Spawn { program: program.to_string(), source })?;

        if output.status.success() {
            return Ok(());
        }

        Err(BackendError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl Desktop for CommandDesktop {
    fn apply_picture_options(&mut self, options: PictureOptions) -> Result<(), BackendError> {
        Self::run("gsettings", &[
            OsStr::new("set"),
            OsStr::new(BACKGROUND_SCHEMA),
            OsStr::new("picture-options"),
            OsStr::new(options.as_str()),
        ])
    }

    fn show_single(&mut self, theme: ColorTheme, image: &Path) -> Result<(), BackendError> {
        let uri = file_uri(image);
        Self::run("gsettings", &[
            OsStr::new("set"),
            OsStr::new(BACKGROUND_SCHEMA),
            OsStr::new(theme.settings_key()),
            OsStr::new(&uri),
        ])
    }

    fn show_pair(&mut self, left: &Path, right: &Path) -> Result<(), BackendError> {
        Self::run("flatpak", &[
            OsStr::new("run"),
            OsStr::new(HYDRAPAPER_APP_ID),
            OsStr::new("-c"),
            left.as_os_str(),
            right.as_os_str(),
        ])
    }
}
