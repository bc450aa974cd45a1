//! Logging for wallswitch.
//!
//! Two sinks exist side by side:
//!
//! - [`init_tracing`] installs a `tracing-subscriber` fmt layer on stderr for
//!   developer diagnostics.
//! - [`DiagnosticLog`] is the user-facing run log: a plain-text file that is
//!   truncated with a timestamp banner at startup and then appended one message
//!   per line. Every line is mirrored to `tracing`.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::constants::{APP_NAME, TIMESTAMP_FORMAT};

/// Installs the global stderr subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level follows `verbosity`
/// (0 = info, 1 = debug, 2+ = trace). Calling this more than once is harmless.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{APP_NAME}={level},wallswitch_lib={level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Returns the current local time formatted for the run log.
#[must_use]
pub fn timestamp() -> String { chrono::Local::now().format(TIMESTAMP_FORMAT).to_string() }

/// Append-only plain-text run log.
#[derive(Debug, Clone)]
pub struct DiagnosticLog {
    path: Option<PathBuf>,
}

impl DiagnosticLog {
    /// Creates (or truncates) the log file and writes the run banner.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be written.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let banner = format!("Ran On: {}", timestamp());
        let underline = "-".repeat(banner.chars().count());
        fs::write(&path, format!("{banner}\n{underline}\n\n"))?;

        tracing::debug!(path = %path.display(), "run log created");
        Ok(Self { path: Some(path) })
    }

    /// A log that writes its lines to stderr instead of a file.
    ///
    /// Used by the one-shot `check` and `list` commands.
    #[must_use]
    pub const fn console() -> Self { Self { path: None } }

    /// Returns the log file path, or `None` for a console log.
    #[must_use]
    pub fn path(&self) -> Option<&Path> { self.path.as_deref() }

    /// Appends an informational line verbatim.
    pub fn note(&self, message: &str) {
        tracing::info!("{message}");
        self.append(message);
    }

    /// Appends a recoverable error line (`ERROR: ...`).
    pub fn error(&self, message: &str) {
        tracing::warn!("{message}");
        self.append(&format!("ERROR: {message}"));
    }

    /// Appends a fatal error line (`CRITICAL ERROR: ...`).
    pub fn critical(&self, message: &str) {
        tracing::error!("{message}");
        self.append(&format!("CRITICAL ERROR: {message}"));
    }

    fn append(&self, line: &str) {
        let Some(path) = &self.path else {
            eprintln!("{line}");
            return;
        };

        let result = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "{line}"));

        if let Err(err) = result {
            tracing::warn!(error = %err, path = %path.display(), "failed to append to run log");
        }
    }
}
