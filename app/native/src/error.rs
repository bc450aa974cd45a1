//! Error types for wallswitch.
//!
//! Configuration and I/O errors are converted into [`WallswitchError`] at the
//! CLI boundary, where `main` prints them and exits. Backend and compositing
//! failures never get here; the scheduler logs them and carries on.

use thiserror::Error;

use crate::config::FatalError;

/// Errors that can occur during application execution.
#[derive(Debug, Error)]
pub enum WallswitchError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Output serialization failed.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for WallswitchError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for WallswitchError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<FatalError> for WallswitchError {
    fn from(err: FatalError) -> Self {
        match err {
            FatalError::Io(io) => Self::IoError(io.to_string()),
            other => Self::ConfigError(other.to_string()),
        }
    }
}
