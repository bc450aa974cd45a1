//! Configuration change detection.
//!
//! Changes are detected by comparing the file's modification time against the
//! value recorded at the last (re)load. The scheduler polls between switches,
//! so no filesystem notification machinery is needed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::logging::{DiagnosticLog, timestamp};

/// Returns `true` if the modification time of `path` differs from `last_modified`.
///
/// # Errors
///
/// Returns an error if the file metadata cannot be read.
pub fn has_changed_since(path: &Path, last_modified: SystemTime) -> io::Result<bool> {
    Ok(modified_time(path)? != last_modified)
}

fn modified_time(path: &Path) -> io::Result<SystemTime> { fs::metadata(path)?.modified() }

/// Something the scheduler can ask whether the configuration changed.
pub trait ChangeProbe {
    /// Returns `true` once per detected change.
    fn check(&mut self) -> bool;
}

/// Tracks the configuration file's modification time across reloads.
#[derive(Debug)]
pub struct ConfigWatcher {
    path: PathBuf,
    last_modified: Option<SystemTime>,
    log: DiagnosticLog,
}

impl ConfigWatcher {
    /// Records the current modification time of `path` as the baseline.
    ///
    /// A missing file is not an error here; its first appearance counts as a change.
    pub fn new(path: impl Into<PathBuf>, log: DiagnosticLog) -> Self {
        let path = path.into();
        let last_modified = modified_time(&path).ok();
        Self { path, last_modified, log }
    }

    /// Returns the watched path.
    #[must_use]
    pub fn path(&self) -> &Path { &self.path }

    /// Re-reads the baseline without reporting a change.
    pub fn reset(&mut self) { self.last_modified = modified_time(&self.path).ok(); }
}

impl ChangeProbe for ConfigWatcher {
    fn check(&mut self) -> bool {
        let changed = match self.last_modified {
            Some(last) => has_changed_since(&self.path, last),
            None => modified_time(&self.path).map(|_| true),
        };

        match changed {
            Ok(false) => false,
            Ok(true) => {
                self.reset();
                self.log.note(&format!("Config File Updated - {}", timestamp()));
                true
            }
            Err(err) => {
                tracing::debug!(error = %err, path = %self.path.display(), "config file not readable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::logging::testing::CapturedLog;

    fn touch(path: &Path, time: SystemTime) {
        File::options().write(true).open(path).unwrap().set_modified(time).unwrap();
    }

    #[test]
    fn test_has_changed_since_equal_times() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();
        let modified = fs::metadata(&path).unwrap().modified().unwrap();

        assert!(!has_changed_since(&path, modified).unwrap());
    }

    #[test]
    fn test_has_changed_since_different_times() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();
        let modified = fs::metadata(&path).unwrap().modified().unwrap();

        assert!(has_changed_since(&path, modified - Duration::from_secs(10)).unwrap());
    }

    #[test]
    fn test_has_changed_since_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        assert!(has_changed_since(&dir.path().join("nope.json"), SystemTime::now()).is_err());
    }

    #[test]
    fn test_check_reports_each_change_once() {
        let captured = CapturedLog::new();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        let mut watcher = ConfigWatcher::new(&path, captured.log.clone());
        assert!(!watcher.check());

        touch(&path, SystemTime::now() + Duration::from_secs(30));
        assert!(watcher.check());
        assert!(!watcher.check());

        let lines = captured.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Config File Updated - "));
    }

    #[test]
    fn test_check_missing_file_is_not_a_change() {
        let captured = CapturedLog::new();
        let dir = TempDir::new().unwrap();
        let mut watcher = ConfigWatcher::new(dir.path().join("config.json"), captured.log.clone());
        assert!(!watcher.check());
        assert!(captured.lines().is_empty());
    }

    #[test]
    fn test_check_reports_file_created_after_start() {
        let captured = CapturedLog::new();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut watcher = ConfigWatcher::new(&path, captured.log.clone());
        fs::write(&path, "{}").unwrap();
        assert!(watcher.check());
        assert!(!watcher.check());
    }

    #[test]
    fn test_check_detects_older_modification_time() {
        let captured = CapturedLog::new();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        let mut watcher = ConfigWatcher::new(&path, captured.log.clone());
        touch(&path, SystemTime::now() - Duration::from_secs(3600));
        assert!(watcher.check());
        assert_eq!(captured.lines().len(), 1);
    }

    #[test]
    fn test_reset_moves_baseline() {
        let captured = CapturedLog::new();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        let mut watcher = ConfigWatcher::new(&path, captured.log.clone());
        touch(&path, SystemTime::now() + Duration::from_secs(30));
        watcher.reset();
        assert!(!watcher.check());
        assert_eq!(watcher.path(), path.as_path());
    }
}
