//! External binary lookup.

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::EXTRA_PATHS_ENV_VAR;

/// Resolve the absolute path to an executable binary.
///
/// Absolute paths are accepted as-is when executable. Otherwise the binary is
/// searched for, in order, in:
/// 1. Directories listed in `WALLSWITCH_EXTRA_PATHS` (colon-separated).
/// 2. The current process `PATH`.
/// 3. Common system and per-user binary directories.
///
/// # Errors
///
/// Returns a descriptive message when no executable candidate is found.
pub fn resolve_binary(binary: &str) -> Result<PathBuf, String> {
    if binary.is_empty() {
        return Err("Binary name cannot be empty".to_string());
    }

    let candidate = Path::new(binary);
    if candidate.is_absolute() {
        return if is_executable(candidate) {
            Ok(candidate.to_path_buf())
        } else {
            Err(format!("Binary at {} is not executable", candidate.display()))
        };
    }

    let mut search_paths = Vec::new();

    if let Ok(extra) = env::var(EXTRA_PATHS_ENV_VAR) {
        search_paths.extend(extra.split(':').map(PathBuf::from));
    }

    if let Some(path_var) = env::var_os("PATH") {
        search_paths.extend(env::split_paths(&path_var));
    }

    // Flatpak exports and distro locations that a minimal session PATH may omit.
    search_paths.extend([
        PathBuf::from("/usr/local/bin"),
        PathBuf::from("/usr/bin"),
        PathBuf::from("/bin"),
        PathBuf::from("/var/lib/flatpak/exports/bin"),
    ]);

    if let Some(home) = dirs::home_dir() {
        search_paths.push(home.join(".local/bin"));
        search_paths.push(home.join(".local/share/flatpak/exports/bin"));
    }

    search_paths
        .into_iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(binary))
        .find(|path| is_executable(path))
        .ok_or_else(|| format!("Unable to locate executable '{binary}' in known search paths"))
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };

    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}
