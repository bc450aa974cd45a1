//! Configuration template generation.
//!
//! The default file is rendered from [`ConfigFile::default`], so the template,
//! the JSON Schema and the validator defaults cannot drift apart.

use std::fs;
use std::io;
use std::path::Path;

use super::types::ConfigFile;

/// Generates the default configuration file contents as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn generate_config_template() -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(&ConfigFile::default())?;
    json.push('\n');
    Ok(json)
}

/// Returns the JSON Schema describing the configuration file.
#[must_use]
pub fn generate_schema() -> schemars::Schema { schemars::schema_for!(ConfigFile) }

/// Creates a configuration file with the default template at `path`.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let template = generate_config_template().map_err(io::Error::other)?;
    fs::write(path, template)
}
