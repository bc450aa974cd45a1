//! Validation and image listing commands.
//!
//! Both commands validate the workspace configuration with a console log, so
//! every message goes to stderr and the run log of a live cycler is untouched.

use serde_json::{Value, json};

use crate::cli::output::{format_bool, print_highlighted_json};
use crate::config::{self, Settings};
use crate::error::WallswitchError;
use crate::logging::DiagnosticLog;
use crate::workspace::Workspace;

/// Validates the configuration and prints the effective settings.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or is unusable.
pub fn check(workspace: &Workspace) -> Result<(), WallswitchError> {
    let settings = load(workspace)?;
    print_highlighted_json(&serde_json::to_value(&settings)?);
    eprintln!("{} {} is valid", format_bool(true), workspace.config_file().display());
    Ok(())
}

/// Prints the validated images per monitor role.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or is unusable.
pub fn list(workspace: &Workspace) -> Result<(), WallswitchError> {
    let settings = load(workspace)?;
    print_highlighted_json(&image_listing(&settings));
    Ok(())
}

fn load(workspace: &Workspace) -> Result<Settings, WallswitchError> {
    let path = workspace.config_file();
    if !path.exists() {
        return Err(WallswitchError::ConfigError(format!(
            "No configuration file at {}\nRun 'wallswitch config init' to create one.",
            path.display()
        )));
    }

    Ok(config::load(&path, &DiagnosticLog::console())?)
}

fn image_listing(settings: &Settings) -> Value {
    let sets: serde_json::Map<String, Value> = settings
        .image_sets
        .iter()
        .map(|(role, images)| {
            let paths = images.iter().map(|p| Value::String(p.display().to_string())).collect();
            (role.key().to_string(), Value::Array(paths))
        })
        .collect();

    json!({
        "service": settings.service.kind().as_str(),
        "image_sets": sets,
    })
}
