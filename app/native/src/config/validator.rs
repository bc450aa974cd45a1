//! Configuration validation.
//!
//! The file is parsed into a [`serde_json::Value`] and each field is checked on
//! its own, so one malformed value never hides problems in the others.
//! Recoverable problems are logged and replaced with a default; fatal problems
//! are logged and collected into [`FatalError::Invalid`].

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use json_comments::StripComments;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::types::{
    DEFAULT_SWITCH_SECS, FatalError, FatalIssue, MIN_SWITCH_SECS, MonitorRole,
    PictureOptions, ServiceKind, ServiceSettings, Settings,
};
use crate::constants::REGENERATE_HINT;
use crate::logging::DiagnosticLog;
use crate::platform::path::{expand, expand_and_resolve};
use crate::wallpaper::images::collect_images;

/// Reads and validates the configuration file at `path`.
///
/// Comments are stripped before parsing.
///
/// # Errors
///
/// - [`FatalError::Io`] if the file or an image folder cannot be read.
/// - [`FatalError::Parse`] if the file is not valid JSON.
/// - [`FatalError::Invalid`] listing every fatal issue found.
pub fn load(path: &Path, log: &DiagnosticLog) -> Result<Settings, FatalError> {
    let file = File::open(path)?;
    let reader = StripComments::new(BufReader::new(file));

    let value: Value = match serde_json::from_reader(reader) {
        Ok(value) => value,
        Err(err) if err.is_io() => return Err(FatalError::Io(io::Error::from(err))),
        Err(err) => {
            log.critical(&format!("config file is not valid JSON: {err}"));
            return Err(FatalError::Parse(err));
        }
    };

    validate(&value, log)
}

/// Validates an already-parsed configuration document.
///
/// # Errors
///
/// See [`load`]. Only [`FatalError::Io`] and [`FatalError::Invalid`] are returned.
pub fn validate(value: &Value, log: &DiagnosticLog) -> Result<Settings, FatalError> {
    let Some(root) = value.as_object() else {
        log.critical(&FatalIssue::NotAnObject.to_string());
        return Err(FatalError::Invalid(vec![FatalIssue::NotAnObject]));
    };

    let kind = match parse_service(root) {
        Ok(kind) => kind,
        Err(issue) => {
            log.critical(&issue_message(&issue));
            return Err(FatalError::Invalid(vec![issue]));
        }
    };

    let service = match kind {
        ServiceKind::GSettings => ServiceSettings::GSettings {
            color_theme: choice_field(root, "gnome_color_theme", "'light' or 'dark'", log),
            picture_options: choice_field(root, "gsettings_mode", &picture_option_names(), log),
        },
        ServiceKind::Hydrapaper => ServiceSettings::Hydrapaper {
            stagger: bool_field(root, "hydrapaper_stagger", log),
        },
    };

    let switch_interval_secs = switch_interval(root, log);

    let mut issues = Vec::new();
    let image_parent_directory = match parent_directory(root) {
        Ok(dir) => dir,
        Err(issue) => {
            log.critical(&issue_message(&issue));
            issues.push(issue);
            PathBuf::new()
        }
    };

    let mut image_sets = BTreeMap::new();
    if issues.is_empty() {
        image_sets = image_sets_for(kind, root, &image_parent_directory, log, &mut issues)?;
    }

    if !issues.is_empty() {
        return Err(FatalError::Invalid(issues));
    }

    tracing::debug!(service = kind.as_str(), switch_interval_secs, "configuration validated");
    Ok(Settings { service, switch_interval_secs, image_parent_directory, image_sets })
}

fn issue_message(issue: &FatalIssue) -> String {
    match issue {
        FatalIssue::MissingService
        | FatalIssue::MissingParentDirectory
        | FatalIssue::MissingImageFolders
        | FatalIssue::MissingRole(_) => format!("{issue}. {REGENERATE_HINT}"),
        _ => issue.to_string(),
    }
}

fn parse_service(root: &Map<String, Value>) -> Result<ServiceKind, FatalIssue> {
    match root.get("service") {
        None => Err(FatalIssue::MissingService),
        Some(Value::String(name)) if name == ServiceKind::GSettings.as_str() => {
            Ok(ServiceKind::GSettings)
        }
        Some(Value::String(name)) if name == ServiceKind::Hydrapaper.as_str() => {
            Ok(ServiceKind::Hydrapaper)
        }
        Some(other) => Err(FatalIssue::UnknownService(other.to_string())),
    }
}

fn picture_option_names() -> String {
    PictureOptions::ALL.iter().map(|o| format!("'{}'", o.as_str())).collect::<Vec<_>>().join(", ")
}

/// Reads a string-valued enum, falling back to its default.
fn choice_field<T>(root: &Map<String, Value>, key: &str, expected: &str, log: &DiagnosticLog) -> T
where
    T: DeserializeOwned + Serialize + Default,
{
    let default = T::default();
    let default_name = serde_json::to_value(&default).unwrap_or(Value::Null);

    let Some(value) = root.get(key) else {
        log.error(&format!("'{key}' field is missing, using default {default_name}. {REGENERATE_HINT}"));
        return default;
    };

    match T::deserialize(value) {
        Ok(parsed) => parsed,
        Err(_) => {
            log.error(&format!(
                "'{key}' should be one of {expected}, got {value}; using default {default_name}"
            ));
            default
        }
    }
}

/// Reads a boolean given either as a JSON bool or as "true"/"false".
fn bool_field(root: &Map<String, Value>, key: &str, log: &DiagnosticLog) -> bool {
    match root.get(key) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) if text == "true" => true,
        Some(Value::String(text)) if text == "false" => false,
        Some(other) => {
            log.error(&format!("'{key}' should be either 'true' or 'false', got {other}; using default 'false'"));
            false
        }
        None => {
            log.error(&format!("'{key}' field is missing, using default 'false'. {REGENERATE_HINT}"));
            false
        }
    }
}

fn switch_interval(root: &Map<String, Value>, log: &DiagnosticLog) -> u64 {
    let parsed = match root.get("switch_time") {
        None => {
            log.error(&format!(
                "'switch_time' field is missing, using default {DEFAULT_SWITCH_SECS}. {REGENERATE_HINT}"
            ));
            return DEFAULT_SWITCH_SECS;
        }
        Some(Value::Number(number)) => number.as_i64(),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    let Some(seconds) = parsed else {
        log.error(&format!(
            "'switch_time' should be an integer, at least {MIN_SWITCH_SECS}; using default {DEFAULT_SWITCH_SECS}"
        ));
        return DEFAULT_SWITCH_SECS;
    };

    match u64::try_from(seconds) {
        Ok(secs) if secs >= MIN_SWITCH_SECS => secs,
        _ => {
            log.error(&format!(
                "'switch_time' must be a minimum of {MIN_SWITCH_SECS}, using {MIN_SWITCH_SECS}"
            ));
            MIN_SWITCH_SECS
        }
    }
}

fn parent_directory(root: &Map<String, Value>) -> Result<PathBuf, FatalIssue> {
    let Some(raw) = root.get("image_parent_directory").and_then(Value::as_str) else {
        return Err(FatalIssue::MissingParentDirectory);
    };

    let dir = expand(raw);
    if dir.is_absolute() && dir.is_dir() {
        Ok(dir)
    } else {
        Err(FatalIssue::InvalidParentDirectory(raw.to_string()))
    }
}

fn image_sets_for(
    kind: ServiceKind,
    root: &Map<String, Value>,
    parent: &Path,
    log: &DiagnosticLog,
    issues: &mut Vec<FatalIssue>,
) -> Result<BTreeMap<MonitorRole, Vec<PathBuf>>, FatalError> {
    let mut sets = BTreeMap::new();

    let Some(folders) = root.get("image_folders").and_then(Value::as_object) else {
        let issue = FatalIssue::MissingImageFolders;
        log.critical(&issue_message(&issue));
        issues.push(issue);
        return Ok(sets);
    };

    for &role in MonitorRole::required_for(kind) {
        let Some(entries) = folders.get(role.key()).and_then(Value::as_array) else {
            let issue = FatalIssue::MissingRole(role);
            log.critical(&issue_message(&issue));
            issues.push(issue);
            continue;
        };

        let sub_folders: Vec<PathBuf> = entries
            .iter()
            .filter_map(|entry| match entry.as_str() {
                Some(name) => Some(expand_and_resolve(name, parent)),
                None => {
                    log.error(&format!("'{}' entry {entry} is not a folder name, skipping", role.key()));
                    None
                }
            })
            .collect();

        let images = collect_images(&sub_folders, log)?;
        if images.is_empty() {
            let issue = FatalIssue::NoValidImages(role);
            log.critical(&issue_message(&issue));
            issues.push(issue);
            continue;
        }

        sets.insert(role, images);
    }

    Ok(sets)
}
