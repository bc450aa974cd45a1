//! Configuration types for wallswitch.
//!
//! [`ConfigFile`] documents the on-disk JSON shape (used for the default file
//! and the JSON Schema). [`Settings`] is the validated, strongly-typed result
//! of loading that file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of seconds between wallpaper switches.
pub const MIN_SWITCH_SECS: u64 = 5;

/// Interval used when `switch_time` is missing or not an integer.
pub const DEFAULT_SWITCH_SECS: u64 = 60;

/// External utility used to set the wallpaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// GNOME `gsettings`, one image across the desktop.
    GSettings,
    /// Hydrapaper, one image per monitor on a two-monitor setup.
    Hydrapaper,
}

impl ServiceKind {
    /// Returns the configuration value for this service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GSettings => "gsettings",
            Self::Hydrapaper => "hydrapaper",
        }
    }
}

/// GNOME color scheme whose wallpaper key is updated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    /// Light style, `picture-uri`.
    Light,
    /// Dark style, `picture-uri-dark`.
    #[default]
    Dark,
}

impl ColorTheme {
    /// Returns the `org.gnome.desktop.background` key written for this theme.
    #[must_use]
    pub const fn settings_key(self) -> &'static str {
        match self {
            Self::Light => "picture-uri",
            Self::Dark => "picture-uri-dark",
        }
    }
}

/// GNOME `picture-options` value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PictureOptions {
    Spanned,
    Wallpaper,
    #[default]
    Zoom,
    None,
    Centered,
    Scaled,
    Stretched,
}

impl PictureOptions {
    /// All accepted values, in documentation order.
    pub const ALL: [Self; 7] = [
        Self::Spanned,
        Self::Wallpaper,
        Self::Zoom,
        Self::None,
        Self::Centered,
        Self::Scaled,
        Self::Stretched,
    ];

    /// Returns the value passed to `gsettings`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spanned => "spanned",
            Self::Wallpaper => "wallpaper",
            Self::Zoom => "zoom",
            Self::None => "none",
            Self::Centered => "centered",
            Self::Scaled => "scaled",
            Self::Stretched => "stretched",
        }
    }
}

/// Validated service-specific settings.
///
/// Each variant only carries the fields that mean something for that service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "service", rename_all = "lowercase")]
pub enum ServiceSettings {
    /// Single image through `gsettings`.
    GSettings {
        color_theme: ColorTheme,
        picture_options: PictureOptions,
    },
    /// Left/right images through hydrapaper.
    Hydrapaper {
        /// Alternate which side changes every half interval.
        stagger: bool,
    },
}

impl ServiceSettings {
    /// Returns which service is active.
    #[must_use]
    pub const fn kind(&self) -> ServiceKind {
        match self {
            Self::GSettings { .. } => ServiceKind::GSettings,
            Self::Hydrapaper { .. } => ServiceKind::Hydrapaper,
        }
    }
}

/// Monitor slot an image folder list is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonitorRole {
    #[serde(rename = "one_monitor")]
    Single,
    #[serde(rename = "left_monitor")]
    Left,
    #[serde(rename = "right_monitor")]
    Right,
}

impl MonitorRole {
    /// Key under `image_folders` in the configuration file.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Single => "one_monitor",
            Self::Left => "left_monitor",
            Self::Right => "right_monitor",
        }
    }

    /// Human-readable label for log messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "one monitor",
            Self::Left => "left monitor",
            Self::Right => "right monitor",
        }
    }

    /// Roles that must resolve to at least one image for `service`.
    #[must_use]
    pub const fn required_for(service: ServiceKind) -> &'static [Self] {
        match service {
            ServiceKind::GSettings => &[Self::Single],
            ServiceKind::Hydrapaper => &[Self::Left, Self::Right],
        }
    }
}

impl std::fmt::Display for MonitorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.key()) }
}

/// Validated configuration, ready for the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Active service and its options.
    #[serde(flatten)]
    pub service: ServiceSettings,

    /// Seconds between switches, never below [`MIN_SWITCH_SECS`].
    pub switch_interval_secs: u64,

    /// Directory all image sub-folders are resolved against.
    pub image_parent_directory: PathBuf,

    /// Validated image files per required monitor role.
    pub image_sets: BTreeMap<MonitorRole, Vec<PathBuf>>,
}

impl Settings {
    /// Returns the switch interval as a duration.
    #[must_use]
    pub const fn switch_interval(&self) -> Duration { Duration::from_secs(self.switch_interval_secs) }

    /// Returns the images for `role`, or an empty slice if the role is unused.
    #[must_use]
    pub fn images(&self, role: MonitorRole) -> &[PathBuf] {
        self.image_sets.get(&role).map_or(&[], Vec::as_slice)
    }

    /// Returns the parent image directory.
    #[must_use]
    pub fn parent_directory(&self) -> &Path { &self.image_parent_directory }
}

/// A configuration problem that prevents the scheduler from running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalIssue {
    /// The configuration root is not a JSON object.
    #[error("configuration root must be a JSON object")]
    NotAnObject,
    /// `service` is missing.
    #[error("'service' field is missing")]
    MissingService,
    /// `service` is not a known value.
    #[error("'service' should be either 'gsettings' or 'hydrapaper', got {0}")]
    UnknownService(String),
    /// `image_parent_directory` is missing or not a string.
    #[error("'image_parent_directory' field is missing")]
    MissingParentDirectory,
    /// `image_parent_directory` is not absolute or does not name an existing directory.
    #[error("invalid parent folder '{0}'")]
    InvalidParentDirectory(String),
    /// `image_folders` is missing or not an object.
    #[error("'image_folders' sub dictionary is missing")]
    MissingImageFolders,
    /// A required role list is missing or not an array.
    #[error("'{0}' list is missing")]
    MissingRole(MonitorRole),
    /// A required role resolved to zero valid images.
    #[error("no valid images in {} folders", .0.label())]
    NoValidImages(MonitorRole),
}

/// Errors returned by [`crate::config::load`].
#[derive(Debug, Error)]
pub enum FatalError {
    /// The configuration file could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON.
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration is well-formed JSON but unusable.
    #[error("Invalid configuration: {}", join_issues(.0))]
    Invalid(Vec<FatalIssue>),
}

impl FatalError {
    /// Returns the validation issues, if this is a validation failure.
    #[must_use]
    pub fn issues(&self) -> &[FatalIssue] {
        match self {
            Self::Invalid(issues) => issues,
            Self::Io(_) | Self::Parse(_) => &[],
        }
    }
}

fn join_issues(issues: &[FatalIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Folder lists per monitor role, as written in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImageFolders {
    /// Sub-folders used by `gsettings` (single image).
    pub one_monitor: Vec<String>,

    /// Sub-folders for the left monitor (hydrapaper).
    pub left_monitor: Vec<String>,

    /// Sub-folders for the right monitor (hydrapaper).
    pub right_monitor: Vec<String>,
}

impl Default for ImageFolders {
    fn default() -> Self {
        Self {
            one_monitor: vec!["gnome".to_string()],
            left_monitor: vec!["folder1".to_string(), "folder2".to_string()],
            right_monitor: vec!["folder1".to_string(), "folder2".to_string()],
        }
    }
}

/// Documented shape of `config.json`.
///
/// Booleans and the interval are written as strings, matching what users have
/// in existing files; validation accepts both strings and native JSON values.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConfigFile {
    /// Wallpaper backend: "gsettings" or "hydrapaper".
    pub service: ServiceKind,

    /// gsettings `picture-options` value.
    pub gsettings_mode: PictureOptions,

    /// Which GNOME wallpaper key to set: "light" or "dark".
    pub gnome_color_theme: ColorTheme,

    /// "true" to alternate left/right switches every half interval.
    pub hydrapaper_stagger: String,

    /// Seconds between switches (minimum 5).
    pub switch_time: String,

    /// Directory containing the image sub-folders. `~` is expanded.
    pub image_parent_directory: String,

    /// Sub-folders of `image_parent_directory` per monitor.
    pub image_folders: ImageFolders,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            service: ServiceKind::GSettings,
            gsettings_mode: PictureOptions::Zoom,
            gnome_color_theme: ColorTheme::Dark,
            hydrapaper_stagger: "true".to_string(),
            switch_time: DEFAULT_SWITCH_SECS.to_string(),
            image_parent_directory: "/usr/share/backgrounds/".to_string(),
            image_folders: ImageFolders::default(),
        }
    }
}
