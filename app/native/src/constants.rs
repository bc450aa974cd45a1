//! Application-wide constants.

/// Binary and log target name.
pub const APP_NAME: &str = "wallswitch";

/// Configuration file name inside the workspace directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Diagnostic log file name inside the workspace directory.
pub const LOG_FILE_NAME: &str = "errors.log";

/// Side-by-side composite written in dual-monitor mode.
pub const COMPOSITE_FILE_NAME: &str = ".joined_file.jpg";

/// Environment variable overriding the workspace directory.
pub const DIR_ENV_VAR: &str = "WALLSWITCH_DIR";

/// Colon-separated extra directories searched for external binaries.
pub const EXTRA_PATHS_ENV_VAR: &str = "WALLSWITCH_EXTRA_PATHS";

/// Human-readable timestamp format used in the run log.
pub const TIMESTAMP_FORMAT: &str = "%a %b %d @ %-I:%M:%S %p";

/// Hint appended whenever a configuration field is missing entirely.
pub const REGENERATE_HINT: &str =
    "To make a new config file, delete the existing one and a default one will be automatically generated";
