//! Config CLI commands.
//!
//! Commands for managing the wallswitch configuration file.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::template::{create_config_file, generate_config_template};
use crate::error::WallswitchError;
use crate::workspace::Workspace;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Write a configuration file with the default values.
    ///
    /// The cycler also creates this file on first run; use this command to
    /// reset an existing file or to write one somewhere else.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  wallswitch config init                       # Create config in the workspace directory
  wallswitch config init --force               # Overwrite existing config
  wallswitch config init --path ~/walls.json   # Create at custom path
  wallswitch config init --stdout              # Print template to stdout"#
    )]
    Init {
        /// Overwrite existing configuration file if it exists.
        #[arg(long, short)]
        force: bool,

        /// Custom path for the configuration file.
        /// If not specified, uses config.json in the workspace directory.
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the configuration template to stdout instead of writing to a file.
        #[arg(long, conflicts_with_all = ["force", "path"])]
        stdout: bool,
    },

    /// Show where wallswitch reads and writes its files.
    Path,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cmd: &ConfigCommands, workspace: &Workspace) -> Result<(), WallswitchError> {
    match cmd {
        ConfigCommands::Init { force, path, stdout } => {
            if *stdout {
                print_config_template()
            } else {
                let target = path.clone().unwrap_or_else(|| workspace.config_file());
                init_config(*force, &target)
            }
        }
        ConfigCommands::Path => {
            show_paths(workspace);
            Ok(())
        }
    }
}

/// Print the configuration template to stdout.
fn print_config_template() -> Result<(), WallswitchError> {
    print!("{}", generate_config_template()?);
    Ok(())
}

/// Write a new configuration file at `config_path`.
fn init_config(force: bool, config_path: &std::path::Path) -> Result<(), WallswitchError> {
    if config_path.exists() && !force {
        return Err(WallswitchError::ConfigError(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        )));
    }

    create_config_file(config_path).map_err(|e| {
        WallswitchError::ConfigError(format!(
            "Failed to create config file {}: {e}",
            config_path.display()
        ))
    })?;

    println!("Configuration file created at: {}", config_path.display());
    println!("\nEdit 'image_parent_directory' and 'image_folders' to point at your wallpapers.");

    Ok(())
}

/// Print the workspace file locations.
fn show_paths(workspace: &Workspace) {
    let marker = |exists: bool| if exists { " (exists)" } else { "" };
    let config = workspace.config_file();
    let log = workspace.log_file();

    println!("Workspace: {}\n", workspace.dir().display());
    println!("  config:    {}{}", config.display(), marker(config.exists()));
    println!("  log:       {}{}", log.display(), marker(log.exists()));
    println!("  composite: {}", workspace.composite_file().display());

    if !config.exists() {
        println!("\nNo configuration file found.");
        println!("Run 'wallswitch config init' to create one.");
    }
}
