//! CLI command definitions using Clap.
//!
//! This module defines all CLI commands and their arguments, organized into
//! domain-specific submodules:
//!
//! - `config_cmd` - Configuration file management commands
//! - `images` - Validation and image listing commands

use std::io;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::app;
use crate::config::template::generate_schema;
use crate::constants::{APP_NAME, DIR_ENV_VAR};
use crate::error::WallswitchError;
use crate::logging::init_tracing;
use crate::workspace::Workspace;

pub mod config_cmd;
pub mod images;

pub use config_cmd::ConfigCommands;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// wallswitch - Cycle desktop wallpapers on a timer.
#[derive(Parser, Debug)]
#[command(name = "wallswitch")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding config.json, errors.log and the composite image.
    ///
    /// Defaults to the directory containing the wallswitch executable.
    #[arg(long, short, global = true, env = DIR_ENV_VAR, value_name = "PATH")]
    pub dir: Option<String>,

    /// Increase diagnostic output (-v for debug, -vv for trace).
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Run the wallpaper cycler (default).
    ///
    /// Validates the configuration, then switches wallpapers until interrupted
    /// with Ctrl-C or SIGTERM. Editing the configuration file while running
    /// reloads it after the current switch.
    Run,

    /// Validate the configuration and print the effective settings.
    ///
    /// Exits with a non-zero status when the configuration cannot be used.
    Check,

    /// List the images each monitor would cycle through.
    List,

    /// Configuration file management commands.
    ///
    /// Initialize and locate the configuration file.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output the configuration file JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// configuration file. Can be redirected to a file for use with editors
    /// that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    /// Can be used with eval or redirected to a file.
    ///
    /// Usage:
    ///   eval "$(wallswitch completions --shell zsh)"
    ///   wallswitch completions --shell bash > ~/.local/share/bash-completion/completions/wallswitch
    ///   wallswitch completions --shell fish > ~/.config/fish/completions/wallswitch.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the workspace selected by `--dir` / `WALLSWITCH_DIR`.
    #[must_use]
    pub fn workspace(&self) -> Workspace { Workspace::resolve(self.dir.as_deref()) }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), WallswitchError> {
        init_tracing(self.verbose);
        let workspace = self.workspace();

        match self.command.as_ref().unwrap_or(&Commands::Run) {
            Commands::Run => app::run(&workspace),
            Commands::Check => images::check(&workspace),
            Commands::List => images::list(&workspace),
            Commands::Config(cmd) => config_cmd::execute(cmd, &workspace),

            Commands::Schema => {
                let schema = serde_json::to_string_pretty(&generate_schema())?;
                println!("{schema}");
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, APP_NAME, &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // CLI parsing tests
    // ========================================================================

    #[test]
    fn test_cli_defaults_to_run() {
        let cli = Cli::try_parse_from(["wallswitch"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::try_parse_from(["wallswitch", "run"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Run)));
    }

    #[test]
    fn test_cli_parses_check_and_list() {
        let cli = Cli::try_parse_from(["wallswitch", "check"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Check)));

        let cli = Cli::try_parse_from(["wallswitch", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_cli_parses_schema() {
        let cli = Cli::try_parse_from(["wallswitch", "schema"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Schema)));
    }

    #[test]
    fn test_cli_parses_completions_bash() {
        let cli = Cli::try_parse_from(["wallswitch", "completions", "--shell", "bash"]).unwrap();
        match cli.command {
            Some(Commands::Completions { shell }) => assert_eq!(shell, Shell::Bash),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_parses_completions_fish() {
        let cli = Cli::try_parse_from(["wallswitch", "completions", "-s", "fish"]).unwrap();
        match cli.command {
            Some(Commands::Completions { shell }) => assert_eq!(shell, Shell::Fish),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_parses_config_init_flags() {
        let cli = Cli::try_parse_from(["wallswitch", "config", "init", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Config(ConfigCommands::Init { force, stdout, path })) => {
                assert!(force);
                assert!(!stdout);
                assert!(path.is_none());
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_cli_parses_config_path() {
        let cli = Cli::try_parse_from(["wallswitch", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config(ConfigCommands::Path))));
    }

    // ========================================================================
    // global flags
    // ========================================================================

    #[test]
    fn test_cli_parses_dir_flag_anywhere() {
        let cli = Cli::try_parse_from(["wallswitch", "--dir", "/srv/walls", "check"]).unwrap();
        assert_eq!(cli.dir.as_deref(), Some("/srv/walls"));

        let cli = Cli::try_parse_from(["wallswitch", "check", "-d", "/srv/walls"]).unwrap();
        assert_eq!(cli.workspace().dir(), std::path::Path::new("/srv/walls"));
    }

    #[test]
    fn test_cli_counts_verbose_flags() {
        let cli = Cli::try_parse_from(["wallswitch", "-vv", "run"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["wallswitch", "reload"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() { Cli::command().debug_assert(); }

    // ========================================================================
    // APP_VERSION constant test
    // ========================================================================

    #[test]
    fn test_app_version_format() {
        assert!(
            APP_VERSION.split('.').count() >= 2,
            "Version should have at least major.minor"
        );
    }
}
