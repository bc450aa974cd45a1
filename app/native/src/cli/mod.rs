//! CLI module for wallswitch.
//!
//! Running `wallswitch` with no subcommand starts the cycler; the other
//! subcommands inspect or scaffold the configuration without starting it.

mod commands;
mod output;

use clap::Parser;
pub use commands::{Cli, Commands, ConfigCommands};

use crate::error::WallswitchError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), WallswitchError> {
    let cli = Cli::parse();
    cli.execute()
}
