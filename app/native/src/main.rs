//! wallswitch - cycle desktop wallpapers on a timer.
//!
//! With no subcommand the binary runs the cycler; subcommands validate,
//! list or scaffold the configuration.

fn main() {
    if let Err(err) = wallswitch_lib::cli::run() {
        eprintln!("wallswitch: {err}");
        std::process::exit(1);
    }
}
