//! Top-level run loop.
//!
//! Validates the configuration, hands valid settings to the scheduler and
//! reloads whenever the scheduler reports a change. While the configuration
//! is unusable the runner idles and keeps polling the file.

use std::path::Path;
use std::time::Duration;

use rand::Rng;

use crate::config::{self, ChangeProbe, ConfigWatcher, FatalError, MIN_SWITCH_SECS, Settings};
use crate::error::WallswitchError;
use crate::logging::{DiagnosticLog, timestamp};
use crate::platform::{Interrupt, Waiter};
use crate::wallpaper::{CommandDesktop, Desktop, Exit, Scheduler, ScreenSize};
use crate::workspace::Workspace;

/// Runs the cycler in `workspace` until interrupted.
///
/// # Errors
///
/// Returns an error if the run log or configuration file cannot be written or
/// read, or if the signal handlers cannot be installed.
pub fn run(workspace: &Workspace) -> Result<(), WallswitchError> {
    let log = DiagnosticLog::create(workspace.log_file())?;
    let config_path = workspace.config_file();
    config::ensure_config_file(&config_path)?;

    tracing::info!(dir = %workspace.dir().display(), "wallswitch starting");

    let interrupt = Interrupt::install()?;
    let watcher = ConfigWatcher::new(&config_path, log.clone());
    let mut scheduler =
        Scheduler::new(CommandDesktop, interrupt, watcher, rand::rng(), log.clone())
            .with_composite(workspace.composite_file(), ScreenSize::full_hd());

    let result = run_loop(&mut scheduler, &config_path, &log);
    log.note(&format!("Stopped running at: {}", timestamp()));
    result.map_err(WallswitchError::from)
}

/// Alternates between validating and scheduling until an interrupt arrives.
///
/// # Errors
///
/// Returns an error only when the configuration file cannot be read.
pub fn run_loop<D, W, P, R>(
    scheduler: &mut Scheduler<D, W, P, R>,
    config_path: &Path,
    log: &DiagnosticLog,
) -> Result<(), FatalError>
where
    D: Desktop,
    W: Waiter,
    P: ChangeProbe,
    R: Rng,
{
    let retry = Duration::from_secs(MIN_SWITCH_SECS);
    let mut settings = load_settings(config_path, log)?;

    loop {
        let exit = match &settings {
            Some(settings) => scheduler.run(settings),
            None => match scheduler.idle(retry) {
                Some(exit) => exit,
                None => continue,
            },
        };

        match exit {
            Exit::Interrupted => return Ok(()),
            Exit::ConfigChanged => settings = load_settings(config_path, log)?,
        }
    }
}

/// Loads settings, turning configuration problems (already logged) into `None`.
fn load_settings(path: &Path, log: &DiagnosticLog) -> Result<Option<Settings>, FatalError> {
    match config::load(path, log) {
        Ok(settings) => Ok(Some(settings)),
        Err(err @ FatalError::Io(_)) => Err(err),
        Err(err) => {
            tracing::warn!(error = %err, "configuration unusable, waiting for changes");
            Ok(None)
        }
    }
}
