//! Display scheduling loops.
//!
//! [`Scheduler::run`] drives one of two modes depending on the configured
//! service and returns only when the configuration file changed or the
//! process was interrupted. Backend and compositing failures are logged and
//! the loop carries on.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use super::backend::Desktop;
use super::composite::{ScreenSize, compose_side_by_side};
use super::cycle::ImageCycle;
use crate::config::{ChangeProbe, ColorTheme, MonitorRole, PictureOptions, ServiceSettings, Settings};
use crate::logging::DiagnosticLog;
use crate::platform::{WaitOutcome, Waiter};

/// Why a scheduling loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The configuration file changed and must be reloaded.
    ConfigChanged,
    /// An interrupt arrived during a wait.
    Interrupted,
}

/// Runs the wallpaper loops against a desktop backend.
#[derive(Debug)]
pub struct Scheduler<D, W, P, R> {
    desktop: D,
    waiter: W,
    probe: P,
    rng: R,
    log: DiagnosticLog,
    composite: Option<(PathBuf, ScreenSize)>,
}

impl<D, W, P, R> Scheduler<D, W, P, R>
where
    D: Desktop,
    W: Waiter,
    P: ChangeProbe,
    R: Rng,
{
    /// Creates a scheduler. No composite is written until [`Self::with_composite`] is used.
    pub const fn new(desktop: D, waiter: W, probe: P, rng: R, log: DiagnosticLog) -> Self {
        Self { desktop, waiter, probe, rng, log, composite: None }
    }

    /// Writes a side-by-side composite to `path` on every dual-monitor step.
    #[must_use]
    pub fn with_composite(mut self, path: impl Into<PathBuf>, screen: ScreenSize) -> Self {
        self.composite = Some((path.into(), screen));
        self
    }

    /// Returns the desktop backend.
    pub const fn desktop(&self) -> &D { &self.desktop }

    /// Runs the loop selected by `settings` until it exits.
    pub fn run(&mut self, settings: &Settings) -> Exit {
        let interval = settings.switch_interval();

        match settings.service {
            ServiceSettings::GSettings { color_theme, picture_options } => self.run_single(
                color_theme,
                picture_options,
                settings.images(MonitorRole::Single),
                interval,
            ),
            ServiceSettings::Hydrapaper { stagger } => self.run_dual(
                settings.images(MonitorRole::Left),
                settings.images(MonitorRole::Right),
                stagger,
                interval,
            ),
        }
    }

    /// Waits for `duration`, then reports an interrupt or a configuration change.
    ///
    /// Returns `None` when the loop should keep going.
    pub fn idle(&mut self, duration: Duration) -> Option<Exit> {
        if self.waiter.wait(duration) == WaitOutcome::Interrupted {
            self.log.note("Keyboard interrupt detected, terminating program...");
            return Some(Exit::Interrupted);
        }

        self.probe.check().then_some(Exit::ConfigChanged)
    }

    fn run_single(
        &mut self,
        theme: ColorTheme,
        options: PictureOptions,
        images: &[PathBuf],
        interval: Duration,
    ) -> Exit {
        tracing::info!(images = images.len(), ?interval, "starting single-image cycle");
        let mut order = images.to_vec();

        loop {
            if let Err(err) = self.desktop.apply_picture_options(options) {
                self.log.error(&format!("failed to set picture options: {err}"));
            }
            order.shuffle(&mut self.rng);

            if order.is_empty() {
                if let Some(exit) = self.idle(interval) {
                    return exit;
                }
                continue;
            }

            for image in &order {
                if let Err(err) = self.desktop.show_single(theme, image) {
                    self.log.error(&format!("failed to set wallpaper {}: {err}", image.display()));
                }
                if let Some(exit) = self.idle(interval) {
                    return exit;
                }
            }
        }
    }

    fn run_dual(
        &mut self,
        left_images: &[PathBuf],
        right_images: &[PathBuf],
        stagger: bool,
        interval: Duration,
    ) -> Exit {
        tracing::info!(
            left = left_images.len(),
            right = right_images.len(),
            stagger,
            ?interval,
            "starting dual-image cycle"
        );

        let mut left = ImageCycle::new(left_images.to_vec(), &mut self.rng);
        let mut right = ImageCycle::new(right_images.to_vec(), &mut self.rng);
        let mut rights_turn = true;

        loop {
            if let (Some(l), Some(r)) = (left.current(), right.current()) {
                self.show_pair(l, r);
            }

            let wait = if stagger {
                if rights_turn {
                    right.advance(&mut self.rng);
                } else {
                    left.advance(&mut self.rng);
                }
                rights_turn = !rights_turn;
                interval / 2
            } else {
                left.advance(&mut self.rng);
                right.advance(&mut self.rng);
                interval
            };

            if let Some(exit) = self.idle(wait) {
                return exit;
            }
        }
    }

    fn show_pair(&mut self, left: &Path, right: &Path) {
        if let Some((output, screen)) = &self.composite
            && let Err(err) = compose_side_by_side(left, right, *screen, output)
        {
            self.log.error(&format!("failed to join images: {err}"));
        }

        if let Err(err) = self.desktop.show_pair(left, right) {
            self.log.error(&format!("failed to set monitor wallpapers: {err}"));
        }
    }
}


#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    use super::testing::{Call, RecordingDesktop, ScriptedProbe, ScriptedWaiter};
    use super::*;
    use crate::logging::testing::CapturedLog;

    fn images(prefix: &str, n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("/walls/{prefix}{i}.png"))).collect()
    }

    fn single_settings(count: usize) -> Settings {
        Settings {
            service: ServiceSettings::GSettings {
                color_theme: ColorTheme::Dark,
                picture_options: PictureOptions::Spanned,
            },
            switch_interval_secs: 5,
            image_parent_directory: PathBuf::from("/walls"),
            image_sets: BTreeMap::from([(MonitorRole::Single, images("s", count))]),
        }
    }

    fn dual_settings(stagger: bool, count: usize) -> Settings {
        Settings {
            service: ServiceSettings::Hydrapaper { stagger },
            switch_interval_secs: 10,
            image_parent_directory: PathBuf::from("/walls"),
            image_sets: BTreeMap::from([
                (MonitorRole::Left, images("l", count)),
                (MonitorRole::Right, images("r", count)),
            ]),
        }
    }

    fn scheduler(
        waiter: ScriptedWaiter,
        probe: ScriptedProbe,
        log: &CapturedLog,
    ) -> Scheduler<RecordingDesktop, ScriptedWaiter, ScriptedProbe, StdRng> {
        Scheduler::new(
            RecordingDesktop::default(),
            waiter,
            probe,
            StdRng::seed_from_u64(42),
            log.log.clone(),
        )
    }

    // ========================================================================
    // single-image mode
    // ========================================================================

    #[test]
    fn test_single_mode_shows_each_image_per_round() {
        let captured = CapturedLog::new();
        let mut sched = scheduler(ScriptedWaiter::interrupt_after(6), ScriptedProbe::never(), &captured);

        assert_eq!(sched.run(&single_settings(3)), Exit::Interrupted);

        let calls = &sched.desktop().calls;
        assert_eq!(calls[0], Call::Options(PictureOptions::Spanned));
        assert_eq!(calls[4], Call::Options(PictureOptions::Spanned));

        let singles = sched.desktop().singles();
        assert_eq!(singles.len(), 7);
        let first_round: BTreeSet<_> = singles[..3].iter().cloned().collect();
        let second_round: BTreeSet<_> = singles[3..6].iter().cloned().collect();
        assert_eq!(first_round, images("s", 3).into_iter().collect());
        assert_eq!(second_round, first_round);
        assert!(calls.iter().all(|c| !matches!(c, Call::Single(theme, _) if *theme != ColorTheme::Dark)));
    }

    #[test]
    fn test_single_mode_waits_full_interval() {
        let captured = CapturedLog::new();
        let mut sched = scheduler(ScriptedWaiter::interrupt_after(2), ScriptedProbe::never(), &captured);
        sched.run(&single_settings(2));

        assert!(sched.waiter.waits.iter().all(|d| *d == Duration::from_secs(5)));
    }

    #[test]
    fn test_single_mode_stops_on_config_change() {
        let captured = CapturedLog::new();
        let mut sched = scheduler(ScriptedWaiter::interrupt_after(100), ScriptedProbe::change_on(2), &captured);

        assert_eq!(sched.run(&single_settings(4)), Exit::ConfigChanged);
        assert_eq!(sched.desktop().singles().len(), 2);
        assert_eq!(sched.probe.checks, 2);
    }

    #[test]
    fn test_interrupt_is_logged() {
        let captured = CapturedLog::new();
        let mut sched = scheduler(ScriptedWaiter::interrupt_after(0), ScriptedProbe::never(), &captured);

        assert_eq!(sched.run(&single_settings(1)), Exit::Interrupted);
        assert_eq!(captured.lines(), vec!["Keyboard interrupt detected, terminating program..."]);
        assert_eq!(sched.probe.checks, 0);
    }

    #[test]
    fn test_backend_failures_are_logged_and_loop_continues() {
        let captured = CapturedLog::new();
        let mut sched = scheduler(ScriptedWaiter::interrupt_after(2), ScriptedProbe::never(), &captured);
        sched.desktop.fail = true;

        assert_eq!(sched.run(&single_settings(2)), Exit::Interrupted);
        assert_eq!(sched.desktop().singles().len(), 3);

        let lines = captured.lines();
        assert!(lines.iter().any(|l| l.starts_with("ERROR: failed to set picture options")));
        assert_eq!(lines.iter().filter(|l| l.starts_with("ERROR: failed to set wallpaper")).count(), 3);
    }

    // ========================================================================
    // dual-image mode
    // ========================================================================

    #[test]
    fn test_synchronized_mode_advances_both_sides() {
        let captured = CapturedLog::new();
        let mut sched = scheduler(ScriptedWaiter::interrupt_after(3), ScriptedProbe::never(), &captured);

        assert_eq!(sched.run(&dual_settings(false, 50)), Exit::Interrupted);

        let pairs = sched.desktop().pairs();
        assert_eq!(pairs.len(), 4);
        for window in pairs.windows(2) {
            assert_ne!(window[0].0, window[1].0);
            assert_ne!(window[0].1, window[1].1);
        }
        assert!(sched.waiter.waits.iter().all(|d| *d == Duration::from_secs(10)));
    }

    #[test]
    fn test_staggered_mode_alternates_one_side_per_tick() {
        const INTERVALS: usize = 4;
        let captured = CapturedLog::new();
        let ticks = 2 * INTERVALS;
        let mut sched = scheduler(ScriptedWaiter::interrupt_after(ticks), ScriptedProbe::never(), &captured);

        assert_eq!(sched.run(&dual_settings(true, 50)), Exit::Interrupted);

        let pairs = sched.desktop().pairs();
        assert_eq!(pairs.len(), ticks + 1);

        let mut left_changes = 0;
        let mut right_changes = 0;
        for (tick, window) in pairs.windows(2).enumerate() {
            let left_changed = window[0].0 != window[1].0;
            let right_changed = window[0].1 != window[1].1;
            assert!(left_changed ^ right_changed, "exactly one side changes per tick");
            assert_eq!(right_changed, tick % 2 == 0, "right side goes first");
            left_changes += usize::from(left_changed);
            right_changes += usize::from(right_changed);
        }
        assert_eq!(left_changes, INTERVALS);
        assert_eq!(right_changes, INTERVALS);
        assert!(sched.waiter.waits.iter().all(|d| *d == Duration::from_secs(5)));
    }

    #[test]
    fn test_dual_mode_wraps_short_lists() {
        let captured = CapturedLog::new();
        let mut sched = scheduler(ScriptedWaiter::interrupt_after(9), ScriptedProbe::never(), &captured);
        sched.run(&dual_settings(false, 2));

        let pairs = sched.desktop().pairs();
        assert_eq!(pairs.len(), 10);
        let lefts: BTreeSet<_> = pairs.iter().map(|(l, _)| l.clone()).collect();
        assert_eq!(lefts, images("l", 2).into_iter().collect());
    }

    #[test]
    fn test_dual_mode_composite_failure_is_logged() {
        let captured = CapturedLog::new();
        let dir = TempDir::new().unwrap();
        let mut sched = scheduler(ScriptedWaiter::interrupt_after(0), ScriptedProbe::never(), &captured)
            .with_composite(dir.path().join(".joined_file.jpg"), ScreenSize { width: 4, height: 4 });

        sched.run(&dual_settings(false, 1));

        let lines = captured.lines();
        assert!(lines[0].starts_with("ERROR: failed to join images: Failed to read image"));
        assert_eq!(sched.desktop().pairs().len(), 1);
    }

    #[test]
    fn test_idle_reports_config_change() {
        let captured = CapturedLog::new();
        let mut sched = scheduler(ScriptedWaiter::interrupt_after(5), ScriptedProbe::change_on(2), &captured);

        assert_eq!(sched.idle(Duration::from_secs(5)), None);
        assert_eq!(sched.idle(Duration::from_secs(5)), Some(Exit::ConfigChanged));
    }
}
