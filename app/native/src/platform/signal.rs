//! Interruptible waiting.
//!
//! The cycler sleeps on a channel instead of `thread::sleep`, so an operator
//! interrupt (SIGINT/SIGTERM) ends a wait immediately. A named helper thread owns
//! the `signal-hook` iterator and forwards each signal onto the channel.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

/// Result of a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full duration passed.
    Elapsed,
    /// A cancellation request arrived before the duration passed.
    Interrupted,
}

/// Blocking suspension that can be cut short by a cancellation request.
pub trait Waiter {
    /// Blocks for `duration` or until interrupted.
    fn wait(&mut self, duration: Duration) -> WaitOutcome;
}

/// Waiter driven by process signals.
#[derive(Debug)]
pub struct Interrupt {
    rx: Receiver<i32>,
}

impl Interrupt {
    /// Registers SIGINT and SIGTERM handlers and starts the forwarding thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the handlers cannot be registered or the thread
    /// cannot be spawned.
    pub fn install() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        let (tx, rx) = mpsc::channel();

        thread::Builder::new().name("wallswitch-signals".to_string()).spawn(move || {
            for signal in signals.forever() {
                tracing::debug!(signal, "received signal");
                if tx.send(signal).is_err() {
                    break;
                }
            }
        })?;

        Ok(Self { rx })
    }

    /// Builds a waiter from an existing channel. Any value sent interrupts.
    #[must_use]
    pub const fn from_receiver(rx: Receiver<i32>) -> Self { Self { rx } }
}

impl Waiter for Interrupt {
    fn wait(&mut self, duration: Duration) -> WaitOutcome {
        match self.rx.recv_timeout(duration) {
            Ok(_) => WaitOutcome::Interrupted,
            Err(RecvTimeoutError::Timeout) => WaitOutcome::Elapsed,
            Err(RecvTimeoutError::Disconnected) => {
                // Nobody can interrupt any more; still honour the delay.
                thread::sleep(duration);
                WaitOutcome::Elapsed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_wait_elapses_without_signal() {
        let (_tx, rx) = mpsc::channel();
        let mut interrupt = Interrupt::from_receiver(rx);
        assert_eq!(interrupt.wait(Duration::from_millis(10)), WaitOutcome::Elapsed);
    }

    #[test]
    fn test_wait_returns_early_when_interrupted() {
        let (tx, rx) = mpsc::channel();
        let mut interrupt = Interrupt::from_receiver(rx);
        tx.send(SIGINT).unwrap();

        let started = Instant::now();
        assert_eq!(interrupt.wait(Duration::from_secs(30)), WaitOutcome::Interrupted);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_wait_after_sender_dropped_still_sleeps() {
        let (tx, rx) = mpsc::channel::<i32>();
        drop(tx);
        let mut interrupt = Interrupt::from_receiver(rx);

        let started = Instant::now();
        assert_eq!(interrupt.wait(Duration::from_millis(20)), WaitOutcome::Elapsed);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
