//! Platform helpers: path expansion, binary lookup and signal-aware waiting.

pub mod command;
pub mod path;
pub mod signal;

pub use signal::{Interrupt, WaitOutcome, Waiter};
