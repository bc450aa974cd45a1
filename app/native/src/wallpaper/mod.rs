//! Wallpaper discovery, compositing, desktop backends and the display loops.

pub mod backend;
pub mod composite;
pub mod cycle;
pub mod images;
pub mod scheduler;

pub use backend::{BackendError, CommandDesktop, Desktop};
pub use composite::{CompositeError, ScreenSize, compose_side_by_side};
pub use cycle::ImageCycle;
pub use scheduler::{Exit, Scheduler};
