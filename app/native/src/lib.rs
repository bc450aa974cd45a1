//! wallswitch - cycle desktop wallpapers on a timer.
//!
//! Images come from sub-folders of one parent directory. A single image is
//! set through GNOME `gsettings`; a left/right pair is set through hydrapaper.
//! The configuration file is re-validated whenever it changes on disk.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod platform;
pub mod wallpaper;
pub mod workspace;
