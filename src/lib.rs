//! Chart digitizer: calibrate image axes, pick samples, map them to data space.
//!
//! The core (`types`, `zoom`, `samples`, `geometry`, `session`) has no UI
//! dependency beyond the `egui::Pos2` conversion; `app` is the eframe shell.

pub mod app;
pub mod config;
pub mod export;
pub mod geometry;
pub mod image;
pub mod prefs;
pub mod samples;
pub mod session;
pub mod types;
pub mod zoom;
