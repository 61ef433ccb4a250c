//! Configuration module for GridWatch
//!
//! Provides configuration management including CLI arguments,
//! the notification settings file, and runtime settings.

mod file;
mod settings;

pub use file::*;
pub use settings::*;
