//! Core monitoring module
//!
//! Provides the completion-monitoring state machine and the
//! elapsed-time formatting used in notifications.

mod monitor;
mod timefmt;

pub use monitor::*;
pub use timefmt::*;
