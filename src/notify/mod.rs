//! Push notification module
//!
//! Composes the completion message and delivers it through the
//! configured push service (Prowl or Pushover).

mod dispatcher;
mod message;
mod prowl;
mod pushover;

pub use dispatcher::*;
pub use message::*;
pub use prowl::*;
pub use pushover::*;
