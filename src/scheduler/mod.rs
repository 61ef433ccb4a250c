//! Batch scheduler integration module
//!
//! Provides job submission, acknowledgement parsing, and queue
//! listing against Grid Engine style schedulers.

mod ack;
mod queue;
mod submit;

pub use ack::*;
pub use queue::*;
pub use submit::*;
