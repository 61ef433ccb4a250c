//! System integration module
//!
//! Provides process detachment, login user lookup, and the
//! post-processing hooks that run after job completion.

mod daemon;
mod postprocess;
mod user;

pub use daemon::*;
pub use postprocess::*;
pub use user::*;
