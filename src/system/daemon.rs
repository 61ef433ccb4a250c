//! Background detachment
//!
//! Classic double fork: the first child calls setsid to shed the
//! controlling terminal, and the second can never reacquire one. The
//! working directory and standard streams are left alone so relative
//! paths in post-processing scripts keep working and stray output stays
//! visible wherever the launching shell sends it.

#[cfg(unix)]
use nix::sys::stat::{umask, Mode};
#[cfg(unix)]
use nix::unistd::{fork, setsid, ForkResult};
#[cfg(unix)]
use tracing::debug;

use crate::error::{GridWatchError, Result};

/// Detach the current process into the background.
///
/// Returns only in the final detached child; the intermediate parents
/// exit with status 0 so the launching shell gets its prompt back.
/// Must run before anything spawns threads, in particular before the
/// HTTP client is built.
#[cfg(unix)]
pub fn daemonize() -> Result<()> {
    match unsafe { fork() } {
        Ok(ForkResult::Parent { .. }) => std::process::exit(0),
        Ok(ForkResult::Child) => {}
        Err(e) => return Err(GridWatchError::Daemonize(format!("first fork failed: {}", e))),
    }

    setsid().map_err(|e| GridWatchError::Daemonize(format!("setsid failed: {}", e)))?;
    umask(Mode::empty());

    match unsafe { fork() } {
        Ok(ForkResult::Parent { .. }) => std::process::exit(0),
        Ok(ForkResult::Child) => {}
        Err(e) => return Err(GridWatchError::Daemonize(format!("second fork failed: {}", e))),
    }

    debug!(pid = std::process::id(), "detached into background");
    Ok(())
}

/// Detachment is unavailable off unix; run with `--foreground` instead.
#[cfg(not(unix))]
pub fn daemonize() -> Result<()> {
    Err(GridWatchError::Daemonize(
        "background detachment is only supported on unix".to_string(),
    ))
}
