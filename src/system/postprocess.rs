//! Post-processing hooks
//!
//! After the watched jobs finish, each submitted script `DIR/BASE` may
//! have a companion `DIR/process_BASE` that runs before the notification
//! goes out. Companions run in submission order.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use crate::scheduler::SubmittedJob;

/// Prefix that marks a script's post-processing companion.
pub const PROCESS_PREFIX: &str = "process_";

/// Companion script path for a submitted script.
///
/// `work/align.sh` maps to `work/process_align.sh`. Returns `None` when
/// the script path has no file name to prefix.
pub fn companion_path(script: &Path) -> Option<PathBuf> {
    let name = script.file_name()?;
    let mut companion = OsString::from(PROCESS_PREFIX);
    companion.push(name);
    Some(script.with_file_name(companion))
}

/// Run each submitted script's companion, in submission order.
///
/// A missing companion logs `No post-processing script found` and is
/// skipped; one that cannot be started or exits nonzero is logged and
/// does not stop the remaining ones. Returns true when at least one
/// companion ran.
pub fn run_companions(jobs: &[SubmittedJob]) -> bool {
    let mut ran = false;
    for job in jobs {
        let companion = match companion_path(&job.script) {
            Some(path) => path,
            None => continue,
        };
        if !companion.is_file() {
            info!("No post-processing script found: {}", companion.display());
            continue;
        }

        info!(script = %companion.display(), "running post-processing script");
        match Command::new(&companion).status() {
            Ok(status) if status.success() => ran = true,
            Ok(status) => {
                warn!(script = %companion.display(), %status, "post-processing script failed");
                ran = true;
            }
            Err(e) => {
                warn!(script = %companion.display(), error = %e, "could not run post-processing script");
            }
        }
    }
    ran
}
