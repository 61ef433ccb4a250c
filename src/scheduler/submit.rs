//! Job submission
//!
//! Runs a submission command line, echoes the scheduler's acknowledgement,
//! and parses the job identifier out of it. A program token that is neither
//! absolute nor findable on PATH is rewritten relative to the current
//! working directory, matching how submission scripts are usually launched
//! from inside the job directory.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{GridWatchError, IoResultExt, Result};
use crate::scheduler::ack::SubmissionAck;

/// One successfully submitted job.
#[derive(Debug, Clone)]
pub struct SubmittedJob {
    /// Scheduler-assigned job identifier
    pub id: u64,
    /// Job name from the acknowledgement, if any
    pub label: Option<String>,
    /// Resolved program token of the submission command; the anchor for
    /// locating an optional post-processing script next to it
    pub script: PathBuf,
}

/// Submit one job.
///
/// The command line is split on whitespace and executed directly (no
/// shell). The first stdout line is the scheduler's acknowledgement; it is
/// echoed to stdout when `echo_ack` is set, then parsed. Spawn failures,
/// nonzero exits and missing output are all fatal here, before any
/// detachment happens.
pub fn submit(command_line: &str, echo_ack: bool) -> Result<SubmittedJob> {
    let mut tokens = command_line.split_whitespace();
    let program = tokens
        .next()
        .ok_or_else(|| GridWatchError::submission(command_line, "empty command line"))?;
    let args: Vec<&str> = tokens.collect();

    let resolved = resolve_program(program);
    let output = Command::new(&resolved)
        .args(&args)
        .output()
        .with_path(&resolved)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GridWatchError::submission(
            command_line,
            format!("{} ({})", output.status, stderr.trim()),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let ack_line = stdout
        .lines()
        .next()
        .ok_or_else(|| GridWatchError::submission(command_line, "no acknowledgement output"))?;

    if echo_ack {
        println!("{}", ack_line);
    }

    let ack = SubmissionAck::parse(ack_line)?;
    Ok(SubmittedJob {
        id: ack.id,
        label: ack.label,
        script: resolved,
    })
}

/// Resolve a submission program token into something invokable.
///
/// Absolute paths and programs findable on PATH pass through untouched;
/// anything else is assumed to live in the current working directory.
pub fn resolve_program(program: &str) -> PathBuf {
    let path = Path::new(program);
    if path.is_absolute() || which(program).is_some() {
        return path.to_path_buf();
    }
    env::current_dir()
        .map(|cwd| cwd.join(program))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Locate a command on PATH.
fn which(cmd: &str) -> Option<PathBuf> {
    env::var_os("PATH").and_then(|paths| {
        env::split_paths(&paths).find_map(|dir| {
            let full_path = dir.join(cmd);
            if full_path.is_file() {
                Some(full_path)
            } else {
                None
            }
        })
    })
}
