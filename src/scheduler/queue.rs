//! Queue snapshot reading
//!
//! One snapshot per poll tick: run the queue-listing command, capture its
//! output, and parse the set of active job identifiers out of it. A failed
//! invocation is a typed error, never mistaken for an empty queue.

use std::collections::HashSet;
use std::process::Command;

use tracing::debug;

use crate::error::{GridWatchError, Result};

/// Default queue-listing program.
pub const DEFAULT_QUEUE_PROGRAM: &str = "qstat";

/// One queue listing: the raw output lines and the job identifiers parsed
/// from them.
///
/// A qstat listing opens with a header and separator row that carry no
/// identifier; every job row leads with one:
///
/// ```text
/// job-ID  prior   name   user  state submit/start at     queue   slots
/// --------------------------------------------------------------------
///    4821 0.55500 build  jdoe  r     08/25/2026 10:30:02 all.q   1
/// ```
#[derive(Debug, Clone)]
pub struct QueueSnapshot {
    lines: Vec<String>,
    ids: HashSet<u64>,
}

impl QueueSnapshot {
    /// Parse a snapshot out of raw queue-listing output.
    ///
    /// A line contributes an identifier when its first whitespace-delimited
    /// token parses as an integer; all lines are retained verbatim for the
    /// substring compatibility test.
    pub fn parse(output: &str) -> Self {
        let mut lines = Vec::new();
        let mut ids = HashSet::new();
        for line in output.lines() {
            if let Some(id) = leading_identifier(line) {
                ids.insert(id);
            }
            lines.push(line.to_string());
        }
        Self { lines, ids }
    }

    /// Exact membership of a parsed identifier.
    pub fn contains_id(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Original-style membership: the identifier's decimal form occurring as
    /// a substring of any raw line. Collides with longer identifiers that
    /// embed the same digits; kept only for compatibility mode.
    pub fn contains_substring(&self, id: u64) -> bool {
        let needle = id.to_string();
        self.lines.iter().any(|line| line.contains(&needle))
    }

    /// Identifiers parsed from this snapshot.
    pub fn ids(&self) -> &HashSet<u64> {
        &self.ids
    }

    /// Number of active jobs found.
    pub fn active_count(&self) -> usize {
        self.ids.len()
    }
}

/// First whitespace token of a row parsed as a job identifier.
fn leading_identifier(line: &str) -> Option<u64> {
    line.split_whitespace().next()?.parse().ok()
}

/// A source of queue snapshots.
///
/// The monitor polls through this trait; production code runs the real
/// listing command while tests substitute scripted snapshots.
pub trait QueueProbe {
    /// Take one snapshot of the active queue.
    fn snapshot(&self) -> Result<QueueSnapshot>;

    /// Human-readable description of the probe for log and error text.
    fn describe(&self) -> String;
}

/// Queue probe invoking `qstat` (or an override program), optionally scoped
/// to one user with `-u USER`.
#[derive(Debug, Clone)]
pub struct QstatReader {
    program: String,
    user: Option<String>,
}

impl QstatReader {
    /// Create a reader for the given program and optional user scope.
    pub fn new(program: impl Into<String>, user: Option<String>) -> Self {
        Self {
            program: program.into(),
            user,
        }
    }

    /// Reader for the default program with no user scope.
    pub fn unscoped() -> Self {
        Self::new(DEFAULT_QUEUE_PROGRAM, None)
    }
}

impl QueueProbe for QstatReader {
    fn snapshot(&self) -> Result<QueueSnapshot> {
        let mut command = Command::new(&self.program);
        if let Some(user) = &self.user {
            command.args(["-u", user]);
        }

        let output = command.output().map_err(|e| {
            GridWatchError::queue_command(self.describe(), format!("failed to run: {}", e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GridWatchError::queue_command(
                self.describe(),
                format!("{} ({})", output.status, stderr.trim()),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let snapshot = QueueSnapshot::parse(&stdout);
        debug!(active = snapshot.active_count(), "queue snapshot taken");
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        match &self.user {
            Some(user) => format!("{} -u {}", self.program, user),
            None => self.program.clone(),
        }
    }
}
