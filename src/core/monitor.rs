//! Completion monitoring
//!
//! The core state machine: hold an ordered set of pending job identifiers,
//! take a queue snapshot each tick, drop every identifier confirmed absent,
//! and return once none remain or the deadline expires. First disappearance
//! counts as completion; a job that later reappears under the same
//! identifier is not picked up again.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::scheduler::{QueueProbe, QueueSnapshot};

/// How pending identifiers are swept against each snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepMode {
    /// Check every pending identifier each tick and remove any that are
    /// absent, in any order.
    #[default]
    AllPending,
    /// Check only the oldest pending identifier each tick and advance at
    /// most one position. Reproduces the historical behavior, where a later
    /// job is not even looked at until every earlier one has gone.
    Sequential,
}

/// How presence of an identifier in a snapshot is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Exact membership in the snapshot's parsed identifier set.
    #[default]
    ExactField,
    /// Decimal-substring search across the raw listing lines. Collides
    /// with longer identifiers embedding the same digits; reproduces the
    /// historical behavior.
    Substring,
}

/// Polling configuration for one monitoring session.
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// Interval between queue snapshots
    pub interval: Duration,
    /// Give up after this much time and report the jobs still pending
    pub deadline: Option<Duration>,
    /// Sweep strategy
    pub sweep: SweepMode,
    /// Presence test
    pub matching: MatchMode,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            deadline: None,
            sweep: SweepMode::AllPending,
            matching: MatchMode::ExactField,
        }
    }
}

impl MonitorOptions {
    /// Switch to the original-reproduction behavior: substring matching
    /// combined with sequential head-of-line checking.
    pub fn compat(mut self) -> Self {
        self.sweep = SweepMode::Sequential;
        self.matching = MatchMode::Substring;
        self
    }
}

/// Ordered job identifiers not yet confirmed complete.
///
/// Shrinks monotonically: an identifier leaves when first confirmed absent
/// from a snapshot, and the API offers no way to put one back within a
/// session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSet {
    ids: Vec<u64>,
}

impl PendingSet {
    /// Build the set from identifiers in submission order.
    pub fn new(ids: Vec<u64>) -> Self {
        Self { ids }
    }

    /// True once every identifier has been confirmed absent.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of identifiers still pending.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Identifiers still pending, in submission order.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Remove identifiers confirmed absent from `snapshot` and return them.
    fn sweep(&mut self, snapshot: &QueueSnapshot, sweep: SweepMode, matching: MatchMode) -> Vec<u64> {
        let present = |id: u64| match matching {
            MatchMode::ExactField => snapshot.contains_id(id),
            MatchMode::Substring => snapshot.contains_substring(id),
        };

        let mut removed = Vec::new();
        match sweep {
            SweepMode::AllPending => {
                self.ids.retain(|&id| {
                    if present(id) {
                        true
                    } else {
                        removed.push(id);
                        false
                    }
                });
            }
            SweepMode::Sequential => {
                if let Some(&head) = self.ids.first() {
                    if !present(head) {
                        removed.push(head);
                        self.ids.remove(0);
                    }
                }
            }
        }
        removed
    }
}

/// One monitoring run: the pending identifiers, when it started, and how
/// many snapshots it has taken.
#[derive(Debug)]
pub struct MonitorSession {
    /// Identifiers awaiting confirmation
    pub pending: PendingSet,
    /// When monitoring began
    pub started: Instant,
    /// Snapshots taken so far
    pub polls: u64,
}

/// Terminal result of a monitoring session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// Every identifier left the active queue
    Completed {
        /// Snapshots taken before completion
        polls: u64,
    },
    /// The deadline expired first
    TimedOut {
        /// Snapshots taken before giving up
        polls: u64,
        /// Identifiers still pending when time ran out
        remaining: Vec<u64>,
    },
}

impl MonitorOutcome {
    /// True when every watched job completed.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Polls a queue probe until every pending identifier has left the queue.
pub struct CompletionMonitor<P: QueueProbe> {
    probe: P,
    options: MonitorOptions,
}

impl<P: QueueProbe> CompletionMonitor<P> {
    /// Create a monitor over the given probe.
    pub fn new(probe: P, options: MonitorOptions) -> Self {
        Self { probe, options }
    }

    /// Block until every identifier has been absent from some snapshot.
    ///
    /// The first snapshot happens only after one full interval has passed;
    /// an empty set returns immediately without polling at all. A failed
    /// listing makes its tick inconclusive: nothing is removed and the loop
    /// carries on. With a deadline set, the sleep before the final snapshot
    /// is clamped so one last listing is taken at the deadline before
    /// `TimedOut` is declared.
    pub fn await_completion(&self, pending: PendingSet) -> MonitorOutcome {
        let mut session = MonitorSession {
            pending,
            started: Instant::now(),
            polls: 0,
        };

        if session.pending.is_empty() {
            debug!("no pending jobs, nothing to monitor");
            return MonitorOutcome::Completed { polls: 0 };
        }

        info!(
            jobs = session.pending.len(),
            interval_secs = self.options.interval.as_secs(),
            "watching queue until all jobs leave it"
        );

        loop {
            self.pause(&session);
            session.polls += 1;

            match self.probe.snapshot() {
                Ok(snapshot) => {
                    let removed =
                        session
                            .pending
                            .sweep(&snapshot, self.options.sweep, self.options.matching);
                    for id in &removed {
                        info!(job = id, poll = session.polls, "job left the queue");
                    }
                    debug!(
                        poll = session.polls,
                        active = snapshot.active_count(),
                        pending = session.pending.len(),
                        "poll complete"
                    );
                    if session.pending.is_empty() {
                        return MonitorOutcome::Completed {
                            polls: session.polls,
                        };
                    }
                }
                Err(e) => {
                    // Inconclusive tick: a failed listing is no evidence of
                    // completion.
                    warn!(poll = session.polls, error = %e, "queue listing failed, keeping all pending jobs");
                }
            }

            if let Some(deadline) = self.options.deadline {
                if session.started.elapsed() >= deadline {
                    let remaining = session.pending.ids().to_vec();
                    warn!(
                        polls = session.polls,
                        ?remaining,
                        "deadline expired with jobs still pending"
                    );
                    return MonitorOutcome::TimedOut {
                        polls: session.polls,
                        remaining,
                    };
                }
            }
        }
    }

    fn pause(&self, session: &MonitorSession) {
        let mut wait = self.options.interval;
        if let Some(deadline) = self.options.deadline {
            wait = wait.min(deadline.saturating_sub(session.started.elapsed()));
        }
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}
