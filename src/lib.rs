//! # GridWatch - Batch Job Completion Notifier
//!
//! GridWatch submits jobs to a Grid Engine style batch scheduler, detaches
//! into the background, and polls the queue until every submitted job has
//! left it. It then optionally runs post-processing scripts and sends a
//! single push notification carrying the elapsed wall-clock time.
//!
//! ## Features
//!
//! - **Submission wrapping**: runs `qsub` (or any command printing a Grid
//!   Engine acknowledgement) and parses the job identifier out of it
//! - **Background monitoring**: double-fork detachment returns the terminal
//!   immediately while polling continues
//! - **Exact identifier matching**: identifiers are compared as parsed
//!   fields, not substrings; the historical substring behavior stays
//!   available behind a compatibility switch
//! - **Deadline support**: an optional timeout reports the jobs still
//!   pending instead of waiting forever
//! - **Post-processing hooks**: `process_<script>` companions run after
//!   completion
//! - **Push notifications**: Prowl and Pushover transports
//!
//! ## Quick Start
//!
//! ```no_run
//! use gridwatch::core::{CompletionMonitor, MonitorOptions, PendingSet};
//! use gridwatch::scheduler::{submit, QstatReader};
//!
//! let job = submit("qsub run.sh", true).unwrap();
//! let probe = QstatReader::new("qstat", Some("jdoe".to_string()));
//! let monitor = CompletionMonitor::new(probe, MonitorOptions::default());
//!
//! let outcome = monitor.await_completion(PendingSet::new(vec![job.id]));
//! println!("complete: {}", outcome.is_complete());
//! ```
//!
//! ## Elapsed Time Formatting
//!
//! ```
//! use gridwatch::core::pretty_duration;
//!
//! assert_eq!(pretty_duration(1095), "18 mins");
//! assert_eq!(pretty_duration(3661), "01:01 hrs:mins");
//! assert_eq!(pretty_duration(90060), "01:01:01 days:hrs:mins");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod error;
pub mod notify;
pub mod scheduler;
pub mod system;

// Re-export commonly used types
pub use config::{CliArgs, NotifyConfig, WatchConfig};
pub use core::{CompletionMonitor, MonitorOptions, MonitorOutcome, PendingSet};
pub use error::{GridWatchError, Result};
pub use scheduler::{QstatReader, SubmissionAck, SubmittedJob};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use gridwatch::prelude::*;
    //! ```

    pub use crate::config::{CliArgs, NotifyConfig, WatchConfig};
    pub use crate::core::{
        format_elapsed, pretty_duration, CompletionMonitor, MatchMode, MonitorOptions,
        MonitorOutcome, PendingSet, SweepMode,
    };
    pub use crate::error::{GridWatchError, Result};
    pub use crate::notify::{build_notifier, dispatch, CompletionMessage, Notifier};
    pub use crate::scheduler::{
        submit, QstatReader, QueueProbe, QueueSnapshot, SubmissionAck, SubmittedJob,
    };
    pub use crate::system::{acting_user, daemonize, run_companions};
}
