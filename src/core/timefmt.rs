//! Elapsed-time formatting for completion notifications
//!
//! Renders wall-clock durations the way they appear in the final push
//! message: minutes only under an hour, `HH:MM` under a day, `DD:HH:MM`
//! beyond that. All fields are zero-padded to two digits and seconds
//! truncate toward zero.

use std::time::{SystemTime, UNIX_EPOCH};

/// Format the elapsed time between two epoch-second timestamps.
///
/// An end timestamp earlier than the start saturates to zero elapsed.
///
/// # Examples
///
/// ```
/// use gridwatch::core::format_elapsed;
///
/// assert_eq!(format_elapsed(1000, 1095), "01 mins");
/// assert_eq!(format_elapsed(0, 3661), "01:01 hrs:mins");
/// assert_eq!(format_elapsed(0, 90060), "01:01:01 days:hrs:mins");
/// ```
pub fn format_elapsed(start_epoch: u64, end_epoch: u64) -> String {
    pretty_duration(end_epoch.saturating_sub(start_epoch))
}

/// Format a count of elapsed whole seconds (see [`format_elapsed`]).
pub fn pretty_duration(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let mins = (total_secs % 3_600) / 60;

    if days > 0 {
        format!("{:02}:{:02}:{:02} days:hrs:mins", days, hours, mins)
    } else if hours > 0 {
        format!("{:02}:{:02} hrs:mins", hours, mins)
    } else {
        format!("{:02} mins", mins)
    }
}

/// Current wall-clock time as whole seconds since the Unix epoch.
pub fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
