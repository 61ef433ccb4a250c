//! Completion message composition
//!
//! Builds the description/event pair a push transport delivers, in the
//! shapes users have filtered on for years:
//!
//! ```text
//! description: Task 4821 done @ 2026-08-25 14:02. Duration: 01:01 hrs:mins.
//! event:       build complete.
//! ```

use chrono::Local;

/// Description/event pair for one push notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionMessage {
    /// Body text naming the jobs, the completion time and the duration
    pub description: String,
    /// Short event label, used as the notification headline
    pub event: String,
}

impl CompletionMessage {
    /// Compose the all-done message.
    ///
    /// `label` is the resolved display name (caller override, else the sole
    /// job's scheduler-reported name); absent or empty it falls back to the
    /// plural event label. With `post_processed` the identifier list gains
    /// the historical ` & post-processing` suffix.
    pub fn completed(
        ids: &[u64],
        label: Option<&str>,
        post_processed: bool,
        timestamp: &str,
        elapsed: &str,
    ) -> Self {
        let mut subject = join_ids(ids);
        if post_processed {
            subject.push_str(" & post-processing");
        }
        let description = format!(
            "{} {} done @ {}. Duration: {}.",
            task_noun(ids.len()),
            subject,
            timestamp,
            elapsed
        );
        let event = match label {
            Some(name) if !name.is_empty() => format!("{} complete.", name),
            _ => "Tasks complete.".to_string(),
        };
        Self { description, event }
    }

    /// Compose the gave-up message for a deadline expiry.
    pub fn timed_out(remaining: &[u64], timestamp: &str, elapsed: &str) -> Self {
        let description = format!(
            "{} {} still queued @ {}. Waited: {}.",
            task_noun(remaining.len()),
            join_ids(remaining),
            timestamp,
            elapsed
        );
        Self {
            description,
            event: "Tasks still running.".to_string(),
        }
    }
}

fn task_noun(count: usize) -> &'static str {
    if count > 1 {
        "Tasks"
    } else {
        "Task"
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Completion timestamp in the local zone, minute resolution.
pub fn local_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_job_message() {
        let msg =
            CompletionMessage::completed(&[4821], Some("build"), false, "2026-08-25 14:02", "01 mins");
        assert_eq!(
            msg.description,
            "Task 4821 done @ 2026-08-25 14:02. Duration: 01 mins."
        );
        assert_eq!(msg.event, "build complete.");
    }

    #[test]
    fn test_multiple_jobs_pluralize() {
        let msg = CompletionMessage::completed(
            &[101, 102],
            None,
            false,
            "2026-08-25 14:02",
            "01:01 hrs:mins",
        );
        assert_eq!(
            msg.description,
            "Tasks 101, 102 done @ 2026-08-25 14:02. Duration: 01:01 hrs:mins."
        );
        assert_eq!(msg.event, "Tasks complete.");
    }

    #[test]
    fn test_post_processing_suffix() {
        let msg =
            CompletionMessage::completed(&[4821], Some("build"), true, "2026-08-25 14:02", "00 mins");
        assert_eq!(
            msg.description,
            "Task 4821 & post-processing done @ 2026-08-25 14:02. Duration: 00 mins."
        );
    }

    #[test]
    fn test_empty_label_falls_back_to_plural_event() {
        let msg = CompletionMessage::completed(&[7], Some(""), false, "t", "00 mins");
        assert_eq!(msg.event, "Tasks complete.");
    }

    #[test]
    fn test_timed_out_message() {
        let msg = CompletionMessage::timed_out(&[101, 102], "2026-08-25 14:02", "02:00 hrs:mins");
        assert_eq!(msg.event, "Tasks still running.");
        assert_eq!(
            msg.description,
            "Tasks 101, 102 still queued @ 2026-08-25 14:02. Waited: 02:00 hrs:mins."
        );
    }

    #[test]
    fn test_local_timestamp_shape() {
        let ts = local_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%d %H:%M").is_ok());
    }
}
