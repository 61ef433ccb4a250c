//! Submission acknowledgement parsing
//!
//! A Grid Engine qsub prints a single line when it accepts a job:
//!
//! ```text
//! your job 4821 ("build") has been submitted
//! your job-array 4822.1-10:1 ("sweep") has been submitted
//! ```
//!
//! The third whitespace token carries the job identifier (for array jobs a
//! compound `base.range` form whose leading integer is the identifier) and
//! the fourth, when present, carries the job name wrapped in `("` and `")`.

use crate::error::{GridWatchError, Result};

/// Leading literal every acknowledgement line opens with.
const ACK_PREFIX: &str = "your";

/// Delimiter characters wrapping the label token on each side.
const LABEL_DELIM_LEN: usize = 2;

/// A parsed submission acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionAck {
    /// Scheduler-assigned job identifier
    pub id: u64,
    /// Job name as reported by the scheduler, if any
    pub label: Option<String>,
}

impl SubmissionAck {
    /// Parse one acknowledgement line into identifier and label.
    ///
    /// Fails on any line that does not open with the scheduler's
    /// acknowledgement literal or whose identifier token is not numeric;
    /// a missing or empty label token is not an error.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end();
        if !line.starts_with(ACK_PREFIX) {
            return Err(GridWatchError::malformed_ack(
                line,
                format!("expected line to start with '{}'", ACK_PREFIX),
            ));
        }

        let mut tokens = line.split_whitespace();
        let identifier = tokens
            .nth(2)
            .ok_or_else(|| GridWatchError::malformed_ack(line, "missing identifier token"))?;

        // Array jobs report a compound identifier such as 4822.1-10:1; only
        // the integer before the first '.' names the job.
        let id_part = identifier
            .split_once('.')
            .map(|(base, _)| base)
            .unwrap_or(identifier);
        let id: u64 = id_part.parse().map_err(|_| {
            GridWatchError::malformed_ack(
                line,
                format!("identifier token '{}' is not numeric", identifier),
            )
        })?;

        let label = tokens.next().and_then(strip_label_delimiters);

        Ok(Self { id, label })
    }
}

/// Strip the fixed two-character delimiter pair from a label token.
///
/// `("build")` becomes `build`. Tokens too short to carry anything between
/// the delimiters yield no label.
fn strip_label_delimiters(token: &str) -> Option<String> {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 2 * LABEL_DELIM_LEN {
        return None;
    }
    let inner: String = chars[LABEL_DELIM_LEN..chars.len() - LABEL_DELIM_LEN]
        .iter()
        .collect();
    Some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PLAIN_ACK: &str = r#"your job 4821 ("build") has been submitted"#;
    const ARRAY_ACK: &str = r#"your job-array 123.1-10:1 ("sweep") has been submitted"#;

    #[test]
    fn test_parses_plain_acknowledgement() {
        let ack = SubmissionAck::parse(PLAIN_ACK).unwrap();
        assert_eq!(ack.id, 4821);
        assert_eq!(ack.label.as_deref(), Some("build"));
    }

    #[test]
    fn test_parses_array_job_compound_identifier() {
        let ack = SubmissionAck::parse(ARRAY_ACK).unwrap();
        assert_eq!(ack.id, 123);
        assert_eq!(ack.label.as_deref(), Some("sweep"));
    }

    #[test]
    fn test_trailing_newline_tolerated() {
        let ack = SubmissionAck::parse("your job 7 (\"x\") has been submitted\n").unwrap();
        assert_eq!(ack.id, 7);
    }

    #[test]
    fn test_wrong_leading_literal_fails() {
        let err = SubmissionAck::parse("Unable to run job: denied").unwrap_err();
        assert!(err.to_string().contains("your"));
        assert!(SubmissionAck::parse("Your job 4821 (\"build\") has been submitted").is_err());
    }

    #[test]
    fn test_missing_identifier_token_fails() {
        assert!(SubmissionAck::parse("your job").is_err());
        assert!(SubmissionAck::parse("your").is_err());
    }

    #[test]
    fn test_non_numeric_identifier_fails() {
        assert!(SubmissionAck::parse("your job abc (\"x\") has been submitted").is_err());
    }

    #[test]
    fn test_missing_label_token_yields_none() {
        let ack = SubmissionAck::parse("your job 77").unwrap();
        assert_eq!(ack.id, 77);
        assert_eq!(ack.label, None);
    }

    #[test]
    fn test_empty_quoted_label_yields_none() {
        // ("") strips to nothing between the delimiters
        let ack = SubmissionAck::parse("your job 77 (\"\") has been submitted").unwrap();
        assert_eq!(ack.label, None);
    }

    proptest! {
        #[test]
        fn prop_identifier_survives_any_array_suffix(id in 1u64..10_000_000, sub in 1u32..1000, hi in 1u32..1000) {
            let line = format!("your job-array {}.{}-{}:1 (\"x\") has been submitted", id, sub, hi);
            let ack = SubmissionAck::parse(&line).unwrap();
            prop_assert_eq!(ack.id, id);
        }

        #[test]
        fn prop_plain_identifier_roundtrips(id in 0u64..u64::MAX) {
            let line = format!("your job {} (\"j\") has been submitted", id);
            prop_assert_eq!(SubmissionAck::parse(&line).unwrap().id, id);
        }
    }
}
