//! Notification dispatch
//!
//! The watch talks to its push service through the [`Notifier`] trait and
//! never lets a delivery failure leak into completion handling: [`dispatch`]
//! logs the outcome and swallows errors. By the time a notification goes
//! out the jobs are already done and nobody may be watching the terminal.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::NotifyConfig;
use crate::error::{GridWatchError, Result};
use crate::notify::message::CompletionMessage;
use crate::notify::prowl::ProwlNotifier;
use crate::notify::pushover::PushoverNotifier;

const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
const HTTP_REQUEST_TIMEOUT_SECS: u64 = 15;

/// A push-notification transport.
pub trait Notifier {
    /// Deliver one description/event pair.
    fn send(&self, description: &str, event: &str) -> Result<()>;

    /// Service name for log lines.
    fn service(&self) -> &str;
}

/// Build the transport named by the configuration.
///
/// The configuration has already been validated at load time; this only
/// fails if handed an unvalidated value.
pub fn build_notifier(config: &NotifyConfig) -> Result<Box<dyn Notifier>> {
    match config.api_type.as_str() {
        "prowl" => Ok(Box::new(ProwlNotifier::new(
            config.api_key.clone(),
            config.title.clone(),
        ))),
        "pushover" => {
            let token = config.api_token.clone().ok_or_else(|| {
                GridWatchError::config("api.token is required for the pushover service")
            })?;
            Ok(Box::new(PushoverNotifier::new(
                token,
                config.api_key.clone(),
                config.title.clone(),
            )))
        }
        other => Err(GridWatchError::config(format!(
            "unknown api.type '{}' (supported: prowl, pushover)",
            other
        ))),
    }
}

/// Fire one notification, best effort.
///
/// Returns whether delivery succeeded. The caller never treats a failed
/// delivery as fatal; the completed watch is the result, the push is only
/// the messenger.
pub fn dispatch(notifier: &dyn Notifier, message: &CompletionMessage) -> bool {
    match notifier.send(&message.description, &message.event) {
        Ok(()) => {
            info!(
                service = notifier.service(),
                event = %message.event,
                "notification delivered"
            );
            true
        }
        Err(e) => {
            warn!(service = notifier.service(), error = %e, "notification failed");
            false
        }
    }
}

/// Shared HTTP client for the push transports, built with conservative
/// timeouts so a wedged push API cannot hang the watcher.
pub(crate) fn build_http_client() -> reqwest::blocking::Client {
    match reqwest::blocking::Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
        .build()
    {
        Ok(client) => client,
        Err(error) => {
            warn!(
                error = %error,
                "failed to build HTTP client with timeouts, falling back to defaults"
            );
            reqwest::blocking::Client::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    // `Result::unwrap_err` requires the Ok type to be Debug.
    impl std::fmt::Debug for dyn Notifier {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "Notifier({})", self.service())
        }
    }

    struct RecordingNotifier {
        sent: RefCell<Vec<(String, String)>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn new(fail: bool) -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl Notifier for RecordingNotifier {
        fn send(&self, description: &str, event: &str) -> Result<()> {
            self.sent
                .borrow_mut()
                .push((description.to_string(), event.to_string()));
            if self.fail {
                Err(GridWatchError::notification("recording", "scripted failure"))
            } else {
                Ok(())
            }
        }

        fn service(&self) -> &str {
            "recording"
        }
    }

    fn sample_message() -> CompletionMessage {
        CompletionMessage::completed(&[4821], Some("build"), false, "2026-08-25 14:02", "01 mins")
    }

    #[test]
    fn test_dispatch_passes_message_through() {
        let notifier = RecordingNotifier::new(false);
        assert!(dispatch(&notifier, &sample_message()));
        let sent = notifier.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].0.contains("Task 4821 done"));
        assert_eq!(sent[0].1, "build complete.");
    }

    #[test]
    fn test_dispatch_swallows_failure() {
        let notifier = RecordingNotifier::new(true);
        // A failing transport reports false but never panics or propagates
        assert!(!dispatch(&notifier, &sample_message()));
    }

    #[test]
    fn test_build_notifier_rejects_unknown_service() {
        let config = NotifyConfig {
            api_type: "growl".to_string(),
            api_key: "k".to_string(),
            api_token: None,
            title: "t".to_string(),
        };
        let err = build_notifier(&config).unwrap_err();
        assert!(err.to_string().contains("growl"));
    }

    #[test]
    fn test_build_notifier_requires_pushover_token() {
        let config = NotifyConfig {
            api_type: "pushover".to_string(),
            api_key: "userkey".to_string(),
            api_token: None,
            title: "t".to_string(),
        };
        assert!(build_notifier(&config).is_err());

        let config = NotifyConfig {
            api_token: Some("apptoken".to_string()),
            ..config
        };
        let notifier = build_notifier(&config).unwrap();
        assert_eq!(notifier.service(), "pushover");
    }

    #[test]
    fn test_build_notifier_prowl() {
        let config = NotifyConfig {
            api_type: "prowl".to_string(),
            api_key: "k".to_string(),
            api_token: None,
            title: "t".to_string(),
        };
        assert_eq!(build_notifier(&config).unwrap().service(), "prowl");
    }
}
