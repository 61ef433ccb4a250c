//! Pushover transport
//!
//! Pushover wants an application token alongside the user's key and reports
//! acceptance through a JSON envelope whose `status` field must be 1. The
//! service has no application field of its own, so the configured display
//! title rides in front of the event label.

use serde::Deserialize;
use tracing::debug;

use crate::error::{GridWatchError, Result};
use crate::notify::dispatcher::{build_http_client, Notifier};

const PUSHOVER_MESSAGES_URL: &str = "https://api.pushover.net/1/messages.json";
const SERVICE: &str = "pushover";

/// Pushover push client.
pub struct PushoverNotifier {
    client: reqwest::blocking::Client,
    token: String,
    user_key: String,
    title: String,
}

/// Acceptance envelope returned by the messages endpoint.
#[derive(Debug, Deserialize)]
struct PushoverEnvelope {
    status: i32,
    #[serde(default)]
    errors: Vec<String>,
}

impl PushoverNotifier {
    /// Create a client for the given application token, user key and
    /// display title.
    pub fn new(token: String, user_key: String, title: String) -> Self {
        Self {
            client: build_http_client(),
            token,
            user_key,
            title,
        }
    }

    fn compose_title(&self, event: &str) -> String {
        format!("{} - {}", self.title, event)
    }

    fn form(&self, description: &str, event: &str) -> [(&'static str, String); 4] {
        [
            ("token", self.token.clone()),
            ("user", self.user_key.clone()),
            ("title", self.compose_title(event)),
            ("message", description.to_string()),
        ]
    }

    fn check_envelope(body: &str) -> Result<()> {
        let envelope: PushoverEnvelope = serde_json::from_str(body).map_err(|e| {
            GridWatchError::notification(SERVICE, format!("unreadable response: {}", e))
        })?;
        if envelope.status != 1 {
            return Err(GridWatchError::notification(
                SERVICE,
                format!("rejected: {}", envelope.errors.join("; ")),
            ));
        }
        Ok(())
    }
}

impl Notifier for PushoverNotifier {
    fn send(&self, description: &str, event: &str) -> Result<()> {
        let response = self
            .client
            .post(PUSHOVER_MESSAGES_URL)
            .form(&self.form(description, event))
            .send()
            .map_err(|e| GridWatchError::notification(SERVICE, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| GridWatchError::notification(SERVICE, e.to_string()))?;

        if !status.is_success() {
            return Err(GridWatchError::notification(
                SERVICE,
                format!("{} ({})", status, body.trim()),
            ));
        }

        Self::check_envelope(&body)?;
        debug!("pushover accepted the notification");
        Ok(())
    }

    fn service(&self) -> &str {
        SERVICE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> PushoverNotifier {
        PushoverNotifier::new(
            "apptoken".to_string(),
            "userkey".to_string(),
            "Grid engine notification".to_string(),
        )
    }

    #[test]
    fn test_title_carries_application_and_event() {
        assert_eq!(
            notifier().compose_title("build complete."),
            "Grid engine notification - build complete."
        );
    }

    #[test]
    fn test_form_carries_all_fields() {
        let form = notifier().form("Task 7 done @ t.", "build complete.");
        assert_eq!(form[0], ("token", "apptoken".to_string()));
        assert_eq!(form[1], ("user", "userkey".to_string()));
        assert_eq!(
            form[2].1,
            "Grid engine notification - build complete."
        );
        assert_eq!(form[3].1, "Task 7 done @ t.");
    }

    #[test]
    fn test_accepting_envelope() {
        assert!(PushoverNotifier::check_envelope(r#"{"status":1,"request":"abc"}"#).is_ok());
    }

    #[test]
    fn test_rejecting_envelope_names_errors() {
        let err = PushoverNotifier::check_envelope(
            r#"{"status":0,"errors":["application token is invalid"]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("application token is invalid"));
    }

    #[test]
    fn test_unreadable_envelope_fails() {
        assert!(PushoverNotifier::check_envelope("<html>busy</html>").is_err());
    }
}
