//! Prowl transport
//!
//! One form POST per notification against the public Prowl add endpoint.
//! Prowl's payload maps one-to-one onto the description/event pair plus the
//! configured application title.

use tracing::debug;

use crate::error::{GridWatchError, Result};
use crate::notify::dispatcher::{build_http_client, Notifier};

const PROWL_ADD_URL: &str = "https://api.prowlapp.com/publicapi/add";
const SERVICE: &str = "prowl";

/// Prowl push client.
pub struct ProwlNotifier {
    client: reqwest::blocking::Client,
    api_key: String,
    application: String,
}

impl ProwlNotifier {
    /// Create a client for the given API key and application title.
    pub fn new(api_key: String, application: String) -> Self {
        Self {
            client: build_http_client(),
            api_key,
            application,
        }
    }

    fn form(&self, description: &str, event: &str) -> [(&'static str, String); 4] {
        [
            ("apikey", self.api_key.clone()),
            ("application", self.application.clone()),
            ("event", event.to_string()),
            ("description", description.to_string()),
        ]
    }
}

impl Notifier for ProwlNotifier {
    fn send(&self, description: &str, event: &str) -> Result<()> {
        let response = self
            .client
            .post(PROWL_ADD_URL)
            .form(&self.form(description, event))
            .send()
            .map_err(|e| GridWatchError::notification(SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GridWatchError::notification(
                SERVICE,
                format!("{} ({})", status, body.trim()),
            ));
        }

        debug!(status = %status, "prowl accepted the notification");
        Ok(())
    }

    fn service(&self) -> &str {
        SERVICE
    }
}
