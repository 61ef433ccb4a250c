//! Notification settings file
//!
//! Reads the INI-style settings file that names the push service and its
//! credentials. The file is small:
//!
//! ```ini
//! [general]
//! title = Grid engine notification
//!
//! [api]
//! type = prowl
//! key = 0123abcd...
//! ```
//!
//! Pushover additionally takes an application token under `[api] token`;
//! `key` then holds the user key.

use ini::{Ini, Properties};
use std::path::{Path, PathBuf};

use crate::error::{GridWatchError, Result};

/// Title used when the settings file does not name one.
pub const DEFAULT_TITLE: &str = "Grid engine notification";

/// Settings for the push notification service.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Which service to push through ("prowl" or "pushover").
    pub api_type: String,
    /// Service API key. For Pushover this is the user key.
    pub api_key: String,
    /// Application token, required by Pushover.
    pub api_token: Option<String>,
    /// Display title carried on every notification.
    pub title: String,
}

impl NotifyConfig {
    /// Load settings from the given path, or from the default location
    /// when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => Self::load_from(&default_config_path()),
        }
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GridWatchError::config(format!(
                "settings file not found: {} (create it with an [api] section naming type and key)",
                path.display()
            )));
        }

        let ini = Ini::load_from_file(path)?;
        Self::parse_ini(&ini)
    }

    fn parse_ini(ini: &Ini) -> Result<Self> {
        let api = ini
            .section(Some("api"))
            .ok_or_else(|| GridWatchError::config("settings file is missing the [api] section"))?;

        let api_type = required(api, "type")?.to_lowercase();
        let api_key = required(api, "key")?;
        let api_token = api
            .get("token")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from);

        let title = ini
            .section(Some("general"))
            .and_then(|general| general.get("title"))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Ok(Self {
            api_type,
            api_key,
            api_token,
            title,
        })
    }

    /// Check that the named service is supported and fully credentialed.
    ///
    /// Runs before detaching so a bad settings file fails in the
    /// foreground where the user can see it.
    pub fn validate(&self) -> Result<()> {
        match self.api_type.as_str() {
            "prowl" => Ok(()),
            "pushover" => {
                if self.api_token.is_none() {
                    return Err(GridWatchError::config(
                        "pushover requires an application token ([api] token)",
                    ));
                }
                Ok(())
            }
            other => Err(GridWatchError::config(format!(
                "unknown api type '{}' (must be one of: prowl, pushover)",
                other
            ))),
        }
    }
}

fn required(section: &Properties, key: &str) -> Result<String> {
    section
        .get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or_else(|| GridWatchError::config(format!("[api] section is missing '{}'", key)))
}

/// Default settings location: `~/.gridwatch/config.ini`.
pub fn default_config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".gridwatch").join("config.ini")
}
