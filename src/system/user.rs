//! Login user lookup

use std::env;

/// Name of the user whose queue entries are watched.
///
/// `LOGNAME` is what login shells set; `USER` covers the rest. Returns
/// `None` in stripped-down environments such as cron, in which case the
/// queue listing runs unscoped.
pub fn acting_user() -> Option<String> {
    user_from(|name| env::var(name).ok())
}

/// `LOGNAME` first, then `USER`.
fn user_from(read: impl Fn(&str) -> Option<String>) -> Option<String> {
    read("LOGNAME").or_else(|| read("USER"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logname_takes_precedence() {
        let read = |name: &str| match name {
            "LOGNAME" => Some("gridwatch-login".to_string()),
            "USER" => Some("gridwatch-other".to_string()),
            _ => None,
        };
        assert_eq!(user_from(read).as_deref(), Some("gridwatch-login"));
    }

    #[test]
    fn test_user_covers_missing_logname() {
        let read = |name: &str| match name {
            "USER" => Some("gridwatch-cron".to_string()),
            _ => None,
        };
        assert_eq!(user_from(read).as_deref(), Some("gridwatch-cron"));
    }

    #[test]
    fn test_stripped_environment_yields_none() {
        assert_eq!(user_from(|_: &str| None), None);
    }
}
