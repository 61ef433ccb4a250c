//! Error types for GridWatch
//!
//! This module defines all error types used throughout the application,
//! providing detailed error information for debugging and user feedback.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for GridWatch operations
#[derive(Error, Debug)]
pub enum GridWatchError {
    /// I/O error during file or process operations
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Submission acknowledgement did not match the expected shape
    #[error("Malformed acknowledgement line '{line}': {reason}")]
    MalformedAck { line: String, reason: String },

    /// Submission command failed to produce an acknowledgement
    #[error("Submission command '{command}' failed: {message}")]
    Submission { command: String, message: String },

    /// Queue-listing command failed (distinct from an empty queue)
    #[error("Queue command '{command}' failed: {message}")]
    QueueCommand { command: String, message: String },

    /// Push notification could not be delivered
    #[error("Notification via {service} failed: {message}")]
    Notification { service: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Process detachment failed
    #[error("Failed to detach into background: {0}")]
    Daemonize(String),
}

impl GridWatchError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed-acknowledgement error
    pub fn malformed_ack(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAck {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Create a submission error
    pub fn submission(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Submission {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a queue-command error
    pub fn queue_command(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QueueCommand {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a notification error
    pub fn notification(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Notification {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Check if this error is recoverable within a running watch.
    ///
    /// Queue-listing and notification failures are logged and the watch
    /// continues; everything else aborts the run before detachment.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::QueueCommand { .. } | Self::Notification { .. })
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for GridWatch operations
pub type Result<T> = std::result::Result<T, GridWatchError>;

impl From<std::io::Error> for GridWatchError {
    fn from(err: std::io::Error) -> Self {
        GridWatchError::Io {
            path: std::path::PathBuf::new(),
            source: err,
        }
    }
}

impl From<ini::Error> for GridWatchError {
    fn from(err: ini::Error) -> Self {
        GridWatchError::ConfigError(err.to_string())
    }
}

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| GridWatchError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = GridWatchError::io("/test/path", io_err);
        assert!(err.path().is_some());
        assert_eq!(err.path().unwrap(), &PathBuf::from("/test/path"));
    }

    #[test]
    fn test_error_recoverability() {
        let recoverable = GridWatchError::queue_command("qstat", "exit status 1");
        assert!(recoverable.is_recoverable());

        let fatal = GridWatchError::malformed_ack("unexpected", "missing literal");
        assert!(!fatal.is_recoverable());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = GridWatchError::submission("qsub run.sh", "exit status 2");
        let msg = err.to_string();
        assert!(msg.contains("qsub run.sh"));
        assert!(msg.contains("exit status 2"));
    }
}
