//! Errors reported by channel adapters.

use std::time::Duration;

use thiserror::Error;

/// An external channel rejected or failed a listing update.
///
/// `code` is a short machine-readable classifier (`timeout`, `transport`, `http_503`, ...)
/// and `message` carries whatever detail the channel returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct AdapterError {
    pub code: String,
    pub message: String,
}

impl AdapterError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The adapter call did not finish within its configured timeout.
    pub fn timeout(after: Duration) -> Self {
        Self::new(
            "timeout",
            format!("channel did not respond within {}ms", after.as_millis()),
        )
    }

    /// No adapter is registered for the channel kind.
    pub fn unsupported(kind: &str) -> Self {
        Self::new(
            "unsupported_channel",
            format!("no adapter registered for channel kind '{}'", kind),
        )
    }

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::new("transport", err.to_string())
    }

    /// Whether the failure is on the channel side and may succeed if the caller retries.
    pub fn is_transient(&self) -> bool {
        match self.code.as_str() {
            "timeout" | "transport" | "http_429" => true,
            code => code
                .strip_prefix("http_5")
                .is_some_and(|rest| rest.len() == 2 && rest.chars().all(|c| c.is_ascii_digit())),
        }
    }
}
