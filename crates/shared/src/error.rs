use thiserror::Error;

use crate::domain::FormField;

pub const TIMEOUT_MESSAGE: &str = "Request timeout. Please try again.";
pub const NETWORK_MESSAGE: &str =
    "Network error. Please check your connection and try again.";
pub const OFFLINE_MESSAGE: &str =
    "No internet connection. Please check your network and try again.";
pub const FALLBACK_MESSAGE: &str = "Registration failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    NetworkUnavailable,
    ServerRejected(u16),
    Unknown,
}

/// A classified transport failure. Carried as data, never propagated as a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct AttemptFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl AttemptFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout() -> Self {
        Self::new(FailureKind::Timeout, TIMEOUT_MESSAGE)
    }

    pub fn network_unavailable() -> Self {
        Self::new(FailureKind::NetworkUnavailable, NETWORK_MESSAGE)
    }

    pub fn server_rejected(status: u16, server_message: Option<&str>) -> Self {
        let message = match server_message {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => format!("HTTP error! status: {status}"),
        };
        Self::new(FailureKind::ServerRejected(status), message)
    }

    /// Message to put in front of the user; never empty.
    pub fn user_message(&self) -> &str {
        if self.message.trim().is_empty() {
            FALLBACK_MESSAGE
        } else {
            &self.message
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldValidationError {
    pub field: FormField,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: FormField) -> Self {
        Self::new(field, field.required_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_rejection_prefers_server_message() {
        let failure = AttemptFailure::server_rejected(400, Some("duplicate email"));
        assert_eq!(failure.kind, FailureKind::ServerRejected(400));
        assert_eq!(failure.message, "duplicate email");
    }

    #[test]
    fn server_rejection_falls_back_to_status_text() {
        assert_eq!(
            AttemptFailure::server_rejected(500, None).message,
            "HTTP error! status: 500"
        );
        assert_eq!(
            AttemptFailure::server_rejected(503, Some("")).message,
            "HTTP error! status: 503"
        );
    }

    #[test]
    fn blank_message_surfaces_fallback() {
        let failure = AttemptFailure::new(FailureKind::Unknown, "  ");
        assert_eq!(failure.user_message(), FALLBACK_MESSAGE);
    }
}
