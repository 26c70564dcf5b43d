//! Error types for the budget advisory service

use serde::Serialize;
use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {

    // =============================
    // Service Setup Errors
    // =============================

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Advisory client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Outcome classification for a chat turn or advisory request.
///
/// The `Display` text of each variant is the message shown to the student,
/// and is also what gets written into the transcript as the synthetic
/// assistant turn when a request fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {

    // =============================
    // Rejected before any request
    // =============================

    #[error("Please type a message first.")]
    EmptyMessage,

    #[error("Please wait for the current reply to finish.")]
    RequestInFlight,

    // =============================
    // Service failures
    // =============================

    #[error("Chat service endpoint not found. Please check if the backend is running.")]
    NotFound,

    #[error("Server error. Please try again in a moment.")]
    ServerError,

    #[error("Authentication required. Please log in first.")]
    Unauthorized,

    #[error("Error: {0}")]
    ServiceMessage(String),

    #[error("Cannot connect to chat service at {endpoint}. Is the backend running?")]
    Unreachable { endpoint: String },

    #[error("Sorry, there was an error connecting to the chat service. Please try again.")]
    Unknown { detail: String },
}

/// Stable tag for a [`ChatError`], for API payloads and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatErrorKind {
    EmptyMessage,
    RequestInFlight,
    NotFound,
    ServerError,
    Unauthorized,
    ServiceMessage,
    Unreachable,
    Unknown,
}

impl ChatError {
    pub fn kind(&self) -> ChatErrorKind {
        match self {
            ChatError::EmptyMessage => ChatErrorKind::EmptyMessage,
            ChatError::RequestInFlight => ChatErrorKind::RequestInFlight,
            ChatError::NotFound => ChatErrorKind::NotFound,
            ChatError::ServerError => ChatErrorKind::ServerError,
            ChatError::Unauthorized => ChatErrorKind::Unauthorized,
            ChatError::ServiceMessage(_) => ChatErrorKind::ServiceMessage,
            ChatError::Unreachable { .. } => ChatErrorKind::Unreachable,
            ChatError::Unknown { .. } => ChatErrorKind::Unknown,
        }
    }

    /// True when the turn was refused locally and nothing was sent.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ChatError::EmptyMessage | ChatError::RequestInFlight)
    }

    /// Message shown to the student for this outcome.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_distinct() {
        let errors = vec![
            ChatError::NotFound,
            ChatError::ServerError,
            ChatError::Unauthorized,
            ChatError::ServiceMessage("quota exceeded".to_string()),
            ChatError::Unreachable {
                endpoint: "http://localhost:8080".to_string(),
            },
            ChatError::Unknown {
                detail: "builder".to_string(),
            },
        ];

        let mut messages: Vec<String> = errors.iter().map(|e| e.user_message()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn test_service_message_and_endpoint_are_embedded() {
        assert_eq!(
            ChatError::ServiceMessage("quota exceeded".to_string()).user_message(),
            "Error: quota exceeded"
        );

        let unreachable = ChatError::Unreachable {
            endpoint: "http://localhost:8080".to_string(),
        };
        assert!(unreachable.user_message().contains("http://localhost:8080"));
    }

    #[test]
    fn test_io_errors_convert() {
        let err: AdvisorError =
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken").into();
        assert!(matches!(err, AdvisorError::IoError(_)));
        assert_eq!(err.to_string(), "IO error: port taken");
    }

    #[test]
    fn test_rejections() {
        assert!(ChatError::EmptyMessage.is_rejection());
        assert!(ChatError::RequestInFlight.is_rejection());
        assert!(!ChatError::ServerError.is_rejection());
        assert_eq!(ChatError::Unauthorized.kind(), ChatErrorKind::Unauthorized);
    }
}
