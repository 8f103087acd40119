//! Client error types.

use thiserror::Error;

/// Errors surfaced by the clients. HTTP failures are passed through unchanged.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Build an HTTP error, lifting the server's `message` field out of a JSON body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|m| !m.is_empty());
        Self::Http { status, message }
    }

    /// The message the server sent with a failed request, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_extracted() {
        let err = ClientError::from_response(401, r#"{"message":"Invalid credentials"}"#);
        assert_eq!(err.server_message(), Some("Invalid credentials"));
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "HTTP 401: Invalid credentials");
    }

    #[test]
    fn test_non_json_body_has_no_message() {
        let err = ClientError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "HTTP 502: request failed");
    }

    #[test]
    fn test_other_errors_have_no_server_message() {
        assert_eq!(ClientError::storage("disk full").server_message(), None);
    }
}
