//! Failure taxonomy shared by every backend resource client.

use reqwest::StatusCode;
use thiserror::Error;

/// Longest backend error message carried into an [`ApiError::Status`].
const MAX_MESSAGE_LEN: usize = 200;

/// Errors that can occur when calling the REST backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Build(#[source] reqwest::Error),

    /// A request URL could not be assembled from the configured base URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[source] reqwest::Error),

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("Backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a status the call does not accept.
    #[error("Backend returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The response body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

/// Coarse classification used by the presentation layer to word failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response from the backend.
    Unavailable,
    /// The session token was rejected (401/403).
    Unauthorized,
    /// The target resource does not exist (404).
    NotFound,
    /// Any other non-accepted status.
    Rejected,
    /// The backend answered with something we could not read.
    Malformed,
}

impl ApiError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Build(_) | Self::InvalidUrl(_) | Self::Decode(_) => FailureKind::Malformed,
            Self::Transport(_) => FailureKind::Unavailable,
            Self::Status { status, .. } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FailureKind::Unauthorized,
                StatusCode::NOT_FOUND => FailureKind::NotFound,
                _ => FailureKind::Rejected,
            },
        }
    }

    /// HTTP status returned by the backend, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a status error from a backend response body.
    ///
    /// Prefers a JSON `message` or `error` field, falling back to the raw
    /// text, truncated so arbitrary HTML error pages stay out of the UI.
    #[must_use]
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let from_json = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["message", "error"]
                    .iter()
                    .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_owned))
            });

        let message = from_json.unwrap_or_else(|| body.trim().to_owned());
        let message = if message.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_owned()
        } else {
            message.chars().take(MAX_MESSAGE_LEN).collect()
        };

        Self::Status { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_by_status() {
        let err = ApiError::from_body(StatusCode::UNAUTHORIZED, "");
        assert_eq!(err.kind(), FailureKind::Unauthorized);
        let err = ApiError::from_body(StatusCode::NOT_FOUND, "");
        assert_eq!(err.kind(), FailureKind::NotFound);
        let err = ApiError::from_body(StatusCode::UNPROCESSABLE_ENTITY, "");
        assert_eq!(err.kind(), FailureKind::Rejected);
        let err = ApiError::Decode("missing field `items`".to_string());
        assert_eq!(err.kind(), FailureKind::Malformed);
    }

    #[test]
    fn test_message_from_json_body() {
        let err = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Title already exists"}"#,
        );
        assert_eq!(
            err.to_string(),
            "Backend returned 400 Bad Request: Title already exists"
        );
    }

    #[test]
    fn test_message_from_error_field() {
        let err = ApiError::from_body(StatusCode::CONFLICT, r#"{"error":"duplicate email"}"#);
        assert!(matches!(err, ApiError::Status { ref message, .. } if message == "duplicate email"));
    }

    #[test]
    fn test_empty_body_uses_reason_phrase() {
        let err = ApiError::from_body(StatusCode::INTERNAL_SERVER_ERROR, "  ");
        assert!(
            matches!(err, ApiError::Status { ref message, .. } if message == "Internal Server Error")
        );
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(1000);
        let err = ApiError::from_body(StatusCode::BAD_GATEWAY, &body);
        assert!(matches!(err, ApiError::Status { ref message, .. } if message.len() == 200));
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    }
}
