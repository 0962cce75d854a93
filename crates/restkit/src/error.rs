//! Error types for REST operations.
//!
//! Errors are categorized so callers can give appropriate feedback. The
//! categories are informational only: nothing in this crate retries on its
//! own except [`poll`](crate::poll::poll), which retries every error.

use crate::transport::Method;
use std::fmt;

/// Result type alias for REST operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of REST errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection, DNS, TLS or timeout problems, or a 5xx response.
    Network,
    /// The credentials were rejected (401/403).
    Auth,
    /// The addressed resource does not exist (404).
    NotFound,
    /// The server rejected the request (other 4xx, unexpected 2xx).
    Api,
    /// A body could not be encoded or decoded.
    Decode,
    /// Other/unknown errors.
    Other,
}

impl ErrorCategory {
    /// Whether this error category is typically transient.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::Auth => "Authentication failed",
            Self::NotFound => "Resource not found",
            Self::Api => "Request rejected by the server",
            Self::Decode => "Unexpected payload",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check the environment URL and your connection, then try again",
            Self::Auth => "Check that the API token is valid and has the required scopes",
            Self::NotFound => "Verify the identifier; the resource may have been deleted",
            Self::Api => "Inspect the response body for validation messages",
            Self::Decode => "The server may be newer than this client; check for updates",
            Self::Other => "Check the error details for more information",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur during REST operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response.
    #[error("{method} {url} failed: {message}")]
    Transport {
        /// HTTP method.
        method: Method,
        /// Full request URL.
        url: String,
        /// Error message from the transport.
        message: String,
    },

    /// The response status was not one of the expected codes.
    #[error("{method} {url} returned HTTP {status} (expected {}): {body}", join_codes(.expected))]
    UnexpectedStatus {
        /// HTTP method.
        method: Method,
        /// Full request URL.
        url: String,
        /// Status code received.
        status: u16,
        /// Status codes that would have been accepted.
        expected: Vec<u16>,
        /// Response body, for diagnostics.
        body: String,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

fn join_codes(codes: &[u16]) -> String {
    codes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

impl Error {
    /// Create a transport error.
    pub fn transport(method: Method, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            method,
            url: url.into(),
            message: message.into(),
        }
    }

    /// HTTP status code, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport { .. } => ErrorCategory::Network,
            Self::UnexpectedStatus { status, .. } => match status {
                401 | 403 => ErrorCategory::Auth,
                404 => ErrorCategory::NotFound,
                500..=599 => ErrorCategory::Network,
                _ => ErrorCategory::Api,
            },
            Self::Json(_) => ErrorCategory::Decode,
            Self::Other(_) => ErrorCategory::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16) -> Error {
        Error::UnexpectedStatus {
            method: Method::Get,
            url: "https://env.example.com/api/config/v1/dashboards".to_string(),
            status,
            expected: vec![200],
            body: String::new(),
        }
    }

    #[test]
    fn test_status_categories() {
        assert_eq!(status_error(401).category(), ErrorCategory::Auth);
        assert_eq!(status_error(403).category(), ErrorCategory::Auth);
        assert_eq!(status_error(404).category(), ErrorCategory::NotFound);
        assert_eq!(status_error(400).category(), ErrorCategory::Api);
        assert_eq!(status_error(503).category(), ErrorCategory::Network);
        assert!(status_error(503).category().is_transient());
    }

    #[test]
    fn test_unexpected_status_display() {
        let err = Error::UnexpectedStatus {
            method: Method::Put,
            url: "https://x/y".to_string(),
            status: 400,
            expected: vec![201, 204],
            body: "bad".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "PUT https://x/y returned HTTP 400 (expected 201 or 204): bad"
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_transport_category() {
        let err = Error::transport(Method::Get, "https://x", "connection refused");
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_category_advice_not_empty() {
        for category in [
            ErrorCategory::Network,
            ErrorCategory::Auth,
            ErrorCategory::NotFound,
            ErrorCategory::Api,
            ErrorCategory::Decode,
            ErrorCategory::Other,
        ] {
            assert!(!category.advice().is_empty());
            assert!(!category.to_string().is_empty());
        }
    }
}
