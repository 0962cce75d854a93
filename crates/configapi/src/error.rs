//! Error types for configuration API operations.
//!
//! Precondition errors ([`Error::AlreadyExists`], [`Error::MissingId`]) are
//! raised before any HTTP call. Everything else comes from the transport, the
//! JSON codec or the declarative codec and is propagated unchanged.

use std::fmt;

/// Result type alias for configuration API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of configuration API errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The server could not be reached or failed (timeouts, 5xx).
    Network,
    /// The server rejected the request (auth, not found, validation).
    Api,
    /// A payload could not be encoded or decoded.
    Decode,
    /// The call was refused locally before reaching the server.
    Precondition,
    /// A declarative tree is malformed or violates its schema.
    Schema,
    /// Other/unknown errors.
    Other,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::Api => "Request rejected by the server",
            Self::Decode => "Unexpected payload",
            Self::Precondition => "Invalid operation",
            Self::Schema => "Invalid declarative configuration",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check the environment URL and your connection, then try again",
            Self::Api => "Check the API token scopes and the response body for details",
            Self::Decode => "The server may be newer than this client; check for updates",
            Self::Precondition => "Use create for new entities and update for existing ones",
            Self::Schema => "Run `cfgctl schema <kind>` to see the accepted attributes",
            Self::Other => "Check the error details for more information",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur during configuration API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed or returned an unexpected status.
    #[error(transparent)]
    Rest(#[from] restkit::Error),

    /// Declarative tree could not be encoded or decoded.
    #[error("declarative config: {0}")]
    Declarative(#[from] hclkit::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Create was called on an entity that already has an ID.
    #[error("{kind} already has ID '{id}'; use update instead")]
    AlreadyExists {
        /// Entity kind.
        kind: &'static str,
        /// The ID that is already set.
        id: String,
    },

    /// An operation that addresses an existing entity got no ID.
    #[error("{kind} {operation} requires an ID")]
    MissingId {
        /// Entity kind.
        kind: &'static str,
        /// Operation name (update, delete, ...).
        operation: &'static str,
    },

    /// A union holds a different variant than requested.
    #[error("expected a {expected} variant, found {found}")]
    VariantMismatch {
        /// Requested discriminator.
        expected: &'static str,
        /// Discriminator actually held.
        found: String,
    },
}

impl Error {
    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Rest(e) => match e.category() {
                restkit::ErrorCategory::Network => ErrorCategory::Network,
                restkit::ErrorCategory::Auth
                | restkit::ErrorCategory::NotFound
                | restkit::ErrorCategory::Api => ErrorCategory::Api,
                restkit::ErrorCategory::Decode => ErrorCategory::Decode,
                restkit::ErrorCategory::Other => ErrorCategory::Other,
            },
            Self::Declarative(_) => ErrorCategory::Schema,
            Self::Json(_) | Self::VariantMismatch { .. } => ErrorCategory::Decode,
            Self::AlreadyExists { .. } | Self::MissingId { .. } => ErrorCategory::Precondition,
        }
    }

    /// HTTP status code, if the server answered with an unexpected one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rest(e) => e.status(),
            _ => None,
        }
    }
}

/// Fail with [`Error::MissingId`] unless `id` is a non-empty string.
pub(crate) fn require_id<'a>(
    kind: &'static str,
    operation: &'static str,
    id: Option<&'a str>,
) -> Result<&'a str> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(Error::MissingId { kind, operation }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id() {
        assert_eq!(require_id("dashboard", "delete", Some("d1")).unwrap(), "d1");
        assert!(matches!(
            require_id("dashboard", "delete", Some(" ")),
            Err(Error::MissingId { .. })
        ));
        assert!(require_id("dashboard", "update", None).is_err());
    }

    #[test]
    fn test_precondition_display() {
        let err = Error::AlreadyExists {
            kind: "web application",
            id: "APPLICATION-1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "web application already has ID 'APPLICATION-1'; use update instead"
        );
        assert_eq!(err.category(), ErrorCategory::Precondition);

        let err = Error::MissingId {
            kind: "notification",
            operation: "delete",
        };
        assert_eq!(err.to_string(), "notification delete requires an ID");
    }

    #[test]
    fn test_rest_category_mapping() {
        let err = Error::from(restkit::Error::UnexpectedStatus {
            method: restkit::Method::Get,
            url: "https://x".to_string(),
            status: 404,
            expected: vec![200],
            body: String::new(),
        });
        assert_eq!(err.category(), ErrorCategory::Api);
        assert_eq!(err.status(), Some(404));

        let err = Error::from(restkit::Error::transport(
            restkit::Method::Get,
            "https://x",
            "timed out",
        ));
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_declarative_is_schema() {
        let err = Error::from(hclkit::Error::MissingAttribute("name".to_string()));
        assert_eq!(err.category(), ErrorCategory::Schema);
    }
}
