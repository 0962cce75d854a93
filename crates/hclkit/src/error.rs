//! Error types for declarative configuration trees.

use thiserror::Error;

/// Result type alias for hclkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding, decoding or validating properties.
#[derive(Debug, Error)]
pub enum Error {
    /// An attribute holds a value of a different kind than requested.
    #[error("attribute '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Attribute path (empty when the value was not read through a key).
        key: String,
        /// Kind that was requested.
        expected: &'static str,
        /// Kind that was found.
        found: &'static str,
    },

    /// A required attribute is absent.
    #[error("missing required attribute '{0}'")]
    MissingAttribute(String),

    /// An attribute is present but its value is not acceptable.
    #[error("attribute '{key}': {message}")]
    InvalidValue {
        /// Attribute path.
        key: String,
        /// Description of the problem.
        message: String,
    },

    /// Properties do not conform to a schema.
    #[error("{} schema violation(s): {}", .0.len(), .0.join("; "))]
    Validation(Vec<String>),

    /// Embedded JSON (e.g. the `unknowns` attribute) could not be processed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a type mismatch error without key context.
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            key: String::new(),
            expected,
            found,
        }
    }

    /// Create an invalid value error.
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Prefix the attribute path of this error with `key`.
    ///
    /// Nested decoders call this on the way out so that errors report the
    /// full path, e.g. `monitoring_settings.0.injection_mode`.
    #[must_use]
    pub fn at(self, key: &str) -> Self {
        match self {
            Self::TypeMismatch {
                key: inner,
                expected,
                found,
            } => Self::TypeMismatch {
                key: join_path(key, &inner),
                expected,
                found,
            },
            Self::MissingAttribute(inner) => Self::MissingAttribute(join_path(key, &inner)),
            Self::InvalidValue {
                key: inner,
                message,
            } => Self::InvalidValue {
                key: join_path(key, &inner),
                message,
            },
            other => other,
        }
    }
}

fn join_path(outer: &str, inner: &str) -> String {
    if inner.is_empty() {
        outer.to_string()
    } else {
        format!("{outer}.{inner}")
    }
}
