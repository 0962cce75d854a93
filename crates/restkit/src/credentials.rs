//! API credentials.

use std::fmt;

/// How the token is presented in the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Authorization: Api-Token <token>`
    #[default]
    ApiToken,
    /// `Authorization: Bearer <token>`
    Bearer,
}

impl AuthScheme {
    /// The scheme keyword.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiToken => "Api-Token",
            Self::Bearer => "Bearer",
        }
    }
}

/// A token credential passed to the client at construction.
///
/// There is no refresh or rotation; build a new client to change tokens.
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    scheme: AuthScheme,
    token: String,
}

impl Credentials {
    /// Credentials using the `Api-Token` scheme.
    pub fn api_token(token: impl Into<String>) -> Self {
        Self {
            scheme: AuthScheme::ApiToken,
            token: token.into(),
        }
    }

    /// Credentials using the `Bearer` scheme.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            scheme: AuthScheme::Bearer,
            token: token.into(),
        }
    }

    /// The authentication scheme.
    #[must_use]
    pub fn scheme(&self) -> AuthScheme {
        self.scheme
    }

    /// Whether the token is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token.trim().is_empty()
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("{} {}", self.scheme.as_str(), self.token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("scheme", &self.scheme)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_values() {
        assert_eq!(
            Credentials::api_token("dt0c01.abc").header_value(),
            "Api-Token dt0c01.abc"
        );
        assert_eq!(Credentials::bearer("xyz").header_value(), "Bearer xyz");
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", Credentials::api_token("secret-token"));
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_is_empty() {
        assert!(Credentials::api_token("  ").is_empty());
        assert!(!Credentials::bearer("t").is_empty());
    }
}
