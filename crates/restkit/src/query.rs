//! Query string construction.

use std::fmt;

/// Builder for a URL query string.
///
/// Parameters keep insertion order; keys and values are percent-encoded.
/// Unset optional parameters are skipped entirely.
///
/// ```
/// use restkit::Query;
///
/// let query = Query::new()
///     .param_opt("owner", Some("ops@example.com"))
///     .param_all("tags", ["prod", "web"]);
/// assert_eq!(
///     query.apply("/dashboards"),
///     "/dashboards?owner=ops%40example.com&tags=prod&tags=web"
/// );
/// assert_eq!(Query::new().apply("/dashboards"), "/dashboards");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Create an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn param(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.pairs
            .push((key.to_string(), value.as_ref().to_string()));
        self
    }

    /// Append a parameter if `value` is set.
    pub fn param_opt(self, key: &str, value: Option<impl AsRef<str>>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Append one parameter per value.
    pub fn param_all<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        for value in values {
            self = self.param(key, value);
        }
        self
    }

    /// Whether no parameters were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append this query to `path`.
    #[must_use]
    pub fn apply(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{self}")
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(
                f,
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_opt_none_skipped() {
        let query = Query::new().param_opt("owner", None::<&str>);
        assert!(query.is_empty());
    }

    #[test]
    fn test_values_are_encoded() {
        let query = Query::new().param("tags", "team:web ops");
        assert_eq!(query.to_string(), "tags=team%3Aweb%20ops");
    }

    #[test]
    fn test_insertion_order() {
        let query = Query::new().param("b", "2").param("a", "1");
        assert_eq!(query.apply("/p"), "/p?b=2&a=1");
    }
}
