//! Shared plumbing for discriminated unions.
//!
//! Unions decode in two passes: [`Header`] reads the discriminator (and the
//! `negate` flag of comparisons) without committing to a schema, then the
//! whole payload is decoded into the variant the discriminator selects.

use hclkit::Properties;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Name of the discriminator field.
pub const TYPE_FIELD: &str = "type";

/// Name of the inversion flag shared by comparison variants.
pub const NEGATE_FIELD: &str = "negate";

/// Fields read in the first decoding pass.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Header {
    #[serde(rename = "type")]
    pub type_name: String,
    pub negate: bool,
}

impl Header {
    pub(crate) fn read(value: &serde_json::Value) -> serde_json::Result<Self> {
        Self::deserialize(value)
    }
}

/// Decode a variant from `value` after removing `strip` keys.
pub(crate) fn decode_variant<T: DeserializeOwned>(
    mut value: serde_json::Value,
    strip: &[&str],
) -> serde_json::Result<T> {
    if let serde_json::Value::Object(map) = &mut value {
        for key in strip {
            map.remove(*key);
        }
    }
    serde_json::from_value(value)
}

/// Encode a variant and stamp its discriminator.
pub(crate) fn encode_variant<T: Serialize>(
    variant: &T,
    type_name: &str,
) -> serde_json::Result<serde_json::Value> {
    let mut value = serde_json::to_value(variant)?;
    if let serde_json::Value::Object(map) = &mut value {
        map.insert(
            TYPE_FIELD.to_string(),
            serde_json::Value::String(type_name.to_string()),
        );
    }
    Ok(value)
}

/// Find the one variant block present in a wrapper block.
///
/// Returns `None` when no block is present and an error when more than one is.
pub(crate) fn single_variant<'k>(
    decoder: &Properties,
    keys: &[&'k str],
) -> hclkit::Result<Option<&'k str>> {
    let present: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| decoder.contains_key(key))
        .collect();
    match present.as_slice() {
        [] => Ok(None),
        [key] => Ok(Some(*key)),
        many => Err(hclkit::Error::invalid(
            many.join(", "),
            "only one variant block may be set",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_ignores_other_fields() {
        let header = Header::read(&json!({"type": "SLACK", "url": "x", "negate": true})).unwrap();
        assert_eq!(header.type_name, "SLACK");
        assert!(header.negate);
    }

    #[test]
    fn test_header_defaults_when_absent() {
        let header = Header::read(&json!({})).unwrap();
        assert!(header.type_name.is_empty());
        assert!(!header.negate);
    }

    #[test]
    fn test_single_variant() {
        let mut props = Properties::new();
        assert_eq!(single_variant(&props, &["a", "b"]).unwrap(), None);
        props.encode("b", &true);
        assert_eq!(single_variant(&props, &["a", "b"]).unwrap(), Some("b"));
        props.encode("a", &true);
        assert!(single_variant(&props, &["a", "b"]).is_err());
    }
}
