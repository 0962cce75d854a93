//! Preservation of wire fields this client does not model.

use hclkit::{Attribute, Properties};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire fields that no struct field claims.
///
/// Every model embeds one with `#[serde(flatten)]`, so JSON decode collects
/// every non-modeled key here and JSON encode writes them back. Known fields
/// always take precedence: serde only hands unclaimed keys to the bag.
///
/// In the declarative form the bag travels as a single `unknowns` string
/// attribute holding a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unknowns(BTreeMap<String, serde_json::Value>);

impl Unknowns {
    /// Name of the declarative attribute carrying the bag.
    pub const ATTRIBUTE: &'static str = "unknowns";

    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of preserved fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a preserved field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Whether a field is preserved.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Preserve a field.
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }

    /// Drop a field.
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.0.remove(key)
    }

    /// Iterate over preserved fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.0.iter()
    }

    /// Write the `unknowns` attribute, if there is anything to write.
    pub fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        if !self.is_empty() {
            properties.encode(Self::ATTRIBUTE, &serde_json::to_string(&self.0)?);
        }
        Ok(())
    }

    /// Read the `unknowns` attribute. Absent or empty yields an empty bag.
    pub fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        match decoder.decode_opt::<String>(Self::ATTRIBUTE)? {
            Some(json) if !json.trim().is_empty() => serde_json::from_str(&json)
                .map_err(|e| hclkit::Error::invalid(Self::ATTRIBUTE, e.to_string())),
            _ => Ok(Self::default()),
        }
    }

    /// Drop every key that `T` models.
    ///
    /// The bag is decoded as a `T`; whatever lands in that value's own bag is
    /// what `T` does not claim. A modeled key with an ill-typed value is an
    /// error rather than silently discarded.
    pub fn scrubbed<T: DeserializeOwned>(
        self,
        unknowns_of: impl FnOnce(T) -> Self,
    ) -> hclkit::Result<Self> {
        if self.is_empty() {
            return Ok(self);
        }
        let object: serde_json::Map<String, serde_json::Value> = self.0.into_iter().collect();
        let decoded: T = serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|e| hclkit::Error::invalid(Self::ATTRIBUTE, e.to_string()))?;
        Ok(unknowns_of(decoded))
    }

    /// Drop the listed wire keys.
    ///
    /// For types whose bag cannot be scrubbed through [`Self::scrubbed`]
    /// because they have no `Default`.
    #[must_use]
    pub fn without(mut self, keys: &[&str]) -> Self {
        for key in keys {
            self.0.remove(*key);
        }
        self
    }

    /// Schema entry for the `unknowns` attribute.
    #[must_use]
    pub fn schema_attribute() -> Attribute {
        Attribute::string().describe("JSON object of fields not modeled by this client")
    }
}

impl FromIterator<(String, serde_json::Value)> for Unknowns {
    fn from_iter<I: IntoIterator<Item = (String, serde_json::Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    struct Sample {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        alerting_profile: Option<String>,
        #[serde(flatten)]
        unknowns: Unknowns,
    }

    #[test]
    fn test_flatten_collects_unclaimed_keys() {
        let sample: Sample = serde_json::from_value(json!({
            "name": "ops",
            "futureField": {"nested": [1, 2]},
            "flag": true
        }))
        .unwrap();
        assert_eq!(sample.name, "ops");
        assert_eq!(sample.unknowns.len(), 2);
        assert!(!sample.unknowns.contains_key("name"));

        let back = serde_json::to_value(&sample).unwrap();
        assert_eq!(back["futureField"], json!({"nested": [1, 2]}));
        assert_eq!(back["flag"], json!(true));
    }

    #[test]
    fn test_marshal_skips_empty_bag() {
        let mut props = Properties::new();
        Unknowns::new().marshal_hcl(&mut props).unwrap();
        assert!(props.is_empty());
    }

    #[test]
    fn test_declarative_attribute_round_trip() {
        let bag: Unknowns = [("x".to_string(), json!(1))].into_iter().collect();
        let mut props = Properties::new();
        bag.marshal_hcl(&mut props).unwrap();
        assert_eq!(
            props.get(Unknowns::ATTRIBUTE).and_then(hclkit::Value::as_str),
            Some(r#"{"x":1}"#)
        );
        assert_eq!(Unknowns::unmarshal_hcl(&props).unwrap(), bag);
    }

    #[test]
    fn test_scrubbed_drops_modeled_keys() {
        let bag: Unknowns = [
            ("name".to_string(), json!("shadow")),
            ("alertingProfile".to_string(), json!("p1")),
            ("extra".to_string(), json!([1])),
        ]
        .into_iter()
        .collect();
        let scrubbed = bag.scrubbed(|p: Sample| p.unknowns).unwrap();
        assert_eq!(scrubbed.len(), 1);
        assert!(scrubbed.contains_key("extra"));
    }

    #[test]
    fn test_scrubbed_rejects_ill_typed_modeled_key() {
        let bag: Unknowns = [("name".to_string(), json!(5))].into_iter().collect();
        assert!(bag.scrubbed(|p: Sample| p.unknowns).is_err());
    }

    #[test]
    fn test_without_drops_listed_keys() {
        let bag: Unknowns = [
            ("attribute".to_string(), json!("shadow")),
            ("extra".to_string(), json!(1)),
        ]
        .into_iter()
        .collect();
        let bag = bag.without(&["attribute", "comparisonInfo"]);
        assert_eq!(bag.len(), 1);
        assert!(bag.contains_key("extra"));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let mut props = Properties::new();
        props.encode(Unknowns::ATTRIBUTE, "{not json");
        let err = Unknowns::unmarshal_hcl(&props).unwrap_err();
        assert!(err.to_string().starts_with("attribute 'unknowns'"));
    }
}
