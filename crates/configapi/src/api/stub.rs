//! Short entity representations returned by create and list endpoints.

use super::Unknowns;
use hclkit::{Attribute, Marshaler, Properties, Schema, Schematic, Unmarshaler};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The short representation of an entity: ID and name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityShortRepresentation {
    /// Server-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl EntityShortRepresentation {
    /// Create a stub.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Marshaler for EntityShortRepresentation {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("id", &self.id);
        if !self.name.is_empty() {
            properties.encode("name", &self.name);
        }
        properties.encode_opt("description", self.description.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for EntityShortRepresentation {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: decoder.decode("id")?,
            name: decoder.decode_or_default("name")?,
            description: decoder.decode_opt("description")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|s: Self| s.unknowns)?,
        })
    }
}

impl Schematic for EntityShortRepresentation {
    fn schema() -> Schema {
        Schema::new()
            .attr("id", Attribute::string().required().describe("The ID of the entity"))
            .attr("name", Attribute::string().describe("The name of the entity"))
            .attr("description", Attribute::string())
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

impl fmt::Display for EntityShortRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.name, self.id)
        }
    }
}

/// A list of stubs, the common shape of collection endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubList {
    /// The entities.
    pub values: Vec<EntityShortRepresentation>,
}

impl StubList {
    /// Number of stubs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<EntityShortRepresentation>> for StubList {
    fn from(values: Vec<EntityShortRepresentation>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_list_decodes_values() {
        let list: StubList = serde_json::from_str(
            r#"{"values": [{"id": "a", "name": "A"}, {"id": "b", "name": "B", "description": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.values[1].description.as_deref(), Some("x"));
    }

    #[test]
    fn test_stub_display() {
        assert_eq!(EntityShortRepresentation::new("a", "Alpha").to_string(), "Alpha (a)");
        assert_eq!(EntityShortRepresentation::new("a", "").to_string(), "a");
    }
}
