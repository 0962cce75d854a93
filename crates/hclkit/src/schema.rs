//! Declarative schema model.
//!
//! A [`Schema`] lists the attributes a block accepts, their kinds and their
//! flags. It is the contract consumed by declarative configuration tooling
//! and the input to [`validate`](crate::validate).

use serde::Serialize;
use std::collections::BTreeMap;

/// The kind of value an attribute holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "elem", rename_all = "snake_case")]
pub enum Kind {
    /// `true` / `false`.
    Bool,
    /// Integer number.
    Int,
    /// Floating point number.
    Float,
    /// String.
    String,
    /// Ordered list of elements.
    List(Box<Kind>),
    /// Unordered set of elements.
    Set(Box<Kind>),
    /// Repeated nested block.
    Block(Schema),
}

impl Kind {
    /// Human readable name, matching [`Value::kind`](crate::Value::kind).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::List(_) | Self::Set(_) | Self::Block(_) => "list",
        }
    }
}

/// Schema for a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    /// Kind of value.
    pub kind: Kind,
    /// Human readable description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Must be present.
    pub required: bool,
    /// May be present.
    pub optional: bool,
    /// Assigned by the server; may be absent in configuration.
    pub computed: bool,
    /// Holds a secret that should be redacted in output.
    pub sensitive: bool,
    /// Deprecation message, if deprecated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    /// Minimum number of list elements / blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    /// Maximum number of list elements / blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

impl Attribute {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            description: String::new(),
            required: false,
            optional: true,
            computed: false,
            sensitive: false,
            deprecated: None,
            min_items: None,
            max_items: None,
        }
    }

    /// Optional boolean attribute.
    #[must_use]
    pub fn bool() -> Self {
        Self::new(Kind::Bool)
    }

    /// Optional integer attribute.
    #[must_use]
    pub fn int() -> Self {
        Self::new(Kind::Int)
    }

    /// Optional float attribute.
    #[must_use]
    pub fn float() -> Self {
        Self::new(Kind::Float)
    }

    /// Optional string attribute.
    #[must_use]
    pub fn string() -> Self {
        Self::new(Kind::String)
    }

    /// Optional list attribute.
    #[must_use]
    pub fn list(elem: Kind) -> Self {
        Self::new(Kind::List(Box::new(elem)))
    }

    /// Optional set attribute.
    #[must_use]
    pub fn set(elem: Kind) -> Self {
        Self::new(Kind::Set(Box::new(elem)))
    }

    /// Optional repeated nested block.
    #[must_use]
    pub fn block(schema: Schema) -> Self {
        Self::new(Kind::Block(schema))
    }

    /// Optional single nested block (at most one).
    #[must_use]
    pub fn single_block(schema: Schema) -> Self {
        Self::block(schema).max_items(1)
    }

    /// Mark as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    /// Mark as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self.optional = true;
        self
    }

    /// Mark as computed by the server.
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Mark as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Mark as deprecated.
    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self
    }

    /// Set the description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the minimum number of items.
    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    /// Set the maximum number of items.
    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }
}

/// Attribute schema of one block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute.
    pub fn attr(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    /// Add every attribute of `other`, replacing same-named ones.
    pub fn merge(mut self, other: Schema) -> Self {
        self.attributes.extend(other.attributes);
        self
    }

    /// Look up an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Iterate over attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Attribute)> {
        self.attributes.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the schema has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_clears_optional() {
        let attr = Attribute::string().required();
        assert!(attr.required);
        assert!(!attr.optional);
    }

    #[test]
    fn test_single_block_has_max_one() {
        let attr = Attribute::single_block(Schema::new().attr("a", Attribute::bool()));
        assert_eq!(attr.max_items, Some(1));
        assert_eq!(attr.kind.name(), "list");
    }

    #[test]
    fn test_schema_serializes_as_map() {
        let schema = Schema::new()
            .attr("name", Attribute::string().required().describe("Display name"))
            .attr("tags", Attribute::set(Kind::String));
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["name"]["kind"]["type"], "string");
        assert_eq!(json["name"]["description"], "Display name");
        assert_eq!(json["tags"]["kind"]["elem"]["type"], "string");
        assert!(json["tags"].get("description").is_none());
    }

    #[test]
    fn test_merge_overrides() {
        let base = Schema::new().attr("name", Attribute::string());
        let merged = base.merge(Schema::new().attr("name", Attribute::string().required()));
        assert!(merged.get("name").unwrap().required);
        assert_eq!(merged.len(), 1);
    }
}
