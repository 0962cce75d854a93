//! Entity-matching comparisons used by auto-tag rule conditions.

use crate::api::{ServiceType, TagInfo, Unknowns};
use hclkit::{Attribute, Marshaler, Properties, Schema, Schematic, Unmarshaler};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Operators of string and IP address comparisons.
    pub enum StringOperator {
        /// Exact match.
        Equals => "EQUALS",
        /// Prefix match.
        BeginsWith => "BEGINS_WITH",
        /// Substring match.
        Contains => "CONTAINS",
        /// Suffix match.
        EndsWith => "ENDS_WITH",
        /// Attribute is present.
        Exists => "EXISTS",
        /// Regular expression match.
        RegexMatches => "REGEX_MATCHES",
        /// Address lies within a range. IP addresses only.
        IsIpInRange => "IS_IP_IN_RANGE",
    }
}

string_enum! {
    /// Operators of indexed name comparisons.
    pub enum IndexedNameOperator {
        /// Exact match.
        Equals => "EQUALS",
        /// Substring match.
        Contains => "CONTAINS",
        /// Attribute is present.
        Exists => "EXISTS",
    }
}

string_enum! {
    /// Operators of tag comparisons.
    pub enum TagOperator {
        /// Key and value match.
        Equals => "EQUALS",
        /// Key matches.
        TagKeyEquals => "TAG_KEY_EQUALS",
        /// Tag is present. Indexed tags only.
        Exists => "EXISTS",
    }
}

string_enum! {
    /// Operators of integer comparisons.
    pub enum IntegerOperator {
        /// Equal.
        Equals => "EQUALS",
        /// Attribute is present.
        Exists => "EXISTS",
        /// Greater than.
        GreaterThan => "GREATER_THAN",
        /// Greater than or equal.
        GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
        /// Lower than.
        LowerThan => "LOWER_THAN",
        /// Lower than or equal.
        LowerThanOrEqual => "LOWER_THAN_OR_EQUAL",
    }
}

string_enum! {
    /// Operators of comparisons over a closed set of values.
    pub enum EqualityOperator {
        /// Equal.
        Equals => "EQUALS",
        /// Attribute is present.
        Exists => "EXISTS",
    }
}

fn operator_attribute() -> Attribute {
    Attribute::string().required().describe("Operator of the comparison")
}

/// Compares string attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub operator: StringOperator,
    /// Value to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether the comparison is case sensitive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for StringComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.operator);
        properties.encode_opt("value", self.value.as_ref());
        properties.encode_opt("case_sensitive", self.case_sensitive.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for StringComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            operator: decoder.decode("operator")?,
            value: decoder.decode_opt("value")?,
            case_sensitive: decoder.decode_opt("case_sensitive")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for StringComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("operator", operator_attribute())
            .attr("value", Attribute::string().describe("The value to compare to"))
            .attr("case_sensitive", Attribute::bool().describe("The comparison is case-sensitive (`true`) or insensitive (`false`)"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Compares the indexed name of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexedNameComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub operator: IndexedNameOperator,
    /// Value to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for IndexedNameComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.operator);
        properties.encode_opt("value", self.value.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for IndexedNameComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            operator: decoder.decode("operator")?,
            value: decoder.decode_opt("value")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for IndexedNameComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("operator", operator_attribute())
            .attr("value", Attribute::string().describe("The value to compare to"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Compares tags, either indexed or plain.
///
/// Serves both `INDEXED_TAG` and `TAG`; the two share a wire shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TagComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub operator: TagOperator,
    /// Tag to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<TagInfo>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for TagComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.operator);
        properties.encode_block_opt("value", self.value.as_ref())?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for TagComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            operator: decoder.decode("operator")?,
            value: decoder.decode_block("value")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for TagComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("operator", operator_attribute())
            .attr("value", Attribute::single_block(TagInfo::schema()).describe("The tag to compare to"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Indexed variant of [`TagComparison`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexedTagComparison(pub TagComparison);

impl Marshaler for IndexedTagComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        self.0.marshal_hcl(properties)
    }
}

impl Unmarshaler for IndexedTagComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        TagComparison::unmarshal_hcl(decoder).map(Self)
    }
}

impl Schematic for IndexedTagComparison {
    fn schema() -> Schema {
        TagComparison::schema()
    }
}

impl std::ops::Deref for IndexedTagComparison {
    type Target = TagComparison;

    fn deref(&self) -> &TagComparison {
        &self.0
    }
}

impl std::ops::DerefMut for IndexedTagComparison {
    fn deref_mut(&mut self) -> &mut TagComparison {
        &mut self.0
    }
}

/// Compares integer attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntegerComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub operator: IntegerOperator,
    /// Value to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for IntegerComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.operator);
        properties.encode_opt("value", self.value.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for IntegerComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            operator: decoder.decode("operator")?,
            value: decoder.decode_opt("value")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for IntegerComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("operator", operator_attribute())
            .attr("value", Attribute::int().describe("The value to compare to"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Compares IP addresses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IpAddressComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub operator: StringOperator,
    /// Address, prefix or range to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether the comparison is case sensitive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for IpAddressComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.operator);
        properties.encode_opt("value", self.value.as_ref());
        properties.encode_opt("case_sensitive", self.case_sensitive.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for IpAddressComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            operator: decoder.decode("operator")?,
            value: decoder.decode_opt("value")?,
            case_sensitive: decoder.decode_opt("case_sensitive")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for IpAddressComparison {
    fn schema() -> Schema {
        StringComparison::schema()
    }
}

/// Compares the type of a service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceTypeComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub operator: EqualityOperator,
    /// Service type to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ServiceType>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for ServiceTypeComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.operator);
        properties.encode_opt("value", self.value.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for ServiceTypeComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            operator: decoder.decode("operator")?,
            value: decoder.decode_opt("value")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for ServiceTypeComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("operator", operator_attribute())
            .attr("value", Attribute::string().describe("The service type to compare to"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

comparison_union! {
    /// The predicate of an entity rule condition, discriminated by `type`.
    pub enum Comparison {
        String(StringComparison) => "STRING", "string";
        IndexedName(IndexedNameComparison) => "INDEXED_NAME", "indexed_name";
        IndexedTag(IndexedTagComparison) => "INDEXED_TAG", "indexed_tag";
        Tag(TagComparison) => "TAG", "tag";
        Integer(IntegerComparison) => "INTEGER", "integer";
        IpAddress(IpAddressComparison) => "IP_ADDRESS", "ip_address";
        ServiceType(ServiceTypeComparison) => "SERVICE_TYPE", "service_type";
    }
}

impl Comparison {
    /// The operator, as its wire string.
    #[must_use]
    pub fn operator(&self) -> Option<&str> {
        match self {
            Self::String(c) => Some(c.operator.as_str()),
            Self::IndexedName(c) => Some(c.operator.as_str()),
            Self::IndexedTag(c) => Some(c.operator.as_str()),
            Self::Tag(c) => Some(c.operator.as_str()),
            Self::Integer(c) => Some(c.operator.as_str()),
            Self::IpAddress(c) => Some(c.operator.as_str()),
            Self::ServiceType(c) => Some(c.operator.as_str()),
            Self::Generic(c) => c.unknowns.get("operator").and_then(|v| v.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TagContext;
    use serde_json::json;

    #[test]
    fn test_indexed_tag_and_tag_share_shape() {
        let indexed: Comparison = serde_json::from_value(json!({
            "type": "INDEXED_TAG",
            "operator": "EQUALS",
            "negate": true,
            "value": {"context": "KUBERNETES", "key": "app", "value": "web"}
        }))
        .unwrap();

        let Comparison::IndexedTag(tag) = &indexed else {
            panic!("expected indexed tag, got {indexed:?}");
        };
        assert!(tag.negate);
        let value = tag.value.as_ref().unwrap();
        assert_eq!(value.context, TagContext::Kubernetes);
        assert_eq!(value.value.as_deref(), Some("web"));
        assert_eq!(indexed.operator(), Some("EQUALS"));
    }

    #[test]
    fn test_integer_round_trip() {
        let raw = json!({"type": "INTEGER", "operator": "GREATER_THAN", "negate": false, "value": 8080});
        let comparison: Comparison = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(comparison.type_name(), "INTEGER");
        assert_eq!(serde_json::to_value(&comparison).unwrap(), raw);
    }

    #[test]
    fn test_generic_exposes_operator() {
        let comparison: Comparison = serde_json::from_value(json!({
            "type": "OS_TYPE",
            "operator": "EQUALS",
            "value": "LINUX"
        }))
        .unwrap();
        assert_eq!(comparison.type_name(), "OS_TYPE");
        assert_eq!(comparison.operator(), Some("EQUALS"));
        assert!(!comparison.negate());
    }

    #[test]
    fn test_declarative_negate_survives() {
        let comparison = Comparison::from(IpAddressComparison {
            negate: true,
            operator: StringOperator::IsIpInRange,
            value: Some("10.0.0.0/8".to_string()),
            ..IpAddressComparison::default()
        });
        let props = comparison.to_properties().unwrap();
        hclkit::validate(&Comparison::schema(), &props).unwrap();
        assert_eq!(Comparison::unmarshal_hcl(&props).unwrap(), comparison);
    }

    #[test]
    fn test_unknown_type_without_negate_round_trips_exactly() {
        let raw = json!({"type": "CUSTOM_HOST_METADATA", "operator": "EXISTS"});
        let comparison: Comparison = serde_json::from_value(raw.clone()).unwrap();
        assert!(!comparison.negate());
        assert_eq!(serde_json::to_value(&comparison).unwrap(), raw);
    }
}
