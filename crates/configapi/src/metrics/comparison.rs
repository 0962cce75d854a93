//! Comparisons used by calculated service metric conditions.
//!
//! The operator is carried in the `comparison` field. Conditions match either
//! a single `value` or any of `values`.

use crate::api::{ServiceType, TagInfo, Unknowns};
use hclkit::{Attribute, Kind, Marshaler, Properties, Schema, Schematic, Unmarshaler};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Operators of string comparisons.
    pub enum StringOperator {
        /// Exact match.
        Equals => "EQUALS",
        /// Matches any of the values.
        EqualsAnyOf => "EQUALS_ANY_OF",
        /// Prefix match.
        BeginsWith => "BEGINS_WITH",
        /// Prefix match against any of the values.
        BeginsWithAnyOf => "BEGINS_WITH_ANY_OF",
        /// Substring match.
        Contains => "CONTAINS",
        /// Suffix match.
        EndsWith => "ENDS_WITH",
        /// Suffix match against any of the values.
        EndsWithAnyOf => "ENDS_WITH_ANY_OF",
        /// Attribute is present.
        Exists => "EXISTS",
        /// Regular expression match.
        RegexMatches => "REGEX_MATCHES",
    }
}

string_enum! {
    /// Operators of numeric comparisons.
    pub enum NumberOperator {
        /// Equal.
        Equals => "EQUALS",
        /// Equal to any of the values.
        EqualsAnyOf => "EQUALS_ANY_OF",
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
        /// Equal to any of the values.
        EqualsAnyOf => "EQUALS_ANY_OF",
        /// Attribute is present.
        Exists => "EXISTS",
    }
}

string_enum! {
    /// Operators of tag comparisons.
    pub enum TagOperator {
        /// Key and value match.
        Equals => "EQUALS",
        /// Key and value match any of the tags.
        EqualsAnyOf => "EQUALS_ANY_OF",
        /// Tag is present.
        Exists => "EXISTS",
        /// Key matches.
        TagKeyEquals => "TAG_KEY_EQUALS",
        /// Key matches any of the tags.
        TagKeyEqualsAnyOf => "TAG_KEY_EQUALS_ANY_OF",
    }
}

string_enum! {
    /// HTTP request methods.
    pub enum HttpMethod {
        /// GET.
        Get => "GET",
        /// POST.
        Post => "POST",
        /// PUT.
        Put => "PUT",
        /// DELETE.
        Delete => "DELETE",
        /// HEAD.
        Head => "HEAD",
        /// CONNECT.
        Connect => "CONNECT",
        /// OPTIONS.
        Options => "OPTIONS",
        /// PATCH.
        Patch => "PATCH",
        /// TRACE.
        Trace => "TRACE",
    }
}

string_enum! {
    /// Outcome of a request.
    pub enum FailedState {
        /// The request failed.
        Failed => "FAILED",
        /// The request succeeded.
        NotFailed => "NOT_FAILED",
    }
}

fn operator_attribute() -> Attribute {
    Attribute::string().required().describe("Operator of the comparison")
}

// =============================================================================
// STRING
// =============================================================================

/// Compares string attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub comparison: StringOperator,
    /// Value to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Values to compare against.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Whether the comparison is case sensitive.
    pub case_sensitive: bool,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for StringComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.comparison);
        properties.encode_opt("value", self.value.as_ref());
        properties.encode_list("values", &self.values);
        if self.case_sensitive {
            properties.encode("case_sensitive", &true);
        }
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for StringComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            comparison: decoder.decode("operator")?,
            value: decoder.decode_opt("value")?,
            values: decoder.decode_or_default("values")?,
            case_sensitive: decoder.decode_or_default("case_sensitive")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for StringComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("operator", operator_attribute())
            .attr("value", Attribute::string().describe("The value to compare to"))
            .attr("values", Attribute::set(Kind::String).describe("The values to compare to"))
            .attr("case_sensitive", Attribute::bool().describe("The comparison is case-sensitive (`true`) or not case-sensitive (`false`)"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

// =============================================================================
// NUMBER
// =============================================================================

/// Compares numeric attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub comparison: NumberOperator,
    /// Value to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Values to compare against.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f64>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for NumberComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.comparison);
        properties.encode_opt("value", self.value.as_ref());
        properties.encode_list("values", &self.values);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for NumberComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            comparison: decoder.decode("operator")?,
            value: decoder.decode_opt("value")?,
            values: decoder.decode_or_default("values")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for NumberComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("operator", operator_attribute())
            .attr("value", Attribute::float().describe("The value to compare to"))
            .attr("values", Attribute::set(Kind::Float).describe("The values to compare to"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

// =============================================================================
// BOOLEAN
// =============================================================================

/// Compares boolean attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BooleanComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub comparison: EqualityOperator,
    /// Value to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<bool>,
    /// Values to compare against.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<bool>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for BooleanComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.comparison);
        properties.encode_opt("value", self.value.as_ref());
        properties.encode_list("values", &self.values);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for BooleanComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            comparison: decoder.decode("operator")?,
            value: decoder.decode_opt("value")?,
            values: decoder.decode_or_default("values")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for BooleanComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("operator", operator_attribute())
            .attr("value", Attribute::bool().describe("The value to compare to"))
            .attr("values", Attribute::list(Kind::Bool).describe("The values to compare to"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

// =============================================================================
// TAG
// =============================================================================

/// Compares tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TagComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub comparison: TagOperator,
    /// Tag to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<TagInfo>,
    /// Tags to compare against.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<TagInfo>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for TagComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.comparison);
        properties.encode_block_opt("value", self.value.as_ref())?;
        properties.encode_blocks("values", &self.values)?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for TagComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            comparison: decoder.decode("operator")?,
            value: decoder.decode_block("value")?,
            values: decoder.decode_blocks("values")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for TagComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("operator", operator_attribute())
            .attr("value", Attribute::single_block(TagInfo::schema()).describe("The tag to compare to"))
            .attr("values", Attribute::block(TagInfo::schema()).describe("The tags to compare to"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

// =============================================================================
// HTTP_METHOD / SERVICE_TYPE / FAILED_STATE
// =============================================================================

/// Compares the HTTP method of a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpMethodComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub comparison: EqualityOperator,
    /// Method to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<HttpMethod>,
    /// Methods to compare against.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<HttpMethod>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for HttpMethodComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.comparison);
        properties.encode_opt("value", self.value.as_ref());
        properties.encode_list("values", &self.values);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for HttpMethodComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            comparison: decoder.decode("operator")?,
            value: decoder.decode_opt("value")?,
            values: decoder.decode_or_default("values")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for HttpMethodComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("operator", operator_attribute())
            .attr("value", Attribute::string().describe("The HTTP method to compare to"))
            .attr("values", Attribute::set(Kind::String).describe("The HTTP methods to compare to"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Compares the type of the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceTypeComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub comparison: EqualityOperator,
    /// Service type to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ServiceType>,
    /// Service types to compare against.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<ServiceType>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for ServiceTypeComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.comparison);
        properties.encode_opt("value", self.value.as_ref());
        properties.encode_list("values", &self.values);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for ServiceTypeComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            comparison: decoder.decode("operator")?,
            value: decoder.decode_opt("value")?,
            values: decoder.decode_or_default("values")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for ServiceTypeComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("operator", operator_attribute())
            .attr("value", Attribute::string().describe("The service type to compare to"))
            .attr("values", Attribute::set(Kind::String).describe("The service types to compare to"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Compares whether the request failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FailedStateComparison {
    /// Reverses the operator.
    pub negate: bool,
    /// Operator.
    pub comparison: EqualityOperator,
    /// State to compare against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FailedState>,
    /// States to compare against.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<FailedState>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for FailedStateComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("operator", &self.comparison);
        properties.encode_opt("value", self.value.as_ref());
        properties.encode_list("values", &self.values);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for FailedStateComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            negate: false,
            comparison: decoder.decode("operator")?,
            value: decoder.decode_opt("value")?,
            values: decoder.decode_or_default("values")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for FailedStateComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("operator", operator_attribute())
            .attr("value", Attribute::string().describe("The failed state to compare to"))
            .attr("values", Attribute::set(Kind::String).describe("The failed states to compare to"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

comparison_union! {
    /// The predicate of a calculated metric condition, discriminated by `type`.
    pub enum ComparisonInfo {
        String(StringComparison) => "STRING", "string";
        Number(NumberComparison) => "NUMBER", "number";
        Boolean(BooleanComparison) => "BOOLEAN", "boolean";
        Tag(TagComparison) => "TAG", "tag";
        HttpMethod(HttpMethodComparison) => "HTTP_METHOD", "http_method";
        ServiceType(ServiceTypeComparison) => "SERVICE_TYPE", "service_type";
        FailedState(FailedStateComparison) => "FAILED_STATE", "failed_state";
    }
}
