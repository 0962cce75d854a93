//! Calculated service metric model.

use super::comparison::ComparisonInfo;
use crate::api::{ConfigMetadata, Entity, Unknowns};
use hclkit::{Attribute, Kind, Marshaler, Properties, Schema, Schematic, Unmarshaler};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Unit of a calculated metric.
    pub enum Unit {
        /// Unspecified.
        Unspecified => "UNSPECIFIED",
        /// Count.
        Count => "COUNT",
        /// Microseconds.
        MicroSecond => "MICRO_SECOND",
        /// Milliseconds.
        MilliSecond => "MILLI_SECOND",
        /// Seconds.
        Second => "SECOND",
        /// Bytes.
        Byte => "BYTE",
        /// Kilobytes.
        KiloByte => "KILO_BYTE",
        /// Megabytes.
        MegaByte => "MEGA_BYTE",
        /// Percent.
        Percent => "PERCENT",
        /// A unit named in `unitDisplayName`.
        Other => "OTHER",
    }
}

string_enum! {
    /// Base metric a calculated metric is derived from.
    pub enum BaseMetric {
        /// Response time.
        ResponseTime => "RESPONSE_TIME",
        /// CPU time.
        CpuTime => "CPU_TIME",
        /// Request count.
        RequestCount => "REQUEST_COUNT",
        /// Failure rate.
        FailureRate => "FAILURE_RATE",
        /// Failed request count.
        FailedRequestCount => "FAILED_REQUEST_COUNT",
        /// Successful request count.
        SuccessfulRequestCount => "SUCCESSFUL_REQUEST_COUNT",
        /// Database calls.
        DatabaseChildCallCount => "DATABASE_CHILD_CALL_COUNT",
        /// Time spent in database calls.
        DatabaseChildCallTime => "DATABASE_CHILD_CALL_TIME",
        /// Exceptions.
        ExceptionCount => "EXCEPTION_COUNT",
        /// Value of a request attribute.
        RequestAttribute => "REQUEST_ATTRIBUTE",
    }
}

string_enum! {
    /// Which end of the ranking a dimension keeps.
    pub enum TopXDirection {
        /// Highest values.
        Descending => "DESCENDING",
        /// Lowest values.
        Ascending => "ASCENDING",
    }
}

string_enum! {
    /// Aggregation used to rank dimension values.
    pub enum TopXAggregation {
        /// Sum.
        Sum => "SUM",
        /// Average.
        Average => "AVERAGE",
        /// Count.
        Count => "COUNT",
        /// Maximum.
        Max => "MAX",
        /// Minimum.
        Min => "MIN",
        /// Single value.
        SingleValue => "SINGLE_VALUE",
        /// Share of requests of interest.
        OfInterestRatio => "OF_INTEREST_RATIO",
    }
}

/// A calculated service metric.
///
/// The metric key is chosen by the caller and doubles as the identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalculatedServiceMetric {
    /// Metric key, `calc:service.<name>`.
    pub tsm_metric_key: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the metric is recorded.
    pub enabled: bool,
    /// Unit.
    pub unit: Unit,
    /// Display name of an `OTHER` unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_display_name: Option<String>,
    /// Restrict to one service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Restrict to these management zones.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub management_zones: Vec<String>,
    /// What is measured.
    pub metric_definition: MetricDefinition,
    /// Which requests are measured; all must match.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    /// Split by dimension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_definition: Option<DimensionDefinition>,
    /// Server bookkeeping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConfigMetadata>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Entity for CalculatedServiceMetric {
    const KIND: &'static str = "calculated service metric";
    const RESOURCE_TYPE: &'static str = "calculated_service_metric";

    fn id(&self) -> Option<&str> {
        Some(self.tsm_metric_key.as_str()).filter(|key| !key.is_empty())
    }

    fn set_id(&mut self, id: Option<String>) {
        self.tsm_metric_key = id.unwrap_or_default();
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Marshaler for CalculatedServiceMetric {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("metric_key", &self.tsm_metric_key);
        properties.encode("name", &self.name);
        properties.encode_opt("description", self.description.as_ref());
        properties.encode("enabled", &self.enabled);
        properties.encode("unit", &self.unit);
        properties.encode_opt("unit_display_name", self.unit_display_name.as_ref());
        properties.encode_opt("entity_id", self.entity_id.as_ref());
        properties.encode_list("management_zones", &self.management_zones);
        properties.encode_block("metric_definition", &self.metric_definition)?;
        properties.encode_blocks("condition", &self.conditions)?;
        properties.encode_block_opt("dimension_definition", self.dimension_definition.as_ref())?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for CalculatedServiceMetric {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            tsm_metric_key: decoder.decode("metric_key")?,
            name: decoder.decode("name")?,
            description: decoder.decode_opt("description")?,
            enabled: decoder.decode_or_default("enabled")?,
            unit: decoder.decode_or_default("unit")?,
            unit_display_name: decoder.decode_opt("unit_display_name")?,
            entity_id: decoder.decode_opt("entity_id")?,
            management_zones: decoder.decode_or_default("management_zones")?,
            metric_definition: decoder.decode_required_block("metric_definition")?,
            conditions: decoder.decode_blocks("condition")?,
            dimension_definition: decoder.decode_block("dimension_definition")?,
            metadata: None,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|m: Self| m.unknowns)?,
        })
    }
}

impl Schematic for CalculatedServiceMetric {
    fn schema() -> Schema {
        Schema::new()
            .attr("metric_key", Attribute::string().required().describe("The key of the calculated service metric"))
            .attr("name", Attribute::string().required().describe("The displayed name of the metric"))
            .attr("description", Attribute::string())
            .attr("enabled", Attribute::bool().describe("The metric is enabled (`true`) or disabled (`false`)"))
            .attr("unit", Attribute::string().required().describe("The unit of the metric"))
            .attr("unit_display_name", Attribute::string().describe("The display name of the metric's unit. Only applicable when the unit is `OTHER`"))
            .attr("entity_id", Attribute::string().describe("Restricts the metric usage to the specified service"))
            .attr("management_zones", Attribute::set(Kind::String).describe("Restricts the metric usage to specified management zones"))
            .attr("metric_definition", Attribute::single_block(MetricDefinition::schema()).required())
            .attr("condition", Attribute::block(Condition::schema()).describe("The set of conditions for the metric usage. All the specified conditions must be fulfilled"))
            .attr("dimension_definition", Attribute::single_block(DimensionDefinition::schema()))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// What a calculated metric measures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetricDefinition {
    /// Base metric.
    pub metric: BaseMetric,
    /// Request attribute, for `REQUEST_ATTRIBUTE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_attribute: Option<String>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for MetricDefinition {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("metric", &self.metric);
        properties.encode_opt("request_attribute", self.request_attribute.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for MetricDefinition {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            metric: decoder.decode("metric")?,
            request_attribute: decoder.decode_opt("request_attribute")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|d: Self| d.unknowns)?,
        })
    }
}

impl Schematic for MetricDefinition {
    fn schema() -> Schema {
        Schema::new()
            .attr("metric", Attribute::string().required().describe("The metric to be captured"))
            .attr("request_attribute", Attribute::string().describe("The request attribute to be captured. Only applicable when the metric is `REQUEST_ATTRIBUTE`"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// One request filter of a calculated metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Request attribute the comparison applies to, e.g. `SERVICE_REQUEST_ATTRIBUTE`.
    pub attribute: String,
    /// The predicate.
    pub comparison_info: ComparisonInfo,
    /// Fields not modeled by this client.
    #[serde(flatten, default)]
    pub unknowns: Unknowns,
}

impl Condition {
    /// Wire keys modeled by this struct.
    const WIRE_FIELDS: &'static [&'static str] = &["attribute", "comparisonInfo"];
}

impl Marshaler for Condition {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("attribute", &self.attribute);
        properties.encode_block("comparison", &self.comparison_info)?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for Condition {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            attribute: decoder.decode("attribute")?,
            comparison_info: decoder.decode_required_block("comparison")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.without(Self::WIRE_FIELDS),
        })
    }
}

impl Schematic for Condition {
    fn schema() -> Schema {
        Schema::new()
            .attr("attribute", Attribute::string().required().describe("The attribute to be matched"))
            .attr(
                "comparison",
                Attribute::single_block(ComparisonInfo::schema())
                    .required()
                    .describe("Conditions for the comparison"),
            )
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Splits a calculated metric by a dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DimensionDefinition {
    /// Dimension name.
    pub name: String,
    /// Placeholder pattern, e.g. `{URL:Path}`.
    pub dimension: String,
    /// Number of values kept.
    pub top_x: i32,
    /// Ranking direction.
    pub top_x_direction: TopXDirection,
    /// Ranking aggregation.
    pub top_x_aggregation: TopXAggregation,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for DimensionDefinition {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("name", &self.name);
        properties.encode("dimension", &self.dimension);
        properties.encode("top_x", &self.top_x);
        properties.encode("top_x_direction", &self.top_x_direction);
        properties.encode("top_x_aggregation", &self.top_x_aggregation);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for DimensionDefinition {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            name: decoder.decode("name")?,
            dimension: decoder.decode("dimension")?,
            top_x: decoder.decode("top_x")?,
            top_x_direction: decoder.decode_or_default("top_x_direction")?,
            top_x_aggregation: decoder.decode_or_default("top_x_aggregation")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|d: Self| d.unknowns)?,
        })
    }
}

impl Schematic for DimensionDefinition {
    fn schema() -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required().describe("The name of the dimension"))
            .attr("dimension", Attribute::string().required().describe("The dimension value pattern"))
            .attr("top_x", Attribute::int().required().describe("The number of top values to be calculated"))
            .attr("top_x_direction", Attribute::string().describe("How to calculate the top values"))
            .attr("top_x_aggregation", Attribute::string().describe("The aggregation of the dimension"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::comparison::{StringComparison, StringOperator};
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "tsmMetricKey": "calc:service.checkout_time",
            "name": "Checkout time",
            "enabled": true,
            "unit": "MICRO_SECOND",
            "metricDefinition": {"metric": "RESPONSE_TIME"},
            "conditions": [{
                "attribute": "SERVICE_DISPLAY_NAME",
                "comparisonInfo": {
                    "type": "STRING",
                    "comparison": "EQUALS",
                    "value": "checkout",
                    "negate": false,
                    "caseSensitive": false
                }
            }],
            "metadata": {"clusterVersion": "1.250"},
            "ignoreMutedRequests": true
        })
    }

    #[test]
    fn test_decode_metric() {
        let metric: CalculatedServiceMetric = serde_json::from_value(sample()).unwrap();
        assert_eq!(metric.id(), Some("calc:service.checkout_time"));
        assert_eq!(metric.unit, Unit::MicroSecond);
        assert_eq!(metric.metric_definition.metric, BaseMetric::ResponseTime);
        assert_eq!(metric.conditions[0].comparison_info.type_name(), "STRING");
        assert_eq!(metric.unknowns.get("ignoreMutedRequests"), Some(&json!(true)));
    }

    #[test]
    fn test_json_round_trip_keeps_unknowns() {
        let metric: CalculatedServiceMetric = serde_json::from_value(sample()).unwrap();
        let value = serde_json::to_value(&metric).unwrap();
        assert_eq!(value, sample());
    }

    #[test]
    fn test_declarative_round_trip() {
        let mut metric: CalculatedServiceMetric = serde_json::from_value(sample()).unwrap();
        metric.metadata = None;

        let props = metric.to_properties().unwrap();
        hclkit::validate(&CalculatedServiceMetric::schema(), &props).unwrap();
        assert_eq!(CalculatedServiceMetric::unmarshal_hcl(&props).unwrap(), metric);
    }

    #[test]
    fn test_empty_key_is_no_id() {
        let mut metric = CalculatedServiceMetric::default();
        assert_eq!(metric.id(), None);
        metric.set_id(Some("calc:service.x".to_string()));
        assert_eq!(metric.tsm_metric_key, "calc:service.x");
    }

    #[test]
    fn test_condition_wraps_comparison_block() {
        let condition = Condition {
            attribute: "SERVICE_DISPLAY_NAME".to_string(),
            comparison_info: StringComparison {
                comparison: StringOperator::Contains,
                value: Some("pay".to_string()),
                ..StringComparison::default()
            }
            .into(),
            unknowns: Unknowns::new(),
        };
        let props = condition.to_properties().unwrap();
        let comparison = props.get("comparison").and_then(|v| v.as_list()).unwrap();
        let block = comparison[0].as_block().unwrap();
        assert!(block.contains_key("string"));
        assert!(!block.contains_key("negate"));
    }

    #[test]
    fn test_condition_bag_never_shadows_modeled_keys() {
        let condition = Condition {
            attribute: "SERVICE_NAME".to_string(),
            comparison_info: StringComparison::default().into(),
            unknowns: Unknowns::new(),
        };
        let mut props = condition.to_properties().unwrap();
        props.encode(
            Unknowns::ATTRIBUTE,
            r#"{"attribute": "SHADOW", "comparisonInfo": {}, "extra": 1}"#,
        );

        let decoded = Condition::unmarshal_hcl(&props).unwrap();
        assert!(!decoded.unknowns.contains_key("attribute"));
        assert!(!decoded.unknowns.contains_key("comparisonInfo"));
        assert_eq!(decoded.unknowns.get("extra"), Some(&json!(1)));

        let wire = serde_json::to_string(&decoded).unwrap();
        assert_eq!(wire.matches("\"attribute\"").count(), 1);
        let value = serde_json::to_value(&decoded).unwrap();
        assert_eq!(value["attribute"], "SERVICE_NAME");
    }
}
