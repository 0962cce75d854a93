//! Auto-tag model.

use super::comparison::Comparison;
use crate::api::{ConfigMetadata, Entity, Unknowns};
use hclkit::{Attribute, Kind, Marshaler, Properties, Schema, Schematic, Unmarshaler};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Type of monitored entity a rule applies to.
    pub enum MeType {
        /// Services.
        Service => "SERVICE",
        /// Hosts.
        Host => "HOST",
        /// Process groups.
        ProcessGroup => "PROCESS_GROUP",
        /// Applications.
        Application => "APPLICATION",
        /// Custom devices.
        CustomDevice => "CUSTOM_DEVICE",
        /// Custom applications.
        CustomApplication => "CUSTOM_APPLICATION",
        /// Mobile applications.
        MobileApplication => "MOBILE_APPLICATION",
        /// HTTP checks.
        HttpCheck => "HTTP_CHECK",
        /// Synthetic monitors.
        BrowserMonitor => "BROWSER_MONITOR",
        /// Cloud applications.
        CloudApplication => "CLOUD_APPLICATION",
    }
}

string_enum! {
    /// Case normalization of the tag value.
    pub enum Normalization {
        /// Keep as is.
        LeaveTextAsIs => "LEAVE_TEXT_AS_IS",
        /// Lowercase.
        ToLowerCase => "TO_LOWER_CASE",
        /// Uppercase.
        ToUpperCase => "TO_UPPER_CASE",
    }
}

string_enum! {
    /// How a tag spreads to related entities.
    pub enum PropagationType {
        /// Host to process group instances.
        HostToProcessGroupInstance => "HOST_TO_PROCESS_GROUP_INSTANCE",
        /// Process group to host.
        ProcessGroupToHost => "PROCESS_GROUP_TO_HOST",
        /// Process group to service.
        ProcessGroupToService => "PROCESS_GROUP_TO_SERVICE",
        /// Service to host-like entities.
        ServiceToHostLike => "SERVICE_TO_HOST_LIKE",
        /// Service to process group-like entities.
        ServiceToProcessGroupLike => "SERVICE_TO_PROCESS_GROUP_LIKE",
        /// Azure resources to virtual machines.
        AzureToVm => "AZURE_TO_VM",
        /// Azure resources to Azure services.
        AzureToService => "AZURE_TO_SERVICE",
    }
}

/// An auto-tag: a tag applied to every entity matching one of its rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoTag {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tag name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Matching rules; an entity is tagged when any rule matches.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<AutoTagRule>,
    /// Server bookkeeping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConfigMetadata>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Entity for AutoTag {
    const KIND: &'static str = "auto-tag";
    const RESOURCE_TYPE: &'static str = "autotag";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Marshaler for AutoTag {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("name", &self.name);
        properties.encode_opt("description", self.description.as_ref());
        properties.encode_blocks("rules", &self.rules)?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for AutoTag {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            id: None,
            name: decoder.decode("name")?,
            description: decoder.decode_opt("description")?,
            rules: decoder.decode_blocks("rules")?,
            metadata: None,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|t: Self| t.unknowns)?,
        })
    }
}

impl Schematic for AutoTag {
    fn schema() -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required().describe("The name of the auto-tag, which is applied to entities"))
            .attr("description", Attribute::string().describe("The description of the auto-tag"))
            .attr("rules", Attribute::block(AutoTagRule::schema()).describe("The list of rules for tag usage. When there are multiple rules, the OR logic applies"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// One rule of an auto-tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoTagRule {
    /// Entity type the rule applies to.
    #[serde(rename = "type")]
    pub rule_type: MeType,
    /// Whether the rule is active.
    pub enabled: bool,
    /// Tag value pattern, e.g. `{ProcessGroup:KubernetesNamespace}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_format: Option<String>,
    /// Case normalization of the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalization: Option<Normalization>,
    /// Related entities the tag spreads to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub propagation_types: Vec<PropagationType>,
    /// All conditions must match.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<EntityRuleCondition>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for AutoTagRule {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("type", &self.rule_type);
        properties.encode("enabled", &self.enabled);
        properties.encode_opt("value_format", self.value_format.as_ref());
        properties.encode_opt("normalization", self.normalization.as_ref());
        properties.encode_list("propagation_types", &self.propagation_types);
        properties.encode_blocks("conditions", &self.conditions)?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for AutoTagRule {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            rule_type: decoder.decode("type")?,
            enabled: decoder.decode_or_default("enabled")?,
            value_format: decoder.decode_opt("value_format")?,
            normalization: decoder.decode_opt("normalization")?,
            propagation_types: decoder.decode_or_default("propagation_types")?,
            conditions: decoder.decode_blocks("conditions")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|r: Self| r.unknowns)?,
        })
    }
}

impl Schematic for AutoTagRule {
    fn schema() -> Schema {
        Schema::new()
            .attr("type", Attribute::string().required().describe("Type of entities to which the rule applies"))
            .attr("enabled", Attribute::bool().required().describe("The rule is enabled (`true`) or disabled (`false`)"))
            .attr("value_format", Attribute::string().describe("The value of the auto-tag. If specified, the tag is used in the `name:valueFormat` format"))
            .attr("normalization", Attribute::string().describe("Changes applied to the value after applying the value format"))
            .attr("propagation_types", Attribute::set(Kind::String).describe("How to apply the tag to underlying entities"))
            .attr("conditions", Attribute::block(EntityRuleCondition::schema()).describe("A list of matching rules for the auto-tag. The rule applies when all conditions are fulfilled"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// The attribute a condition inspects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConditionKey {
    /// Attribute, e.g. `HOST_NAME`.
    pub attribute: String,
    /// Key type for dynamic attributes, e.g. `PROCESS_CUSTOM_METADATA_KEY`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
    /// Dynamic key, for metadata and environment attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_key: Option<serde_json::Value>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for ConditionKey {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("attribute", &self.attribute);
        properties.encode_opt("type", self.key_type.as_ref());
        if let Some(dynamic_key) = &self.dynamic_key {
            properties.encode("dynamic_key", &serde_json::to_string(dynamic_key)?);
        }
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for ConditionKey {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        let dynamic_key = decoder
            .decode_opt::<String>("dynamic_key")?
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| hclkit::Error::invalid("dynamic_key", e.to_string()))?;
        Ok(Self {
            attribute: decoder.decode("attribute")?,
            key_type: decoder.decode_opt("type")?,
            dynamic_key,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|k: Self| k.unknowns)?,
        })
    }
}

impl Schematic for ConditionKey {
    fn schema() -> Schema {
        Schema::new()
            .attr("attribute", Attribute::string().required().describe("The attribute to be used for comparison"))
            .attr("type", Attribute::string().describe("Defines the actual set of fields depending on the value"))
            .attr("dynamic_key", Attribute::string().describe("The dynamic key, as JSON. Strings are quoted"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// One condition of an auto-tag rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRuleCondition {
    /// What is inspected.
    pub key: ConditionKey,
    /// How it is compared.
    pub comparison_info: Comparison,
    /// Fields not modeled by this client.
    #[serde(flatten, default)]
    pub unknowns: Unknowns,
}

impl EntityRuleCondition {
    /// Wire keys modeled by this struct.
    const WIRE_FIELDS: &'static [&'static str] = &["key", "comparisonInfo"];
}

impl Marshaler for EntityRuleCondition {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode_block("key", &self.key)?;
        properties.encode_block("comparison", &self.comparison_info)?;
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for EntityRuleCondition {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            key: decoder.decode_required_block("key")?,
            comparison_info: decoder.decode_required_block("comparison")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.without(Self::WIRE_FIELDS),
        })
    }
}

impl Schematic for EntityRuleCondition {
    fn schema() -> Schema {
        Schema::new()
            .attr("key", Attribute::single_block(ConditionKey::schema()).required().describe("The key to identify the data we're matching"))
            .attr("comparison", Attribute::single_block(Comparison::schema()).required().describe("Defines how the matching is actually performed"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": "0d4b5d4e-1",
            "name": "team",
            "rules": [{
                "type": "SERVICE",
                "enabled": true,
                "valueFormat": "{ProcessGroup:Environment:team}",
                "normalization": "TO_LOWER_CASE",
                "propagationTypes": ["SERVICE_TO_HOST_LIKE"],
                "conditions": [{
                    "key": {
                        "attribute": "PROCESS_GROUP_CUSTOM_METADATA",
                        "type": "PROCESS_CUSTOM_METADATA_KEY",
                        "dynamicKey": {"source": "ENVIRONMENT", "key": "team"}
                    },
                    "comparisonInfo": {"type": "STRING", "operator": "EXISTS", "negate": false}
                }]
            }],
            "entitySelectorBasedRules": []
        })
    }

    #[test]
    fn test_decode_autotag() {
        let tag: AutoTag = serde_json::from_value(sample()).unwrap();
        assert_eq!(tag.id(), Some("0d4b5d4e-1"));
        let rule = &tag.rules[0];
        assert_eq!(rule.rule_type, MeType::Service);
        assert_eq!(rule.normalization, Some(Normalization::ToLowerCase));
        assert_eq!(rule.conditions[0].comparison_info.operator(), Some("EXISTS"));
        assert!(tag.unknowns.contains_key("entitySelectorBasedRules"));
    }

    #[test]
    fn test_json_round_trip() {
        let tag: AutoTag = serde_json::from_value(sample()).unwrap();
        assert_eq!(serde_json::to_value(&tag).unwrap(), sample());
    }

    #[test]
    fn test_declarative_round_trip() {
        let mut tag: AutoTag = serde_json::from_value(sample()).unwrap();
        tag.id = None;

        let props = tag.to_properties().unwrap();
        hclkit::validate(&AutoTag::schema(), &props).unwrap();
        assert_eq!(AutoTag::unmarshal_hcl(&props).unwrap(), tag);
    }

    #[test]
    fn test_condition_bag_never_shadows_modeled_keys() {
        let tag: AutoTag = serde_json::from_value(sample()).unwrap();
        let condition = tag.rules[0].conditions[0].clone();
        let mut props = condition.to_properties().unwrap();
        props.encode(
            Unknowns::ATTRIBUTE,
            r#"{"key": {"attribute": "SHADOW"}, "comparisonInfo": {}, "extra": 1}"#,
        );

        let decoded = EntityRuleCondition::unmarshal_hcl(&props).unwrap();
        assert!(!decoded.unknowns.contains_key("key"));
        assert!(!decoded.unknowns.contains_key("comparisonInfo"));
        assert_eq!(decoded.unknowns.get("extra"), Some(&json!(1)));

        let value = serde_json::to_value(&decoded).unwrap();
        assert_eq!(value["key"]["attribute"], "PROCESS_GROUP_CUSTOM_METADATA");
    }
}
