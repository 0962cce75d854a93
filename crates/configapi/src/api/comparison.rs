//! Types shared by the comparison unions of calculated metrics and auto-tags.

use super::Unknowns;
use hclkit::{Attribute, Marshaler, Properties, Schema, Schematic, Unmarshaler};
use serde::{Deserialize, Serialize};

/// A comparison whose type this client does not model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericComparison {
    /// The discriminator, as received.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Inverts the comparison. Absent on the wire unless set.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub negate: bool,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl GenericComparison {
    /// Declarative block name of the generic variant.
    pub const BLOCK: &'static str = "generic";
}

impl Marshaler for GenericComparison {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("type", &self.type_name);
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for GenericComparison {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            type_name: decoder.decode("type")?,
            negate: false,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|c: Self| c.unknowns)?,
        })
    }
}

impl Schematic for GenericComparison {
    fn schema() -> Schema {
        Schema::new()
            .attr("type", Attribute::string().required().describe("The type of comparison"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

string_enum! {
    /// Origin of a tag.
    pub enum TagContext {
        /// Tag defined in the monitoring environment itself.
        Contextless => "CONTEXTLESS",
        /// AWS.
        Aws => "AWS",
        /// Generic AWS.
        AwsGeneric => "AWS_GENERIC",
        /// Azure.
        Azure => "AZURE",
        /// Cloud Foundry.
        CloudFoundry => "CLOUD_FOUNDRY",
        /// Environment variable.
        Environment => "ENVIRONMENT",
        /// Google Cloud.
        GoogleCloud => "GOOGLE_CLOUD",
        /// Kubernetes.
        Kubernetes => "KUBERNETES",
    }
}

string_enum! {
    /// Type of a monitored service.
    pub enum ServiceType {
        /// Background activity.
        BackgroundActivity => "BACKGROUND_ACTIVITY",
        /// CICS service.
        CicsService => "CICS_SERVICE",
        /// Custom service.
        CustomService => "CUSTOM_SERVICE",
        /// Database service.
        DatabaseService => "DATABASE_SERVICE",
        /// ESB service.
        EnterpriseServiceBusService => "ENTERPRISE_SERVICE_BUS_SERVICE",
        /// External service.
        External => "EXTERNAL",
        /// IBM Integration Bus service.
        IbmIntegrationBusService => "IBM_INTEGRATION_BUS_SERVICE",
        /// IMS service.
        ImsService => "IMS_SERVICE",
        /// Messaging service.
        MessagingService => "MESSAGING_SERVICE",
        /// RMI service.
        RmiService => "RMI_SERVICE",
        /// RPC service.
        RpcService => "RPC_SERVICE",
        /// Web request service.
        WebRequestService => "WEB_REQUEST_SERVICE",
        /// Web service.
        WebService => "WEB_SERVICE",
    }
}

/// A tag reference: context, key and optional value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagInfo {
    /// Origin of the tag.
    pub context: TagContext,
    /// Tag key.
    pub key: String,
    /// Tag value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl Marshaler for TagInfo {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("context", &self.context);
        properties.encode("key", &self.key);
        properties.encode_opt("value", self.value.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for TagInfo {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            context: decoder.decode("context")?,
            key: decoder.decode("key")?,
            value: decoder.decode_opt("value")?,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|t: Self| t.unknowns)?,
        })
    }
}

impl Schematic for TagInfo {
    fn schema() -> Schema {
        Schema::new()
            .attr("context", Attribute::string().required().describe("The origin of the tag"))
            .attr("key", Attribute::string().required().describe("The key of the tag"))
            .attr("value", Attribute::string().describe("The value of the tag"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_info_context_defaults() {
        let tag: TagInfo = serde_json::from_value(json!({"key": "env"})).unwrap();
        assert_eq!(tag.context, TagContext::Contextless);
        assert_eq!(tag.value, None);
    }

    #[test]
    fn test_unknown_service_type_is_kept() {
        let kind: ServiceType = serde_json::from_value(json!("QUANTUM_SERVICE")).unwrap();
        assert_eq!(kind, ServiceType::Unknown("QUANTUM_SERVICE".to_string()));
        assert_eq!(serde_json::to_value(&kind).unwrap(), json!("QUANTUM_SERVICE"));
    }

    #[test]
    fn test_generic_declarative_form_keeps_type() {
        let mut generic = GenericComparison {
            type_name: "SIMPLE_TECH".to_string(),
            ..GenericComparison::default()
        };
        generic.unknowns.insert("value", json!({"type": "JAVA"}));

        let props = generic.to_properties().unwrap();
        assert_eq!(GenericComparison::unmarshal_hcl(&props).unwrap(), generic);
    }
}
