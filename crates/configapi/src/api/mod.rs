//! Types shared by every resource family.

mod comparison;
mod stub;
mod union;
mod unknowns;

pub use comparison::{GenericComparison, ServiceType, TagContext, TagInfo};
pub use stub::{EntityShortRepresentation, StubList};
pub use union::{NEGATE_FIELD, TYPE_FIELD};
pub(crate) use union::{Header, decode_variant, encode_variant, single_variant};
pub use unknowns::Unknowns;

use hclkit::{Marshaler, Schematic, Unmarshaler};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Server bookkeeping attached to an entity. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigMetadata {
    /// Version of the cluster that served the entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_version: Option<String>,
    /// Configuration versions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub configuration_versions: Vec<i64>,
    /// Current configuration versions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub current_configuration_versions: Vec<String>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

/// A top-level configuration entity.
///
/// Entities have a JSON wire form (serde), a declarative form (hclkit) and
/// a schema. The ID is assigned by the server on create and never changes.
pub trait Entity:
    Serialize + DeserializeOwned + Marshaler + Unmarshaler + Schematic + Sized
{
    /// Human readable kind, used in messages.
    const KIND: &'static str;

    /// Declarative resource type, used when rendering HCL.
    const RESOURCE_TYPE: &'static str;

    /// The identifier, if assigned.
    fn id(&self) -> Option<&str>;

    /// Replace the identifier.
    fn set_id(&mut self, id: Option<String>);

    /// The display name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_unknowns_survive() {
        let wire = json!({
            "clusterVersion": "1.250.0",
            "configurationVersions": [4, 2],
            "currentConfigurationVersions": ["1.0.0"],
            "lastModifiedBy": "ops@example.com"
        });
        let metadata: ConfigMetadata = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(metadata.cluster_version.as_deref(), Some("1.250.0"));
        assert_eq!(
            metadata.unknowns.get("lastModifiedBy"),
            Some(&json!("ops@example.com"))
        );
        assert_eq!(serde_json::to_value(&metadata).unwrap(), wire);
    }
}
