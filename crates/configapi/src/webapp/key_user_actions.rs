//! Key user actions and their reconciliation.
//!
//! Key user actions have no stable client-side identity: the server assigns
//! `meIdentifier` and there is no update call. Desired and remote lists are
//! therefore compared by [`KeyUserAction::identity`], and the difference is
//! applied as deletes and creates.

use crate::api::Unknowns;
use hclkit::{Attribute, Marshaler, Properties, Schema, Schematic, Unmarshaler};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

string_enum! {
    /// Type of a user action.
    pub enum KeyUserActionType {
        /// Page load.
        Load => "Load",
        /// XHR call.
        Xhr => "Xhr",
        /// Custom action.
        Custom => "Custom",
    }
}

/// A user action marked as key user action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyUserAction {
    /// Action name.
    pub name: String,
    /// Action type.
    pub action_type: KeyUserActionType,
    /// Domain the action belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub me_identifier: Option<String>,
    /// Fields not modeled by this client.
    #[serde(flatten)]
    pub unknowns: Unknowns,
}

impl KeyUserAction {
    /// Create a key user action.
    pub fn new(name: impl Into<String>, action_type: KeyUserActionType) -> Self {
        Self {
            name: name.into(),
            action_type,
            ..Self::default()
        }
    }

    /// Set the domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Canonical identity: name, type and domain as a JSON object with
    /// sorted keys. A missing domain counts as the empty string. The
    /// server-assigned ID is not part of the identity.
    #[must_use]
    pub fn identity(&self) -> String {
        serde_json::json!({
            "actionType": self.action_type.as_str(),
            "domain": self.domain.as_deref().unwrap_or(""),
            "name": self.name,
        })
        .to_string()
    }
}

impl Marshaler for KeyUserAction {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        properties.encode("name", &self.name);
        properties.encode("type", &self.action_type);
        properties.encode_opt("domain", self.domain.as_ref());
        self.unknowns.marshal_hcl(properties)
    }
}

impl Unmarshaler for KeyUserAction {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        Ok(Self {
            name: decoder.decode("name")?,
            action_type: decoder.decode("type")?,
            domain: decoder.decode_opt("domain")?,
            me_identifier: None,
            unknowns: Unknowns::unmarshal_hcl(decoder)?.scrubbed(|k: Self| k.unknowns)?,
        })
    }
}

impl Schematic for KeyUserAction {
    fn schema() -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required().describe("The name of the action"))
            .attr(
                "type",
                Attribute::string()
                    .required()
                    .describe("The type of the action. Possible values are `Custom`, `Load` and `Xhr`."),
            )
            .attr("domain", Attribute::string().describe("The domain where the action is performed"))
            .attr(Unknowns::ATTRIBUTE, Unknowns::schema_attribute())
    }
}

/// Response body of the key user action collection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyUserActionList {
    /// The key user actions.
    pub key_user_action_list: Vec<KeyUserAction>,
}

/// Changes needed to turn a remote list into a desired one.
#[derive(Debug, Default, PartialEq)]
pub struct ReconcilePlan<'a> {
    /// Remote actions whose identity is not desired.
    pub to_delete: Vec<&'a KeyUserAction>,
    /// Desired actions whose identity is not present remotely.
    pub to_add: Vec<&'a KeyUserAction>,
}

impl ReconcilePlan<'_> {
    /// Whether nothing needs to change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_add.is_empty()
    }
}

/// Compute `remote - desired` (to delete) and `desired - remote` (to add).
///
/// Actions present on both sides are left alone. Duplicate identities are
/// handled once.
pub fn plan<'a>(desired: &'a [KeyUserAction], remote: &'a [KeyUserAction]) -> ReconcilePlan<'a> {
    let desired_ids: HashSet<String> = desired.iter().map(KeyUserAction::identity).collect();
    let remote_ids: HashSet<String> = remote.iter().map(KeyUserAction::identity).collect();

    let mut seen = HashSet::new();
    let to_delete = remote
        .iter()
        .filter(|kua| {
            let identity = kua.identity();
            !desired_ids.contains(&identity) && seen.insert(identity)
        })
        .collect();

    let mut seen = HashSet::new();
    let to_add = desired
        .iter()
        .filter(|kua| {
            let identity = kua.identity();
            !remote_ids.contains(&identity) && seen.insert(identity)
        })
        .collect();

    ReconcilePlan { to_delete, to_add }
}
