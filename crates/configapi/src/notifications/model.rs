//! The notification union.

use super::channels::{
    AnsibleTowerConfig, EmailConfig, GenericConfig, JiraConfig, OpsGenieConfig, PagerDutyConfig,
    ServiceNowConfig, SlackConfig, TrelloConfig, VictorOpsConfig, WebhookConfig, XMattersConfig,
};
use crate::api::{Header, TYPE_FIELD, decode_variant, encode_variant};
use crate::error::Error;
use hclkit::{Attribute, Properties, Schema, Schematic};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_json::Value;

/// Declarative block holding a channel of an unmodeled type.
pub(crate) const GENERIC_BLOCK: &str = "config";

macro_rules! notification_union {
    ($($variant:ident($config:ident) => $type_name:literal, $block:literal;)+) => {
        /// A notification channel, discriminated by `type`.
        ///
        /// Unknown discriminators decode into [`NotificationConfig::Generic`]
        /// and survive a round trip unchanged.
        #[derive(Debug, Clone, PartialEq)]
        pub enum NotificationConfig {
            $(
                #[doc = concat!("`", $type_name, "` channel.")]
                $variant($config),
            )+
            /// A channel type this client does not model.
            Generic(GenericConfig),
        }

        impl NotificationConfig {
            /// Declarative block names, one per variant.
            pub(crate) const BLOCKS: &'static [&'static str] = &[$($block,)+ GENERIC_BLOCK];

            /// The wire discriminator.
            #[must_use]
            pub fn type_name(&self) -> &str {
                match self {
                    $(Self::$variant(_) => $type_name,)+
                    Self::Generic(c) => &c.type_name,
                }
            }

            /// The server-assigned identifier.
            #[must_use]
            pub fn id(&self) -> Option<&str> {
                match self {
                    $(Self::$variant(c) => c.id.as_deref(),)+
                    Self::Generic(c) => c.id.as_deref(),
                }
            }

            /// Replace the identifier.
            pub fn set_id(&mut self, id: Option<String>) {
                match self {
                    $(Self::$variant(c) => c.id = id,)+
                    Self::Generic(c) => c.id = id,
                }
            }

            /// The display name.
            #[must_use]
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$variant(c) => &c.name,)+
                    Self::Generic(c) => &c.name,
                }
            }

            /// The associated alerting profile.
            #[must_use]
            pub fn alerting_profile(&self) -> &str {
                match self {
                    $(Self::$variant(c) => &c.alerting_profile,)+
                    Self::Generic(c) => &c.alerting_profile,
                }
            }

            /// Whether the channel is enabled.
            #[must_use]
            pub fn active(&self) -> bool {
                match self {
                    $(Self::$variant(c) => c.active,)+
                    Self::Generic(c) => c.active,
                }
            }

            fn from_json(type_name: &str, value: Value) -> serde_json::Result<Self> {
                Ok(match type_name {
                    $($type_name => Self::$variant(decode_variant(value, &[TYPE_FIELD])?),)+
                    _ => Self::Generic(decode_variant(value, &[])?),
                })
            }

            fn to_json(&self) -> serde_json::Result<Value> {
                match self {
                    $(Self::$variant(c) => encode_variant(c, $type_name),)+
                    Self::Generic(c) => encode_variant(c, &c.type_name),
                }
            }

            pub(crate) fn marshal_block(&self, properties: &mut Properties) -> hclkit::Result<()> {
                match self {
                    $(Self::$variant(c) => properties.encode_block($block, c),)+
                    Self::Generic(c) => properties.encode_block(GENERIC_BLOCK, c),
                }
            }

            pub(crate) fn unmarshal_block(block: &str, decoder: &Properties) -> hclkit::Result<Self> {
                match block {
                    $($block => decoder.decode_required_block($block).map(Self::$variant),)+
                    _ => decoder.decode_required_block(GENERIC_BLOCK).map(Self::Generic),
                }
            }

            pub(crate) fn block_schema() -> Schema {
                Schema::new()
                    $(.attr($block, Attribute::single_block($config::schema())))+
                    .attr(
                        GENERIC_BLOCK,
                        Attribute::single_block(GenericConfig::schema())
                            .describe("A channel of a type not modeled by this client"),
                    )
            }
        }

        $(
            impl $config {
                /// The wire discriminator of this channel.
                pub const TYPE_NAME: &'static str = $type_name;
            }

            impl From<$config> for NotificationConfig {
                fn from(config: $config) -> Self {
                    Self::$variant(config)
                }
            }

            impl TryFrom<NotificationConfig> for $config {
                type Error = Error;

                fn try_from(config: NotificationConfig) -> Result<Self, Error> {
                    match config {
                        NotificationConfig::$variant(c) => Ok(c),
                        other => Err(Error::VariantMismatch {
                            expected: $type_name,
                            found: other.type_name().to_string(),
                        }),
                    }
                }
            }
        )+
    };
}

notification_union! {
    Email(EmailConfig) => "EMAIL", "email";
    Slack(SlackConfig) => "SLACK", "slack";
    Jira(JiraConfig) => "JIRA", "jira";
    PagerDuty(PagerDutyConfig) => "PAGER_DUTY", "pager_duty";
    Webhook(WebhookConfig) => "WEBHOOK", "webhook";
    OpsGenie(OpsGenieConfig) => "OPS_GENIE", "ops_genie";
    VictorOps(VictorOpsConfig) => "VICTOROPS", "victor_ops";
    XMatters(XMattersConfig) => "XMATTERS", "xmatters";
    ServiceNow(ServiceNowConfig) => "SERVICE_NOW", "service_now";
    Trello(TrelloConfig) => "TRELLO", "trello";
    AnsibleTower(AnsibleTowerConfig) => "ANSIBLETOWER", "ansible_tower";
}

impl From<GenericConfig> for NotificationConfig {
    fn from(config: GenericConfig) -> Self {
        Self::Generic(config)
    }
}

impl Serialize for NotificationConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NotificationConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let header = Header::read(&value).map_err(de::Error::custom)?;
        Self::from_json(&header.type_name, value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_known_type() {
        let config: NotificationConfig = serde_json::from_value(json!({
            "id": "n1",
            "type": "PAGER_DUTY",
            "name": "On call",
            "alertingProfile": "ap",
            "active": true,
            "account": "acme",
            "serviceName": "web",
            "serviceApiKey": null
        }))
        .unwrap();

        assert_eq!(config.type_name(), "PAGER_DUTY");
        assert_eq!(config.id(), Some("n1"));
        let pd = PagerDutyConfig::try_from(config).unwrap();
        assert_eq!(pd.account, "acme");
        assert_eq!(pd.service_api_key, None);
        assert!(pd.unknowns.is_empty());
    }

    #[test]
    fn test_unknown_type_round_trips_generically() {
        let raw = json!({
            "type": "CARRIER_PIGEON",
            "name": "Coo",
            "alertingProfile": "ap",
            "active": false,
            "loft": "north",
            "birds": 3
        });
        let config: NotificationConfig = serde_json::from_value(raw.clone()).unwrap();

        let NotificationConfig::Generic(generic) = &config else {
            panic!("expected generic variant, got {config:?}");
        };
        assert_eq!(generic.type_name, "CARRIER_PIGEON");
        assert_eq!(generic.unknowns.get("birds"), Some(&json!(3)));
        assert_eq!(serde_json::to_value(&config).unwrap(), raw);
    }

    #[test]
    fn test_encode_stamps_type() {
        let config = NotificationConfig::from(EmailConfig {
            name: "Mail".to_string(),
            alerting_profile: "ap".to_string(),
            subject: "s".to_string(),
            receivers: vec!["ops@example.com".to_string()],
            ..EmailConfig::default()
        });
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], "EMAIL");
        assert_eq!(value["receivers"], json!(["ops@example.com"]));
        assert!(value.get("id").is_none());
        assert!(value.get("ccReceivers").is_none());
    }

    #[test]
    fn test_try_from_wrong_variant() {
        let config = NotificationConfig::from(EmailConfig::default());
        let err = SlackConfig::try_from(config).unwrap_err();
        assert!(matches!(
            err,
            Error::VariantMismatch { expected: "SLACK", ref found } if found == "EMAIL"
        ));
    }

    #[test]
    fn test_ansible_tower_field_names() {
        let config: NotificationConfig = serde_json::from_value(json!({
            "type": "ANSIBLETOWER",
            "jobTemplateURL": "https://tower/job/7",
            "jobTemplateID": 7
        }))
        .unwrap();
        let tower = AnsibleTowerConfig::try_from(config).unwrap();
        assert_eq!(tower.job_template_url, "https://tower/job/7");
        assert_eq!(tower.job_template_id, 7);
    }

    #[test]
    fn test_block_names_are_unique() {
        let mut blocks = NotificationConfig::BLOCKS.to_vec();
        blocks.sort_unstable();
        blocks.dedup();
        assert_eq!(blocks.len(), NotificationConfig::BLOCKS.len());
        assert_eq!(NotificationConfig::block_schema().len(), blocks.len());
    }
}
