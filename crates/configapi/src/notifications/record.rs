//! The notification entity.

use super::model::NotificationConfig;
use crate::api::{Entity, single_variant};
use hclkit::{Marshaler, Properties, Schema, Schematic, Unmarshaler};
use serde::{Deserialize, Serialize};

/// A notification as stored by the server.
///
/// On the wire this is exactly the channel payload, dispatched on `type`. In
/// the declarative form it is a wrapper holding one block named after the
/// channel (`slack { ... }`, `email { ... }`, or `config { ... }` for types
/// this client does not model).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationRecord {
    /// The channel configuration.
    pub config: NotificationConfig,
}

impl NotificationRecord {
    /// Wrap a channel configuration.
    pub fn new(config: impl Into<NotificationConfig>) -> Self {
        Self {
            config: config.into(),
        }
    }

    /// The wire discriminator of the wrapped channel.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.config.type_name()
    }
}

impl From<NotificationConfig> for NotificationRecord {
    fn from(config: NotificationConfig) -> Self {
        Self { config }
    }
}

impl Entity for NotificationRecord {
    const KIND: &'static str = "notification";
    const RESOURCE_TYPE: &'static str = "notification";

    fn id(&self) -> Option<&str> {
        self.config.id()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.config.set_id(id);
    }

    fn name(&self) -> &str {
        self.config.name()
    }
}

impl Marshaler for NotificationRecord {
    fn marshal_hcl(&self, properties: &mut Properties) -> hclkit::Result<()> {
        self.config.marshal_block(properties)
    }
}

impl Unmarshaler for NotificationRecord {
    fn unmarshal_hcl(decoder: &Properties) -> hclkit::Result<Self> {
        match single_variant(decoder, NotificationConfig::BLOCKS)? {
            Some(block) => Ok(Self::from(NotificationConfig::unmarshal_block(block, decoder)?)),
            None => Err(hclkit::Error::invalid(
                NotificationConfig::BLOCKS.join(", "),
                "exactly one notification block must be set",
            )),
        }
    }
}

impl Schematic for NotificationRecord {
    fn schema() -> Schema {
        NotificationConfig::block_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::channels::{GenericConfig, SlackConfig, WebhookConfig};
    use serde_json::json;

    #[test]
    fn test_slack_payload_decodes_into_slack_config() {
        let record: NotificationRecord = serde_json::from_value(json!({
            "id": "n1",
            "type": "SLACK",
            "name": "Ops channel",
            "alertingProfile": "ap-1",
            "active": true,
            "url": "https://hooks.slack.com/x",
            "channel": "#ops",
            "title": "{ProblemTitle}"
        }))
        .unwrap();

        assert_eq!(record.type_name(), "SLACK");
        assert_eq!(record.id(), Some("n1"));
        let slack = SlackConfig::try_from(record.config).unwrap();
        assert_eq!(slack.name, "Ops channel");
        assert_eq!(slack.alerting_profile, "ap-1");
        assert!(slack.active);
        assert_eq!(slack.url.as_deref(), Some("https://hooks.slack.com/x"));
        assert_eq!(slack.channel, "#ops");
        assert_eq!(slack.title, "{ProblemTitle}");
        assert!(slack.unknowns.is_empty());
    }

    #[test]
    fn test_declarative_round_trip_uses_channel_block() {
        let record = NotificationRecord::new(SlackConfig {
            name: "Ops".to_string(),
            alerting_profile: "ap".to_string(),
            active: true,
            channel: "#ops".to_string(),
            title: "t".to_string(),
            ..SlackConfig::default()
        });

        let props = record.to_properties().unwrap();
        assert!(props.contains_key("slack"));
        assert_eq!(props.len(), 1);

        let decoded = NotificationRecord::unmarshal_hcl(&props).unwrap();
        assert_eq!(decoded, record);
        hclkit::validate(&NotificationRecord::schema(), &props).unwrap();
    }

    #[test]
    fn test_declarative_generic_block() {
        let mut generic = GenericConfig {
            type_name: "CARRIER_PIGEON".to_string(),
            name: "Coo".to_string(),
            alerting_profile: "ap".to_string(),
            ..GenericConfig::default()
        };
        generic.unknowns.insert("loft", json!("north"));
        let record = NotificationRecord::new(generic);

        let props = record.to_properties().unwrap();
        assert!(props.contains_key("config"));
        let decoded = NotificationRecord::unmarshal_hcl(&props).unwrap();
        assert_eq!(decoded.type_name(), "CARRIER_PIGEON");
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_declarative_requires_exactly_one_block() {
        assert!(NotificationRecord::unmarshal_hcl(&Properties::new()).is_err());

        let slack = NotificationRecord::new(SlackConfig::default())
            .to_properties()
            .unwrap();
        let mut both = NotificationRecord::new(GenericConfig::default())
            .to_properties()
            .unwrap();
        for (key, value) in slack.iter() {
            both.insert(key.clone(), value.clone());
        }
        assert!(NotificationRecord::unmarshal_hcl(&both).is_err());
    }

    #[test]
    fn test_webhook_header_unknowns_survive() {
        let payload = json!({
            "type": "WEBHOOK",
            "name": "Hook",
            "alertingProfile": "ap",
            "active": true,
            "url": "https://hooks.example.com",
            "acceptAnyCertificate": false,
            "payload": "{ProblemID}",
            "headers": [{"name": "X-Token", "value": null, "secret": true}]
        });
        let record: NotificationRecord = serde_json::from_value(payload).unwrap();
        let webhook = WebhookConfig::try_from(record.config.clone()).unwrap();
        assert_eq!(webhook.headers[0].unknowns.get("secret"), Some(&json!(true)));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["headers"][0]["secret"], json!(true));

        let props = record.to_properties().unwrap();
        hclkit::validate(&NotificationRecord::schema(), &props).unwrap();
        assert_eq!(NotificationRecord::unmarshal_hcl(&props).unwrap(), record);
    }
}
