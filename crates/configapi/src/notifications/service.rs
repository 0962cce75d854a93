//! Service client for notifications.

use super::record::NotificationRecord;
use crate::api::{Entity, EntityShortRepresentation, StubList};
use crate::error::Result;
use crate::service::{Collection, Service};
use restkit::Client;
use std::sync::Arc;

/// Collection path of notifications.
pub const PATH: &str = "/notifications";

/// Service client for notifications.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    notifications: Collection,
}

impl ServiceClient {
    /// Create a service client.
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            notifications: Collection::new(client, PATH, NotificationRecord::KIND),
        }
    }
}

impl Service for ServiceClient {
    type Entity = NotificationRecord;

    fn list(&self) -> Result<StubList> {
        self.notifications.list()
    }

    fn get(&self, id: &str) -> Result<NotificationRecord> {
        self.notifications.get(id)
    }

    // The notification endpoint answers a create with 200, not 201.
    fn create(&self, record: &NotificationRecord) -> Result<EntityShortRepresentation> {
        self.notifications.reject_existing(record.id())?;
        self.notifications.create(record, 200)
    }

    fn update(&self, record: &NotificationRecord) -> Result<()> {
        self.notifications.update(record.id(), record)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.notifications.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::notifications::{NotificationConfig, WebhookConfig};
    use restkit::{Credentials, Method, MockTransport};

    fn service(mock: &MockTransport) -> ServiceClient {
        let client = Client::with_transport(
            "https://env/api/config/v1",
            Credentials::api_token("t"),
            Box::new(mock.clone()),
        );
        ServiceClient::new(Arc::new(client))
    }

    #[test]
    fn test_get_dispatches_on_type() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            "/notifications/n1",
            200,
            r#"{"id": "n1", "type": "WEBHOOK", "name": "Hook", "alertingProfile": "ap",
                "active": true, "url": "https://hook", "payload": "{}",
                "headers": [{"name": "X-Token", "value": null}]}"#,
        );

        let record = service(&mock).get("n1").unwrap();
        let NotificationConfig::Webhook(hook) = record.config else {
            panic!("expected webhook");
        };
        assert_eq!(hook.headers[0].name, "X-Token");
        assert_eq!(hook.headers[0].value, None);
    }

    #[test]
    fn test_create_posts_typed_payload() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/notifications", 200, r#"{"id": "n9", "name": "Hook"}"#);

        let record = NotificationRecord::new(WebhookConfig {
            name: "Hook".to_string(),
            alerting_profile: "ap".to_string(),
            url: "https://hook".to_string(),
            ..WebhookConfig::default()
        });
        let stub = service(&mock).create(&record).unwrap();
        assert_eq!(stub.id, "n9");

        let body: serde_json::Value = mock.requests()[0].json().unwrap();
        assert_eq!(body["type"], "WEBHOOK");
        assert_eq!(body["alertingProfile"], "ap");
    }

    #[test]
    fn test_create_with_id_fails_before_http() {
        let mock = MockTransport::new();
        let mut record = NotificationRecord::new(WebhookConfig::default());
        record.set_id(Some("n1".to_string()));

        let err = service(&mock).create(&record).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { kind: "notification", .. }));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_update_and_delete() {
        let mock = MockTransport::new();
        mock.respond(Method::Put, "/notifications/n1", 204, "");
        mock.respond(Method::Delete, "/notifications/n1", 204, "");

        let mut record = NotificationRecord::new(WebhookConfig::default());
        record.set_id(Some("n1".to_string()));
        let service = service(&mock);
        service.update(&record).unwrap();
        service.delete("n1").unwrap();

        assert_eq!(mock.requests().len(), 2);
        let body: serde_json::Value = mock.requests_with(Method::Put)[0].json().unwrap();
        assert_eq!(body["id"], "n1");
    }
}
