//! Service client for auto-tags.

use super::model::AutoTag;
use crate::api::{Entity, EntityShortRepresentation, StubList};
use crate::error::Result;
use crate::service::{Collection, Service};
use restkit::Client;
use std::sync::Arc;

/// Collection path of auto-tags.
pub const PATH: &str = "/autoTags";

/// Service client for auto-tags.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    tags: Collection,
}

impl ServiceClient {
    /// Create a service client.
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            tags: Collection::new(client, PATH, AutoTag::KIND),
        }
    }
}

impl Service for ServiceClient {
    type Entity = AutoTag;

    fn list(&self) -> Result<StubList> {
        self.tags.list()
    }

    fn get(&self, id: &str) -> Result<AutoTag> {
        self.tags.get(id)
    }

    fn create(&self, tag: &AutoTag) -> Result<EntityShortRepresentation> {
        self.tags.reject_existing(tag.id())?;
        self.tags.create(tag, 201)
    }

    fn update(&self, tag: &AutoTag) -> Result<()> {
        self.tags.update(tag.id(), tag)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.tags.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autotags::{AutoTagRule, MeType};
    use crate::error::Error;
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
    fn test_list() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            "/autoTags",
            200,
            r#"{"values": [{"id": "a1", "name": "team"}, {"id": "a2", "name": "env"}]}"#,
        );
        let list = service(&mock).list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.values[1].name, "env");
    }

    #[test]
    fn test_create_then_delete() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/autoTags", 201, r#"{"id": "a1", "name": "team"}"#);
        mock.respond(Method::Delete, "/autoTags/a1", 204, "");

        let tag = AutoTag {
            name: "team".to_string(),
            rules: vec![AutoTagRule {
                rule_type: MeType::Host,
                enabled: true,
                ..AutoTagRule::default()
            }],
            ..AutoTag::default()
        };
        let service = service(&mock);
        let stub = service.create(&tag).unwrap();
        service.delete(&stub.id).unwrap();

        let body: serde_json::Value = mock.requests_with(Method::Post)[0].json().unwrap();
        assert_eq!(body["rules"][0]["type"], "HOST");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn test_delete_blank_id_fails_before_http() {
        let mock = MockTransport::new();
        let err = service(&mock).delete("  ").unwrap_err();
        assert!(matches!(err, Error::MissingId { .. }));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_unexpected_status_is_an_error() {
        let mock = MockTransport::new();
        mock.respond(Method::Put, "/autoTags/a1", 400, r#"{"error": {"code": 400}}"#);
        let tag = AutoTag {
            id: Some("a1".to_string()),
            ..AutoTag::default()
        };
        let err = service(&mock).update(&tag).unwrap_err();
        assert_eq!(err.status(), Some(400));
    }
}
