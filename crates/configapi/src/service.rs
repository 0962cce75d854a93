//! The CRUD contract shared by all service clients.

use crate::api::{Entity, EntityShortRepresentation, StubList};
use crate::error::{Error, Result, require_id};
use log::info;
use restkit::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// CRUD operations of one resource family.
///
/// Calls are blocking and sequential. Operations that address an existing
/// entity fail locally, before any HTTP call, when the ID is missing; create
/// fails locally when the entity already has an ID.
pub trait Service {
    /// The entity this service manages.
    type Entity: Entity;

    /// List all entities as stubs.
    fn list(&self) -> Result<StubList>;

    /// Fetch one entity by ID.
    fn get(&self, id: &str) -> Result<Self::Entity>;

    /// Create an entity and return its stub.
    fn create(&self, entity: &Self::Entity) -> Result<EntityShortRepresentation>;

    /// Replace an existing entity (full payload).
    fn update(&self, entity: &Self::Entity) -> Result<()>;

    /// Delete an entity by ID.
    fn delete(&self, id: &str) -> Result<()>;
}

/// Plain CRUD against one collection path.
#[derive(Debug, Clone)]
pub(crate) struct Collection {
    client: Arc<Client>,
    path: &'static str,
    kind: &'static str,
}

impl Collection {
    pub(crate) fn new(client: Arc<Client>, path: &'static str, kind: &'static str) -> Self {
        Self { client, path, kind }
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn path(&self) -> &'static str {
        self.path
    }

    pub(crate) fn item(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }

    /// Fail with [`Error::AlreadyExists`] if `id` is set.
    pub(crate) fn reject_existing(&self, id: Option<&str>) -> Result<()> {
        match id {
            Some(id) if !id.is_empty() => Err(Error::AlreadyExists {
                kind: self.kind,
                id: id.to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub(crate) fn list(&self) -> Result<StubList> {
        Ok(self.client.get(self.path, 200)?)
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        let id = require_id(self.kind, "get", Some(id))?;
        Ok(self.client.get(&self.item(id), 200)?)
    }

    pub(crate) fn create<T: Serialize>(
        &self,
        entity: &T,
        expected: u16,
    ) -> Result<EntityShortRepresentation> {
        let stub: EntityShortRepresentation =
            self.client.post(self.path, entity, expected)?.json()?;
        info!("Created {} {}", self.kind, stub);
        Ok(stub)
    }

    pub(crate) fn update<T: Serialize>(&self, id: Option<&str>, entity: &T) -> Result<()> {
        let id = require_id(self.kind, "update", id)?;
        self.client.put(&self.item(id), entity, 204)?;
        info!("Updated {} {id}", self.kind);
        Ok(())
    }

    pub(crate) fn delete(&self, id: &str) -> Result<()> {
        let id = require_id(self.kind, "delete", Some(id))?;
        self.client.delete(&self.item(id), 204)?;
        info!("Deleted {} {id}", self.kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restkit::{Credentials, Method, MockTransport};

    fn collection(mock: &MockTransport) -> Collection {
        let client = Client::with_transport(
            "https://env/api/config/v1",
            Credentials::api_token("t"),
            Box::new(mock.clone()),
        );
        Collection::new(Arc::new(client), "/things", "thing")
    }

    #[test]
    fn test_delete_empty_id_makes_no_request() {
        let mock = MockTransport::new();
        let err = collection(&mock).delete("").unwrap_err();
        assert!(matches!(err, Error::MissingId { operation: "delete", .. }));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_update_without_id_makes_no_request() {
        let mock = MockTransport::new();
        let result = collection(&mock).update(None, &serde_json::json!({}));
        assert!(matches!(result, Err(Error::MissingId { operation: "update", .. })));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_reject_existing() {
        let mock = MockTransport::new();
        let things = collection(&mock);
        assert!(things.reject_existing(None).is_ok());
        assert!(things.reject_existing(Some("")).is_ok());
        assert!(matches!(
            things.reject_existing(Some("T-1")),
            Err(Error::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_create_parses_stub() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/things", 201, r#"{"id": "T-1", "name": "one"}"#);
        let stub = collection(&mock)
            .create(&serde_json::json!({"name": "one"}), 201)
            .unwrap();
        assert_eq!(stub.id, "T-1");
    }

    #[test]
    fn test_delete_path() {
        let mock = MockTransport::new();
        mock.respond(Method::Delete, "/things/T-1", 204, "");
        collection(&mock).delete("T-1").unwrap();
        assert_eq!(
            mock.requests()[0].url,
            "https://env/api/config/v1/things/T-1"
        );
    }
}
