//! Service client for dashboards.

use super::model::Dashboard;
use crate::api::{Entity, EntityShortRepresentation, StubList};
use crate::error::Result;
use crate::service::{Collection, Service};
use restkit::{Client, Query};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Collection path of dashboards.
pub const PATH: &str = "/dashboards";

/// Response body of the dashboard collection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardList {
    /// The dashboards.
    pub dashboards: Vec<EntityShortRepresentation>,
}

/// Filters for listing dashboards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilterQuery {
    /// Only dashboards owned by this user.
    pub owner: Option<String>,
    /// Only dashboards carrying all of these tags.
    pub tags: Vec<String>,
}

impl DashboardFilterQuery {
    fn query(&self) -> Query {
        Query::new()
            .param_opt("owner", self.owner.as_deref())
            .param_all("tags", &self.tags)
    }
}

/// Service client for dashboards.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    dashboards: Collection,
}

impl ServiceClient {
    /// Create a service client.
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            dashboards: Collection::new(client, PATH, Dashboard::KIND),
        }
    }

    /// List dashboards matching `filter`.
    pub fn list_filtered(&self, filter: &DashboardFilterQuery) -> Result<StubList> {
        let path = filter.query().apply(self.dashboards.path());
        let list: DashboardList = self.dashboards.client().get(&path, 200)?;
        Ok(StubList::from(list.dashboards))
    }
}

impl Service for ServiceClient {
    type Entity = Dashboard;

    fn list(&self) -> Result<StubList> {
        self.list_filtered(&DashboardFilterQuery::default())
    }

    fn get(&self, id: &str) -> Result<Dashboard> {
        self.dashboards.get(id)
    }

    fn create(&self, dashboard: &Dashboard) -> Result<EntityShortRepresentation> {
        self.dashboards.reject_existing(dashboard.id.as_deref())?;
        self.dashboards.create(dashboard, 201)
    }

    fn update(&self, dashboard: &Dashboard) -> Result<()> {
        self.dashboards.update(dashboard.id.as_deref(), dashboard)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.dashboards.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::model::DashboardMetadata;
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
    fn test_list_with_owner_and_tags() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            "/dashboards?owner=ops%40example.com&tags=prod&tags=web",
            200,
            r#"{"dashboards": [{"id": "d1", "name": "Health", "owner": "ops@example.com"}]}"#,
        );

        let list = service(&mock)
            .list_filtered(&DashboardFilterQuery {
                owner: Some("ops@example.com".to_string()),
                tags: vec!["prod".to_string(), "web".to_string()],
            })
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.values[0].id, "d1");
        assert!(list.values[0].unknowns.contains_key("owner"));
    }

    #[test]
    fn test_list_without_filters_has_no_query() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/dashboards", 200, r#"{"dashboards": []}"#);
        assert!(service(&mock).list().unwrap().is_empty());
        assert_eq!(
            mock.requests()[0].url,
            "https://env/api/config/v1/dashboards"
        );
    }

    #[test]
    fn test_create_and_update_statuses() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/dashboards", 201, r#"{"id": "d1", "name": "Health"}"#);
        mock.respond(Method::Put, "/dashboards/d1", 204, "");

        let mut dashboard = Dashboard {
            dashboard_metadata: DashboardMetadata {
                name: "Health".to_string(),
                owner: "ops".to_string(),
                ..DashboardMetadata::default()
            },
            ..Dashboard::default()
        };
        let service = service(&mock);
        let stub = service.create(&dashboard).unwrap();
        dashboard.id = Some(stub.id);
        service.update(&dashboard).unwrap();

        let put: serde_json::Value = mock.requests_with(Method::Put)[0].json().unwrap();
        assert_eq!(put["id"], "d1");
    }

    #[test]
    fn test_create_with_id_fails_before_http() {
        let mock = MockTransport::new();
        let dashboard = Dashboard {
            id: Some("d1".to_string()),
            ..Dashboard::default()
        };
        let err = service(&mock).create(&dashboard).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));
        assert!(mock.requests().is_empty());
    }
}
