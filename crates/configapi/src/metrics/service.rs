//! Service client for calculated service metrics.

use super::model::CalculatedServiceMetric;
use crate::api::{Entity, EntityShortRepresentation, StubList};
use crate::error::Result;
use crate::service::{Collection, Service};
use restkit::Client;
use std::sync::Arc;

/// Collection path of calculated service metrics.
pub const PATH: &str = "/calculatedMetrics/service";

/// Service client for calculated service metrics.
///
/// The metric key is chosen by the caller, so create sends it along instead
/// of rejecting it.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    metrics: Collection,
}

impl ServiceClient {
    /// Create a service client.
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            metrics: Collection::new(client, PATH, CalculatedServiceMetric::KIND),
        }
    }
}

impl Service for ServiceClient {
    type Entity = CalculatedServiceMetric;

    fn list(&self) -> Result<StubList> {
        self.metrics.list()
    }

    fn get(&self, key: &str) -> Result<CalculatedServiceMetric> {
        self.metrics.get(key)
    }

    fn create(&self, metric: &CalculatedServiceMetric) -> Result<EntityShortRepresentation> {
        self.metrics.create(metric, 201)
    }

    fn update(&self, metric: &CalculatedServiceMetric) -> Result<()> {
        self.metrics.update(metric.id(), metric)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.metrics.delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_create_sends_chosen_key() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Post,
            "/calculatedMetrics/service",
            201,
            r#"{"id": "calc:service.latency", "name": "Latency"}"#,
        );

        let metric = CalculatedServiceMetric {
            tsm_metric_key: "calc:service.latency".to_string(),
            name: "Latency".to_string(),
            ..CalculatedServiceMetric::default()
        };
        let stub = service(&mock).create(&metric).unwrap();
        assert_eq!(stub.id, "calc:service.latency");

        let body: serde_json::Value = mock.requests()[0].json().unwrap();
        assert_eq!(body["tsmMetricKey"], "calc:service.latency");
    }

    #[test]
    fn test_update_uses_key_in_path() {
        let mock = MockTransport::new();
        mock.respond(Method::Put, "/calculatedMetrics/service/calc:service.latency", 204, "");

        let metric = CalculatedServiceMetric {
            tsm_metric_key: "calc:service.latency".to_string(),
            ..CalculatedServiceMetric::default()
        };
        service(&mock).update(&metric).unwrap();
        assert_eq!(
            mock.requests()[0].url,
            "https://env/api/config/v1/calculatedMetrics/service/calc:service.latency"
        );
    }

    #[test]
    fn test_update_without_key_fails_before_http() {
        let mock = MockTransport::new();
        let err = service(&mock)
            .update(&CalculatedServiceMetric::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingId { operation: "update", .. }));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_server_error_surfaces_status() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            "/calculatedMetrics/service/calc:service.gone",
            404,
            r#"{"error": {"code": 404, "message": "not found"}}"#,
        );
        let err = service(&mock).get("calc:service.gone").unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
