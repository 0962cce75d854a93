//! # configapi
//!
//! Typed models and service clients for a monitoring configuration REST API.
//!
//! This crate provides functionality for:
//! - Entity models with a JSON wire form and a declarative (HCL-style) form
//! - Preservation of fields this client does not model ([`Unknowns`])
//! - Discriminated unions dispatched on `type`, with a generic fallback
//! - Blocking CRUD service clients per resource family
//! - Key user action reconciliation and creation polling for web applications
//!
//! ## Example
//!
//! ```no_run
//! use configapi::{Environment, Service};
//! use restkit::Credentials;
//!
//! let env = Environment::new(
//!     "https://env.example.com/api/config/v1",
//!     Credentials::api_token("dt0c01.ABC"),
//! );
//!
//! for stub in env.notifications().list().expect("list failed").values {
//!     println!("{stub}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

#[macro_use]
mod macros;

pub mod api;
pub mod autotags;
pub mod dashboards;
pub mod error;
pub mod metrics;
pub mod notifications;
pub mod service;
pub mod webapp;

pub use api::{Entity, EntityShortRepresentation, StubList, Unknowns};
pub use error::{Error, ErrorCategory, Result};
pub use service::Service;

use restkit::{Client, Credentials};
use std::sync::Arc;

/// One monitoring environment: a shared HTTP client and a service client per
/// resource family.
#[derive(Debug, Clone)]
pub struct Environment {
    client: Arc<Client>,
}

impl Environment {
    /// Connect to the configuration API at `base_url`.
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        Self::with_client(Client::new(base_url, credentials))
    }

    /// Wrap an existing client, e.g. one using a mock transport.
    pub fn with_client(client: Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// The shared HTTP client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Web applications.
    pub fn web_applications(&self) -> webapp::ServiceClient {
        webapp::ServiceClient::new(Arc::clone(&self.client))
    }

    /// Dashboards.
    pub fn dashboards(&self) -> dashboards::ServiceClient {
        dashboards::ServiceClient::new(Arc::clone(&self.client))
    }

    /// Notifications.
    pub fn notifications(&self) -> notifications::ServiceClient {
        notifications::ServiceClient::new(Arc::clone(&self.client))
    }

    /// Calculated service metrics.
    pub fn calculated_service_metrics(&self) -> metrics::ServiceClient {
        metrics::ServiceClient::new(Arc::clone(&self.client))
    }

    /// Auto-tags.
    pub fn auto_tags(&self) -> autotags::ServiceClient {
        autotags::ServiceClient::new(Arc::clone(&self.client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restkit::{Method, MockTransport};

    #[test]
    fn test_services_share_one_client() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/autoTags", 200, r#"{"values": []}"#);
        mock.respond(Method::Get, "/notifications", 200, r#"{"values": []}"#);

        let env = Environment::with_client(Client::with_transport(
            "https://env/api/config/v1/",
            Credentials::api_token("t"),
            Box::new(mock.clone()),
        ));
        assert!(env.auto_tags().list().unwrap().is_empty());
        assert!(env.notifications().list().unwrap().is_empty());
        assert_eq!(mock.requests().len(), 2);
        assert_eq!(env.client().base_url(), "https://env/api/config/v1");
    }
}
