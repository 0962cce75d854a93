//! The REST client.

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::transport::{Method, Request, Response, Transport, UreqTransport};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!("cfgctl-restkit/", env!("CARGO_PKG_VERSION"));

/// Blocking JSON REST client.
///
/// Every call names the status codes it accepts; any other status becomes
/// [`Error::UnexpectedStatus`]. Calls are independent and sequential; the
/// client holds no per-call state.
///
/// ```
/// use restkit::{Client, Credentials, MockTransport, Method};
///
/// let mock = MockTransport::new();
/// mock.respond(Method::Get, "/notifications/abc", 200, r#"{"name": "ops"}"#);
///
/// let client = Client::with_transport(
///     "https://env.example.com/api/config/v1",
///     Credentials::api_token("token"),
///     Box::new(mock.clone()),
/// );
/// let value: serde_json::Value = client.get("/notifications/abc", 200).unwrap();
/// assert_eq!(value["name"], "ops");
///
/// let sent = &mock.requests()[0];
/// assert_eq!(sent.url, "https://env.example.com/api/config/v1/notifications/abc");
/// assert_eq!(sent.header("Authorization"), Some("Api-Token token"));
/// ```
pub struct Client {
    base_url: String,
    credentials: Credentials,
    transport: Box<dyn Transport>,
}

impl Client {
    /// Create a client talking HTTP through `ureq`.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self::with_transport(base_url, credentials, Box::new(UreqTransport::new()))
    }

    /// Create a client with a custom transport (useful for testing).
    pub fn with_transport(
        base_url: impl Into<String>,
        credentials: Credentials,
        transport: Box<dyn Transport>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            transport,
        }
    }

    /// The base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and assert its status.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        expected: &[u16],
    ) -> Result<Response> {
        let url = self.url(path);
        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), self.credentials.header_value()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        if body.is_some() {
            headers.push((
                "Content-Type".to_string(),
                "application/json; charset=utf-8".to_string(),
            ));
        }

        debug!("{method} {url}");
        let response = self.transport.execute(&Request {
            method,
            url: url.clone(),
            headers,
            body,
        })?;
        debug!("{method} {url} -> {}", response.status);

        if !expected.contains(&response.status) {
            return Err(Error::UnexpectedStatus {
                method,
                url,
                status: response.status,
                expected: expected.to_vec(),
                body: response.text(),
            });
        }
        Ok(response)
    }

    /// GET and decode the JSON body.
    pub fn get<T: DeserializeOwned>(&self, path: &str, expected: u16) -> Result<T> {
        self.request(Method::Get, path, None, &[expected])?.json()
    }

    /// POST a JSON body.
    pub fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        expected: u16,
    ) -> Result<Response> {
        let bytes = serde_json::to_vec(body)?;
        self.request(Method::Post, path, Some(bytes), &[expected])
    }

    /// PUT a JSON body.
    pub fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        expected: u16,
    ) -> Result<Response> {
        let bytes = serde_json::to_vec(body)?;
        self.request(Method::Put, path, Some(bytes), &[expected])
    }

    /// DELETE a resource.
    pub fn delete(&self, path: &str, expected: u16) -> Result<Response> {
        self.request(Method::Delete, path, None, &[expected])
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn client(mock: &MockTransport) -> Client {
        Client::with_transport(
            "https://env.example.com/api/config/v1/",
            Credentials::api_token("t"),
            Box::new(mock.clone()),
        )
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let mock = MockTransport::new();
        assert_eq!(
            client(&mock).url("/dashboards"),
            "https://env.example.com/api/config/v1/dashboards"
        );
    }

    #[test]
    fn test_unexpected_status_is_error() {
        let mock = MockTransport::new();
        mock.respond(Method::Put, "/dashboards/d1", 400, r#"{"error": "bad"}"#);
        let err = client(&mock)
            .put("/dashboards/d1", &serde_json::json!({}), 204)
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_post_sends_json_with_content_type() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/notifications", 200, r#"{"id": "n1"}"#);
        let response = client(&mock)
            .post("/notifications", &serde_json::json!({"name": "ops"}), 200)
            .unwrap();
        assert_eq!(response.status, 200);

        let sent = &mock.requests()[0];
        assert_eq!(sent.header("content-type"), Some("application/json; charset=utf-8"));
        let body: serde_json::Value = sent.json().unwrap();
        assert_eq!(body["name"], "ops");
    }

    #[test]
    fn test_get_without_body_has_no_content_type() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/dashboards", 200, "{}");
        let _: serde_json::Value = client(&mock).get("/dashboards", 200).unwrap();
        assert!(mock.requests()[0].header("Content-Type").is_none());
    }

    #[test]
    fn test_decode_error_propagates() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/dashboards", 200, "not json");
        let result: Result<serde_json::Value> = client(&mock).get("/dashboards", 200);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_delete_accepts_no_content() {
        let mock = MockTransport::new();
        mock.respond(Method::Delete, "/autoTags/a1", 204, "");
        assert!(client(&mock).delete("/autoTags/a1", 204).is_ok());
    }
}
