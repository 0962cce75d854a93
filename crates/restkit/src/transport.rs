//! Transports that carry requests to the server.
//!
//! [`Transport`] is the seam between the client and the network.
//! [`UreqTransport`] talks HTTP; [`MockTransport`] answers from canned
//! responses and records every request, for tests without network access:
//!
//! ```
//! use restkit::transport::{Method, MockTransport, Request, Transport};
//!
//! let mock = MockTransport::new();
//! mock.respond(Method::Get, "/dashboards", 200, r#"{"dashboards": []}"#);
//!
//! let response = mock
//!     .execute(&Request::new(Method::Get, "https://env/api/config/v1/dashboards"))
//!     .unwrap();
//! assert_eq!(response.status, 200);
//! assert_eq!(mock.requests().len(), 1);
//! ```

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Default timeout for a whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP methods used by the configuration API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// Uppercase method name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Full URL including query string.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Request body, if any.
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Create a request without headers or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Look up a header value (case-insensitive name).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(self.body.as_deref().unwrap_or(b"null"))?)
    }
}

/// A received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// The body as (lossy) UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Something that can execute a request.
///
/// Implementations must not treat non-2xx statuses as errors; status
/// assertions belong to [`Client`](crate::Client).
pub trait Transport: Send + Sync {
    /// Execute a request and return the raw response.
    fn execute(&self, request: &Request) -> Result<Response>;
}

// =============================================================================
// ureq
// =============================================================================

/// Blocking HTTP transport backed by `ureq`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Create a transport with [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom overall request timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.into(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: &Request) -> Result<Response> {
        let url = request.url.as_str();
        let result = match request.method {
            Method::Get => with_headers(self.agent.get(url), &request.headers).call(),
            Method::Delete => with_headers(self.agent.delete(url), &request.headers).call(),
            Method::Post => {
                let builder = with_headers(self.agent.post(url), &request.headers);
                match &request.body {
                    Some(body) => builder.send(body.as_slice()),
                    None => builder.send_empty(),
                }
            }
            Method::Put => {
                let builder = with_headers(self.agent.put(url), &request.headers);
                match &request.body {
                    Some(body) => builder.send(body.as_slice()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response =
            result.map_err(|e| Error::transport(request.method, url, e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| Error::transport(request.method, url, e.to_string()))?;

        Ok(Response { status, body })
    }
}

// =============================================================================
// Mock
// =============================================================================

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    responses: VecDeque<Response>,
}

#[derive(Debug, Default)]
struct MockState {
    routes: Vec<Route>,
    requests: Vec<Request>,
}

/// In-memory transport for tests.
///
/// Responses are registered per method and URL suffix. Several responses for
/// the same route are returned in order; the last one repeats. Every executed
/// request is recorded. Clones share state, so a test can hand one clone to
/// a client and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Create a mock with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a response for requests whose URL ends with `path`.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        let response = Response::new(status, body);
        let mut state = self.lock();
        if let Some(route) = state
            .routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            route.responses.push_back(response);
        } else {
            state.routes.push(Route {
                method,
                path: path.to_string(),
                responses: VecDeque::from([response]),
            });
        }
    }

    /// Queue a JSON response.
    pub fn respond_json<T: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: &T,
    ) -> Result<()> {
        let bytes = serde_json::to_vec(body)?;
        self.respond(method, path, status, bytes);
        Ok(())
    }

    /// All requests executed so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    /// Requests with the given method, in order.
    #[must_use]
    pub fn requests_with(&self, method: Method) -> Vec<Request> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: &Request) -> Result<Response> {
        let mut state = self.lock();
        state.requests.push(request.clone());

        // Longest matching suffix wins, so "/web/APP-1" beats "/APP-1".
        let route = state
            .routes
            .iter_mut()
            .filter(|r| r.method == request.method && request.url.ends_with(&r.path))
            .max_by_key(|r| r.path.len())
            .ok_or_else(|| {
                Error::transport(
                    request.method,
                    request.url.clone(),
                    "no mock response configured",
                )
            })?;

        let response = if route.responses.len() > 1 {
            route.responses.pop_front()
        } else {
            route.responses.front().cloned()
        };
        response.ok_or_else(|| {
            Error::transport(request.method, request.url.clone(), "mock route exhausted")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_returns_queued_then_repeats_last() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/x", 404, "missing");
        mock.respond(Method::Get, "/x", 200, "{}");

        let request = Request::new(Method::Get, "https://env/x");
        assert_eq!(mock.execute(&request).unwrap().status, 404);
        assert_eq!(mock.execute(&request).unwrap().status, 200);
        assert_eq!(mock.execute(&request).unwrap().status, 200);
        assert_eq!(mock.requests().len(), 3);
    }

    #[test]
    fn test_mock_unrouted_request_fails() {
        let mock = MockTransport::new();
        let err = mock
            .execute(&Request::new(Method::Delete, "https://env/x"))
            .unwrap_err();
        assert!(err.to_string().contains("no mock response configured"));
        assert_eq!(mock.requests_with(Method::Delete).len(), 1);
    }

    #[test]
    fn test_mock_prefers_longest_suffix() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/APP-1", 500, "");
        mock.respond(Method::Get, "/web/APP-1", 200, "");
        let response = mock
            .execute(&Request::new(Method::Get, "https://env/applications/web/APP-1"))
            .unwrap();
        assert_eq!(response.status, 200);
    }

    #[test]
    fn test_mock_matches_method() {
        let mock = MockTransport::new();
        mock.respond(Method::Put, "/x", 204, "");
        assert!(mock.execute(&Request::new(Method::Get, "https://env/x")).is_err());
        assert!(mock.execute(&Request::new(Method::Put, "https://env/x")).is_ok());
    }

    #[test]
    fn test_request_header_lookup_is_case_insensitive() {
        let mut request = Request::new(Method::Get, "https://env/x");
        request
            .headers
            .push(("Authorization".to_string(), "Api-Token t".to_string()));
        assert_eq!(request.header("authorization"), Some("Api-Token t"));
    }

    #[test]
    fn test_response_text_and_json() {
        let response = Response::new(200, r#"{"id": "a"}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["id"], "a");
        assert_eq!(response.text(), r#"{"id": "a"}"#);
    }
}
