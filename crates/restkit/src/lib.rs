//! # restkit
//!
//! Blocking JSON REST client for configuration APIs.
//!
//! This crate provides functionality for:
//! - Token credentials (`Api-Token` or `Bearer`)
//! - Status-asserting GET/POST/PUT/DELETE with JSON bodies
//! - Query string construction
//! - Fixed-delay polling for eventually-consistent resources
//! - A pluggable [`Transport`] with an in-memory [`MockTransport`] for tests
//!
//! ## Example
//!
//! ```no_run
//! use restkit::{Client, Credentials};
//!
//! let client = Client::new(
//!     "https://env.example.com/api/config/v1",
//!     Credentials::api_token("dt0c01.ABC"),
//! );
//!
//! let stubs: serde_json::Value = client.get("/notifications", 200).expect("request failed");
//! println!("{stubs}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod credentials;
pub mod error;
pub mod poll;
pub mod query;
pub mod transport;

pub use client::Client;
pub use credentials::{AuthScheme, Credentials};
pub use error::{Error, ErrorCategory, Result};
pub use poll::{LogCallback, NoCallback, PollCallback, PollConfig, poll};
pub use query::Query;
pub use transport::{Method, MockTransport, Request, Response, Transport, UreqTransport};
