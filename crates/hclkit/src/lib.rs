//! # hclkit
//!
//! Declarative configuration trees for Rust types.
//!
//! This crate provides functionality for:
//! - Encoding structs into a nested block/attribute tree ([`Properties`])
//! - Decoding them back, with "absent means unset" semantics
//! - Describing the accepted attributes with a [`Schema`]
//! - Validating trees against schemas
//! - Rendering trees as HCL text
//!
//! ## Example
//!
//! ```
//! use hclkit::{Attribute, Marshaler, Properties, Result, Schema, Schematic, Unmarshaler};
//!
//! struct Channel {
//!     name: String,
//!     url: Option<String>,
//! }
//!
//! impl Marshaler for Channel {
//!     fn marshal_hcl(&self, properties: &mut Properties) -> Result<()> {
//!         properties.encode("name", &self.name);
//!         properties.encode_opt("url", self.url.as_ref());
//!         Ok(())
//!     }
//! }
//!
//! impl Unmarshaler for Channel {
//!     fn unmarshal_hcl(decoder: &Properties) -> Result<Self> {
//!         Ok(Self {
//!             name: decoder.decode("name")?,
//!             url: decoder.decode_opt("url")?,
//!         })
//!     }
//! }
//!
//! impl Schematic for Channel {
//!     fn schema() -> Schema {
//!         Schema::new()
//!             .attr("name", Attribute::string().required())
//!             .attr("url", Attribute::string())
//!     }
//! }
//!
//! let channel = Channel { name: "ops".into(), url: None };
//! let properties = channel.to_properties().unwrap();
//! assert!(!properties.contains_key("url"));
//! hclkit::validate(&Channel::schema(), &properties).unwrap();
//!
//! let decoded = Channel::unmarshal_hcl(&properties).unwrap();
//! assert_eq!(decoded.name, "ops");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod properties;
pub mod render;
pub mod schema;
pub mod validate;
pub mod value;

pub use codec::{Marshaler, Schematic, Unmarshaler};
pub use error::{Error, Result};
pub use properties::Properties;
pub use render::{render_body, render_resource};
pub use schema::{Attribute, Kind, Schema};
pub use validate::{deprecations, validate};
pub use value::{FromValue, ToValue, Value};
