//! Traits implemented by every type with a declarative representation.

use crate::error::Result;
use crate::properties::Properties;
use crate::schema::Schema;

/// Encoding into a declarative property tree.
pub trait Marshaler {
    /// Write this value's attributes into `properties`.
    ///
    /// Unset optional fields must not be written.
    fn marshal_hcl(&self, properties: &mut Properties) -> Result<()>;

    /// Encode into a fresh property map.
    fn to_properties(&self) -> Result<Properties> {
        let mut properties = Properties::new();
        self.marshal_hcl(&mut properties)?;
        Ok(properties)
    }
}

/// Decoding from a declarative property tree.
pub trait Unmarshaler: Sized {
    /// Build a value from the attributes in `decoder`.
    ///
    /// Absent attributes leave fields at their zero value unless the type
    /// documents a default-on-absence.
    fn unmarshal_hcl(decoder: &Properties) -> Result<Self>;
}

/// Types that can describe their own declarative schema.
pub trait Schematic {
    /// The attribute schema for this type.
    fn schema() -> Schema;
}
