//! Helper macros shared by the model modules.

/// Define an enum serialized as a wire string.
///
/// Unrecognized strings decode into an `Unknown(String)` variant and are
/// written back verbatim, so newer server values survive a round trip. The
/// first variant is the `Default`.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident => $first_wire:literal,
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(#[$first_meta])*
            $first,
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            /// A value this client does not know about.
            Unknown(String),
        }

        impl $name {
            /// Wire values known to this client.
            pub const KNOWN: &'static [&'static str] = &[$first_wire, $($wire),*];

            /// The wire representation.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    Self::$first => $first_wire,
                    $(Self::$variant => $wire,)*
                    Self::Unknown(other) => other.as_str(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $first_wire => Self::$first,
                    $($wire => Self::$variant,)*
                    other => Self::Unknown(other.to_string()),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from(s.as_str()))
            }
        }

        impl hclkit::ToValue for $name {
            fn to_value(&self) -> hclkit::Value {
                hclkit::Value::String(self.as_str().to_string())
            }
        }

        impl hclkit::FromValue for $name {
            fn from_value(value: &hclkit::Value) -> hclkit::Result<Self> {
                <String as hclkit::FromValue>::from_value(value).map(|s| Self::from(s.as_str()))
            }
        }
    };
}

/// Define a comparison union dispatched on `type`.
///
/// Every variant carries a `negate: bool` field. On decode the flag is read
/// with the discriminator in the first pass and set on the variant after the
/// second. The declarative form is a wrapper holding `negate` and exactly one
/// variant block. Unknown discriminators decode into
/// [`GenericComparison`](crate::api::GenericComparison).
macro_rules! comparison_union {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident($ty:ident) => $type_name:literal, $block:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $(
                #[doc = concat!("`", $type_name, "` comparison.")]
                $variant($ty),
            )+
            /// A comparison type this client does not model.
            Generic($crate::api::GenericComparison),
        }

        impl $name {
            /// Declarative block names, one per variant.
            pub(crate) const BLOCKS: &'static [&'static str] =
                &[$($block,)+ $crate::api::GenericComparison::BLOCK];

            /// The wire discriminator.
            #[must_use]
            pub fn type_name(&self) -> &str {
                match self {
                    $(Self::$variant(_) => $type_name,)+
                    Self::Generic(c) => &c.type_name,
                }
            }

            /// Whether the comparison is inverted.
            #[must_use]
            pub fn negate(&self) -> bool {
                match self {
                    $(Self::$variant(c) => c.negate,)+
                    Self::Generic(c) => c.negate,
                }
            }

            /// Set the inversion flag on the concrete variant.
            pub fn set_negate(&mut self, negate: bool) {
                match self {
                    $(Self::$variant(c) => c.negate = negate,)+
                    Self::Generic(c) => c.negate = negate,
                }
            }

            fn from_json(value: serde_json::Value) -> serde_json::Result<Self> {
                let header = $crate::api::Header::read(&value)?;
                let strip = [$crate::api::TYPE_FIELD, $crate::api::NEGATE_FIELD];
                let mut comparison = match header.type_name.as_str() {
                    $($type_name => Self::$variant($crate::api::decode_variant(value, &strip)?),)+
                    _ => Self::Generic($crate::api::decode_variant(value, &strip[1..])?),
                };
                comparison.set_negate(header.negate);
                Ok(comparison)
            }

            fn to_json(&self) -> serde_json::Result<serde_json::Value> {
                match self {
                    $(Self::$variant(c) => $crate::api::encode_variant(c, $type_name),)+
                    Self::Generic(c) => $crate::api::encode_variant(c, &c.type_name),
                }
            }
        }

        $(
            impl $ty {
                /// The wire discriminator of this comparison.
                pub const TYPE_NAME: &'static str = $type_name;
            }

            impl From<$ty> for $name {
                fn from(comparison: $ty) -> Self {
                    Self::$variant(comparison)
                }
            }

            impl TryFrom<$name> for $ty {
                type Error = $crate::error::Error;

                fn try_from(comparison: $name) -> ::std::result::Result<Self, Self::Error> {
                    match comparison {
                        $name::$variant(c) => Ok(c),
                        other => Err($crate::error::Error::VariantMismatch {
                            expected: $type_name,
                            found: other.type_name().to_string(),
                        }),
                    }
                }
            }
        )+

        impl From<$crate::api::GenericComparison> for $name {
            fn from(comparison: $crate::api::GenericComparison) -> Self {
                Self::Generic(comparison)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                let value = self.to_json().map_err(serde::ser::Error::custom)?;
                serde::Serialize::serialize(&value, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_json(value).map_err(serde::de::Error::custom)
            }
        }

        impl hclkit::Marshaler for $name {
            fn marshal_hcl(&self, properties: &mut hclkit::Properties) -> hclkit::Result<()> {
                if self.negate() {
                    properties.encode($crate::api::NEGATE_FIELD, &true);
                }
                match self {
                    $(Self::$variant(c) => properties.encode_block($block, c),)+
                    Self::Generic(c) => properties.encode_block($crate::api::GenericComparison::BLOCK, c),
                }
            }
        }

        impl hclkit::Unmarshaler for $name {
            fn unmarshal_hcl(decoder: &hclkit::Properties) -> hclkit::Result<Self> {
                let Some(block) = $crate::api::single_variant(decoder, Self::BLOCKS)? else {
                    return Err(hclkit::Error::invalid(
                        Self::BLOCKS.join(", "),
                        "exactly one comparison block must be set",
                    ));
                };
                let mut comparison = match block {
                    $($block => Self::$variant(decoder.decode_required_block($block)?),)+
                    _ => Self::Generic(decoder.decode_required_block(block)?),
                };
                comparison.set_negate(decoder.decode_or_default($crate::api::NEGATE_FIELD)?);
                Ok(comparison)
            }
        }

        impl hclkit::Schematic for $name {
            fn schema() -> hclkit::Schema {
                hclkit::Schema::new()
                    .attr(
                        $crate::api::NEGATE_FIELD,
                        hclkit::Attribute::bool().describe("Reverses the operator"),
                    )
                    $(.attr($block, hclkit::Attribute::single_block(<$ty as hclkit::Schematic>::schema())))+
                    .attr(
                        $crate::api::GenericComparison::BLOCK,
                        hclkit::Attribute::single_block(
                            <$crate::api::GenericComparison as hclkit::Schematic>::schema(),
                        ),
                    )
            }
        }
    };
}
