//! Attribute maps and the encode/decode helpers used by every codec.

use crate::codec::{Marshaler, Unmarshaler};
use crate::error::{Error, Result};
use crate::value::{FromValue, ToValue, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An ordered map of attribute name to value.
///
/// `Properties` is both the encoder and the decoder: codecs write into it with
/// the `encode*` family and read from it with the `decode*` family. Optional
/// values that are unset are never written, so an absent attribute always
/// means "unset" rather than "zero".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, Value>);

impl Properties {
    /// Create an empty property map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether an attribute is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a raw value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Remove an attribute.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Iterate over attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    /// Encode a value unconditionally.
    pub fn encode<T: ToValue + ?Sized>(&mut self, key: &str, value: &T) {
        self.0.insert(key.to_string(), value.to_value());
    }

    /// Encode an optional value, skipping `None`.
    pub fn encode_opt<T: ToValue>(&mut self, key: &str, value: Option<&T>) {
        if let Some(value) = value {
            self.encode(key, value);
        }
    }

    /// Encode a list, skipping it when empty.
    pub fn encode_list<T: ToValue>(&mut self, key: &str, values: &[T]) {
        if !values.is_empty() {
            self.0.insert(
                key.to_string(),
                Value::List(values.iter().map(ToValue::to_value).collect()),
            );
        }
    }

    /// Encode a nested object as a single block.
    pub fn encode_block<M: Marshaler + ?Sized>(&mut self, key: &str, value: &M) -> Result<()> {
        let block = value.to_properties().map_err(|e| e.at(key))?;
        self.0
            .insert(key.to_string(), Value::List(vec![Value::Block(block)]));
        Ok(())
    }

    /// Encode an optional nested object, skipping `None`.
    pub fn encode_block_opt<M: Marshaler>(&mut self, key: &str, value: Option<&M>) -> Result<()> {
        match value {
            Some(value) => self.encode_block(key, value),
            None => Ok(()),
        }
    }

    /// Encode a list of nested objects as repeated blocks, skipping it when empty.
    pub fn encode_blocks<M: Marshaler>(&mut self, key: &str, values: &[M]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let mut blocks = Vec::with_capacity(values.len());
        for (i, value) in values.iter().enumerate() {
            let block = value
                .to_properties()
                .map_err(|e| e.at(&i.to_string()).at(key))?;
            blocks.push(Value::Block(block));
        }
        self.0.insert(key.to_string(), Value::List(blocks));
        Ok(())
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    /// Decode an optional attribute.
    pub fn decode_opt<T: FromValue>(&self, key: &str) -> Result<Option<T>> {
        self.0
            .get(key)
            .map(|value| T::from_value(value).map_err(|e| e.at(key)))
            .transpose()
    }

    /// Decode an attribute, falling back to `T::default()` when absent.
    pub fn decode_or_default<T: FromValue + Default>(&self, key: &str) -> Result<T> {
        Ok(self.decode_opt(key)?.unwrap_or_default())
    }

    /// Decode a required attribute.
    pub fn decode<T: FromValue>(&self, key: &str) -> Result<T> {
        self.decode_opt(key)?
            .ok_or_else(|| Error::MissingAttribute(key.to_string()))
    }

    /// Decode a single nested block, if present.
    ///
    /// Accepts either a list holding one block or a bare block.
    pub fn decode_block<U: Unmarshaler>(&self, key: &str) -> Result<Option<U>> {
        let Some(value) = self.0.get(key) else {
            return Ok(None);
        };
        let block = match value {
            Value::Block(block) => Some(block),
            Value::List(items) => match items.as_slice() {
                [] => None,
                [Value::Block(block)] => Some(block),
                [other] => {
                    return Err(Error::type_mismatch("block", other.kind()).at(key));
                }
                _ => {
                    return Err(Error::invalid(
                        key,
                        format!("expected at most one block, found {}", items.len()),
                    ));
                }
            },
            other => return Err(Error::type_mismatch("block", other.kind()).at(key)),
        };
        block
            .map(|block| U::unmarshal_hcl(block).map_err(|e| e.at("0").at(key)))
            .transpose()
    }

    /// Decode a required nested block.
    pub fn decode_required_block<U: Unmarshaler>(&self, key: &str) -> Result<U> {
        self.decode_block(key)?
            .ok_or_else(|| Error::MissingAttribute(key.to_string()))
    }

    /// Decode repeated nested blocks; absent means empty.
    pub fn decode_blocks<U: Unmarshaler>(&self, key: &str) -> Result<Vec<U>> {
        match self.0.get(key) {
            None => Ok(Vec::new()),
            Some(Value::List(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Block(block) => U::unmarshal_hcl(block)
                        .map_err(|e| e.at(&i.to_string()).at(key)),
                    other => Err(Error::type_mismatch("block", other.kind())
                        .at(&i.to_string())
                        .at(key)),
                })
                .collect(),
            Some(other) => Err(Error::type_mismatch("list", other.kind()).at(key)),
        }
    }
}

impl FromIterator<(String, Value)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Properties {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
