//! Attribute values and conversions between Rust types and values.

use crate::error::{Error, Result};
use crate::properties::Properties;
use serde::{Deserialize, Serialize};

/// A single attribute value in a declarative configuration tree.
///
/// Nested objects are always represented as a list of blocks, even when the
/// schema allows at most one, mirroring the block syntax of declarative
/// configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean attribute.
    Bool(bool),
    /// Integer attribute.
    Int(i64),
    /// Floating point attribute.
    Float(f64),
    /// String attribute.
    String(String),
    /// List or set of values (including lists of blocks).
    List(Vec<Value>),
    /// A nested block.
    Block(Properties),
}

impl Value {
    /// Human readable name of the kind of this value.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Block(_) => "block",
        }
    }

    /// Borrow the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the nested block, if this is a block.
    #[must_use]
    pub fn as_block(&self) -> Option<&Properties> {
        match self {
            Self::Block(p) => Some(p),
            _ => None,
        }
    }

    /// Borrow the list elements, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<Properties> for Value {
    fn from(p: Properties) -> Self {
        Self::Block(p)
    }
}

/// Conversion of a Rust value into an attribute value.
pub trait ToValue {
    /// Convert to an attribute value.
    fn to_value(&self) -> Value;
}

/// Conversion of an attribute value into a Rust value.
pub trait FromValue: Sized {
    /// Convert from an attribute value.
    ///
    /// Errors carry no key; [`Properties`] adds the attribute path.
    fn from_value(value: &Value) -> Result<Self>;
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for i32 {
    fn to_value(&self) -> Value {
        Value::Int(i64::from(*self))
    }
}

impl ToValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::type_mismatch("bool", other.kind())),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Int(i) => Ok(*i),
            other => Err(Error::type_mismatch("int", other.kind())),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self> {
        let wide = i64::from_value(value)?;
        Self::try_from(wide)
            .map_err(|_| Error::invalid("", format!("{wide} is out of range for a 32-bit integer")))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Float(f) => Ok(*f),
            // Whole numbers written without a fraction parse as integers.
            Value::Int(i) => Ok(*i as f64),
            other => Err(Error::type_mismatch("float", other.kind())),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(Error::type_mismatch("string", other.kind())),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| T::from_value(item).map_err(|e| e.at(&i.to_string())))
                .collect(),
            other => Err(Error::type_mismatch("list", other.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_accepts_int() {
        assert!((f64::from_value(&Value::Int(3)).unwrap() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_i32_out_of_range() {
        let err = i32::from_value(&Value::Int(i64::MAX)).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_vec_reports_element_index() {
        let value = Value::List(vec![Value::from("a"), Value::Bool(true)]);
        let err = Vec::<String>::from_value(&value).unwrap_err();
        assert_eq!(err.to_string(), "attribute '1': expected string, found bool");
    }

    #[test]
    fn test_untagged_json_shape() {
        let value: Value =
            serde_json::from_str(r#"[{"name": "a", "weight": 1.5, "count": 2}]"#).unwrap();
        let block = value.as_list().unwrap()[0].as_block().unwrap();
        assert_eq!(block.get("count"), Some(&Value::Int(2)));
        assert_eq!(block.get("weight"), Some(&Value::Float(1.5)));
        assert_eq!(block.get("name").and_then(Value::as_str), Some("a"));
    }
}
