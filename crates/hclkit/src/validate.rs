//! Schema validation of property trees.

use crate::error::{Error, Result};
use crate::properties::Properties;
use crate::schema::{Kind, Schema};
use crate::value::Value;

/// Validate `properties` against `schema`.
///
/// Collects every violation instead of stopping at the first one:
/// missing required attributes, undeclared attributes, kind mismatches,
/// duplicate set elements and min/max item counts.
pub fn validate(schema: &Schema, properties: &Properties) -> Result<()> {
    let mut violations = Vec::new();
    check_block(schema, properties, "", &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(violations))
    }
}

/// List the deprecated attributes used in `properties`, with their messages.
pub fn deprecations(schema: &Schema, properties: &Properties) -> Vec<String> {
    let mut found = Vec::new();
    collect_deprecations(schema, properties, "", &mut found);
    found
}

fn path_of(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn check_block(schema: &Schema, properties: &Properties, prefix: &str, out: &mut Vec<String>) {
    for (name, attribute) in schema.iter() {
        if attribute.required && !properties.contains_key(name) {
            out.push(format!(
                "missing required attribute '{}'",
                path_of(prefix, name)
            ));
        }
    }

    for (name, value) in properties.iter() {
        let path = path_of(prefix, name);
        let Some(attribute) = schema.get(name) else {
            out.push(format!("undeclared attribute '{path}'"));
            continue;
        };

        check_value(&attribute.kind, value, &path, out);

        if let Value::List(items) = value {
            if let Some(min) = attribute.min_items {
                if items.len() < min {
                    out.push(format!(
                        "'{path}' needs at least {min} item(s), found {}",
                        items.len()
                    ));
                }
            }
            if let Some(max) = attribute.max_items {
                if items.len() > max {
                    out.push(format!(
                        "'{path}' allows at most {max} item(s), found {}",
                        items.len()
                    ));
                }
            }
        }
    }
}

fn check_value(kind: &Kind, value: &Value, path: &str, out: &mut Vec<String>) {
    match (kind, value) {
        (Kind::Bool, Value::Bool(_))
        | (Kind::Int, Value::Int(_))
        | (Kind::Float, Value::Float(_) | Value::Int(_))
        | (Kind::String, Value::String(_)) => {}
        (Kind::List(elem), Value::List(items)) => {
            for (i, item) in items.iter().enumerate() {
                check_value(elem, item, &format!("{path}.{i}"), out);
            }
        }
        (Kind::Set(elem), Value::List(items)) => {
            for (i, item) in items.iter().enumerate() {
                check_value(elem, item, &format!("{path}.{i}"), out);
                if items[..i].contains(item) {
                    out.push(format!("'{path}' contains a duplicate element at index {i}"));
                }
            }
        }
        (Kind::Block(schema), Value::List(items)) => {
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{path}.{i}");
                match item {
                    Value::Block(block) => check_block(schema, block, &item_path, out),
                    other => out.push(format!(
                        "'{item_path}': expected block, found {}",
                        other.kind()
                    )),
                }
            }
        }
        (Kind::Block(schema), Value::Block(block)) => check_block(schema, block, path, out),
        (kind, value) => out.push(format!(
            "'{path}': expected {}, found {}",
            kind.name(),
            value.kind()
        )),
    }
}

fn collect_deprecations(
    schema: &Schema,
    properties: &Properties,
    prefix: &str,
    out: &mut Vec<String>,
) {
    for (name, value) in properties.iter() {
        let Some(attribute) = schema.get(name) else {
            continue;
        };
        let path = path_of(prefix, name);
        if let Some(message) = &attribute.deprecated {
            out.push(format!("'{path}' is deprecated: {message}"));
        }
        if let (Kind::Block(nested), Value::List(items)) = (&attribute.kind, value) {
            for (i, item) in items.iter().enumerate() {
                if let Value::Block(block) = item {
                    collect_deprecations(nested, block, &format!("{path}.{i}"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attribute;

    fn tile_schema() -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required())
            .attr("configured", Attribute::bool())
            .attr("tags", Attribute::set(Kind::String))
            .attr(
                "bounds",
                Attribute::single_block(
                    Schema::new()
                        .attr("top", Attribute::int().required())
                        .attr("left", Attribute::int().required()),
                ),
            )
            .attr("chart", Attribute::bool().deprecated("use visualization instead"))
    }

    fn bounds(top: i64, left: Option<i64>) -> Value {
        let mut block = Properties::new();
        block.insert("top", Value::Int(top));
        if let Some(left) = left {
            block.insert("left", Value::Int(left));
        }
        Value::Block(block)
    }

    #[test]
    fn test_valid_properties() {
        let mut props = Properties::new();
        props.insert("name", Value::from("Hosts"));
        props.insert("bounds", Value::List(vec![bounds(0, Some(38))]));
        assert!(validate(&tile_schema(), &props).is_ok());
    }

    #[test]
    fn test_collects_all_violations() {
        let mut props = Properties::new();
        props.insert("configured", Value::from("yes"));
        props.insert("colour", Value::from("red"));
        props.insert(
            "tags",
            Value::List(vec![Value::from("a"), Value::from("a")]),
        );
        props.insert(
            "bounds",
            Value::List(vec![bounds(0, None), bounds(1, Some(2))]),
        );

        let Err(Error::Validation(violations)) = validate(&tile_schema(), &props) else {
            panic!("expected validation error");
        };
        assert!(violations.contains(&"missing required attribute 'name'".to_string()));
        assert!(violations.contains(&"undeclared attribute 'colour'".to_string()));
        assert!(violations.contains(&"'configured': expected bool, found string".to_string()));
        assert!(
            violations.contains(&"'tags' contains a duplicate element at index 1".to_string())
        );
        assert!(
            violations.contains(&"missing required attribute 'bounds.0.left'".to_string())
        );
        assert!(violations.contains(&"'bounds' allows at most 1 item(s), found 2".to_string()));
    }

    #[test]
    fn test_float_accepts_whole_numbers() {
        let schema = Schema::new().attr("ratio", Attribute::float());
        let mut props = Properties::new();
        props.insert("ratio", Value::Int(50));
        assert!(validate(&schema, &props).is_ok());
    }

    #[test]
    fn test_deprecations() {
        let mut props = Properties::new();
        props.insert("name", Value::from("x"));
        props.insert("chart", Value::Bool(true));
        assert_eq!(
            deprecations(&tile_schema(), &props),
            vec!["'chart' is deprecated: use visualization instead".to_string()]
        );
    }
}
