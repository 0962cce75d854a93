//! Rendering property trees as HCL text.
//!
//! Output is deterministic: attributes come first in key order with their
//! `=` signs aligned, followed by nested blocks in key order.

use crate::properties::Properties;
use crate::value::Value;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render a complete `resource "<type>" "<name>" { ... }` block.
pub fn render_resource(resource_type: &str, name: &str, properties: &Properties) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "resource {} {} {{",
        quote(resource_type),
        quote(&resource_name(name))
    );
    write_body(&mut output, properties, 1);
    output.push_str("}\n");
    output
}

/// Render only the body of a block (no surrounding braces).
pub fn render_body(properties: &Properties) -> String {
    let mut output = String::new();
    write_body(&mut output, properties, 0);
    output
}

/// Turn a display name into a valid resource identifier.
///
/// Non-alphanumeric characters become `_`, the result is lowercased and an
/// identifier that would start with a digit is prefixed with `_`.
pub fn resource_name(display: &str) -> String {
    let mut name: String = display
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
        name.insert(0, '_');
    }
    name
}

fn is_block_list(value: &Value) -> bool {
    match value {
        Value::Block(_) => true,
        Value::List(items) => !items.is_empty() && items.iter().all(|v| matches!(v, Value::Block(_))),
        _ => false,
    }
}

fn write_body(output: &mut String, properties: &Properties, depth: usize) {
    let pad = INDENT.repeat(depth);
    let attributes: Vec<_> = properties.iter().filter(|(_, v)| !is_block_list(v)).collect();
    let blocks: Vec<_> = properties.iter().filter(|(_, v)| is_block_list(v)).collect();

    let width = attributes.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in &attributes {
        let _ = writeln!(
            output,
            "{pad}{key:<width$} = {}",
            render_value(value, depth)
        );
    }

    for (key, value) in blocks {
        let items: Vec<&Properties> = match value {
            Value::Block(block) => vec![block],
            Value::List(items) => items.iter().filter_map(Value::as_block).collect(),
            _ => Vec::new(),
        };
        for block in items {
            if !output.is_empty() && !output.ends_with("{\n") {
                output.push('\n');
            }
            let _ = writeln!(output, "{pad}{key} {{");
            write_body(output, block, depth + 1);
            let _ = writeln!(output, "{pad}}}");
        }
    }
}

fn render_value(value: &Value, depth: usize) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::String(s) if s.contains('\n') => heredoc(s, depth),
        Value::String(s) => quote(s),
        Value::List(items) => {
            let rendered: Vec<String> = items.iter().map(|v| render_value(v, depth)).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Block(block) => {
            let fields: Vec<String> = block
                .iter()
                .map(|(k, v)| format!("{k} = {}", render_value(v, depth)))
                .collect();
            format!("{{ {} }}", fields.join(", "))
        }
    }
}

fn escape_templates(s: &str) -> String {
    s.replace("${", "$${").replace("%{", "%%{")
}

/// Quote a string as an HCL string literal.
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in escape_templates(s).chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

fn heredoc(s: &str, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    let mut marker = String::from("EOT");
    while s.lines().any(|line| line.trim() == marker) {
        marker.push('T');
    }
    let mut output = format!("<<-{marker}\n");
    for line in escape_templates(s).lines() {
        let _ = writeln!(output, "{pad}{INDENT}{line}");
    }
    let _ = write!(output, "{pad}{marker}");
    output
}
