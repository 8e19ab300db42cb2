//! Entry value helpers.
//!
//! Entry values are arbitrary JSON-shaped data (`serde_json::Value`); the
//! containers never interpret them beyond truthiness and rendering.

use serde_json::{Map, Value};

/// The ordered key/value storage every container is built on.
pub type Entries = Map<String, Value>;

/// Return the truthiness of a value.
///
/// `null`, `false`, zero, and empty strings, arrays, and objects are falsy;
/// everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Return true for reserved `__dunder__` names.
///
/// Attribute lookups of reserved names are never resolved against entries or
/// absorbed by the null sentinel.
pub fn is_reserved_name(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}

/// Render entries as `{"k1": v1, "k2": v2}` in insertion order.
pub fn render_entries(entries: &Entries) -> String {
    let body: Vec<String> = entries
        .iter()
        .map(|(key, value)| format!("{}: {}", Value::String(key.clone()), value))
        .collect();
    format!("{{{}}}", body.join(", "))
}
