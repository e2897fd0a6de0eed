//! JSON interop for host embedding.
//!
//! Hosts hand context bindings in and read evaluation results back as plain
//! JSON. Conversion is lossy in both directions at the edges the two models
//! do not share: references, parameter lists, and functions render as their
//! display text, and JSON `null` (which PS has no variant for) comes in as
//! the empty string.

use crate::{PsMap, Value, ValueKind};
use serde_json::json;

/// Convert an evaluated value to JSON.
pub fn to_json(value: &Value) -> serde_json::Value {
    match &value.kind {
        ValueKind::Number(n) => {
            if n.fract() == 0.0 && n.is_finite() {
                json!(*n as i64)
            } else {
                serde_json::Number::from_f64(*n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
        }
        ValueKind::Bool(b) => json!(b),
        ValueKind::Str(s) => json!(s.text),
        ValueKind::Map(m) => {
            let mut obj = serde_json::Map::new();
            for (k, v) in m.iter() {
                obj.insert(k.to_string(), to_json(v));
            }
            serde_json::Value::Object(obj)
        }
        ValueKind::List(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        ValueKind::Ref(_) | ValueKind::Params(_) | ValueKind::Fn(_) => json!(value.to_string()),
    }
}

/// Convert host JSON into a value, typically for a context map.
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::string(""),
        serde_json::Value::Bool(b) => Value::boolean(*b),
        serde_json::Value::Number(n) => Value::number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::string(s.clone()),
        serde_json::Value::Array(items) => Value::list(items.iter().map(from_json).collect()),
        serde_json::Value::Object(obj) => {
            let mut map = PsMap::new();
            for (k, v) in obj {
                map.insert(Value::string(k.clone()), from_json(v));
            }
            Value::map(map)
        }
    }
}
