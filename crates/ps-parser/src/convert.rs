//! Node tree to value model conversion.
//!
//! Typing only applies to plain scalars: `true`/`false`, numbers, whole
//! references, and parameter lists must be unquoted to count. Quoting of any
//! kind makes a scalar a string, and single-quoted/block scalars are also
//! exempt from hole detection.

use crate::doc::{DocKind, DocNode, ScalarStyle};
use crate::grammar;
use ps_types::{PsMap, PsString, Value, ValueKind};

pub(crate) fn convert(node: DocNode) -> Value {
    let span = node.span;
    let value = match node.kind {
        DocKind::Scalar { text, style } => convert_scalar(text, style),
        DocKind::Seq(items) => Value::list(items.into_iter().map(convert).collect()),
        DocKind::Map(entries) => {
            let mut map = PsMap::new();
            for (key, value) in entries {
                map.insert(convert(key), convert(value));
            }
            Value::map(map)
        }
    };
    value.with_span(span)
}

fn convert_scalar(text: String, style: ScalarStyle) -> Value {
    match style {
        ScalarStyle::Plain => {
            if let Some(reference) = grammar::parse_reference(&text) {
                return Value::new(ValueKind::Ref(reference));
            }
            if let Some(names) = grammar::parse_params(&text) {
                return Value::new(ValueKind::Params(names));
            }
            match text.as_str() {
                "true" => return Value::boolean(true),
                "false" => return Value::boolean(false),
                _ => {}
            }
            if let Some(n) = parse_number(&text) {
                return Value::number(n);
            }
            string_with_holes(text)
        }
        ScalarStyle::DoubleQuoted => string_with_holes(text),
        ScalarStyle::SingleQuoted | ScalarStyle::Block => Value::string(text),
    }
}

fn string_with_holes(text: String) -> Value {
    let holes = grammar::find_holes(&text);
    Value::new(ValueKind::Str(PsString { text, holes }))
}

/// A plain scalar is a number iff it has the decimal shape
/// `[+-]? digits [. digits]? [eE [+-]? digits]?` with at least one digit.
/// Word forms Rust would accept (`inf`, `NaN`) stay strings.
fn parse_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut has_digits = i > int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        has_digits |= i > frac_start;
    }
    if !has_digits {
        return None;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
    }
    if i == bytes.len() {
        text.parse().ok()
    } else {
        None
    }
}
