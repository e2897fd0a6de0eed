//! Literal conversion for the PS language: document text in, value tree out.
//!
//! The document syntax is YAML (mapping, sequence, scalar). Conversion maps
//! the node tree onto the value model, detecting the language's lexical
//! forms — references, interpolation holes, parameter-list keys — inside
//! plain scalars, and attaches a source location to every produced value.

mod convert;
mod doc;
mod grammar;

use ps_types::{PsResult, Value};

/// Parse document text into a literal value tree.
///
/// Fails with a location-tagged syntax error if the document does not parse
/// or is empty.
pub fn parse(source: &str, filename: &str) -> PsResult<Value> {
    let root = doc::load(source, filename)?;
    Ok(convert::convert(root))
}

/// Remove diagnostic metadata from a parsed value, recursively.
pub fn strip(value: &Value) -> Value {
    value.strip()
}
