//! Shared types for the PS language.
//!
//! This crate defines the value model, the ordered associative container,
//! source spans, the classified error type, and the capability traits the
//! evaluator and function values meet at.

mod error;
mod func;
mod json;
mod map;
mod span;
mod value;

pub use error::{PsError, PsResult};
pub use func::{Eval, FnCall, FnImpl, PsFn};
pub use json::{from_json, to_json};
pub use map::PsMap;
pub use span::Span;
pub use value::{Hole, PsRef, PsString, Value, ValueKind};
