//! The PS value model.
//!
//! A closed, tagged union of every value the language can produce. Values are
//! immutable once constructed — evaluation builds new values rather than
//! mutating existing ones. Every value optionally carries a [`Span`] attached
//! by literal conversion; equality ignores it, and [`Value::strip`] removes it
//! recursively before values are handed back to the host.

use crate::{PsFn, PsMap, Span};
use std::fmt;

/// A PS value: a [`ValueKind`] plus optional diagnostic metadata.
#[derive(Debug, Clone)]
pub struct Value {
    pub kind: ValueKind,
    pub span: Option<Span>,
}

/// The closed set of value variants.
///
/// Every consumer matches exhaustively, so adding a variant is a
/// compile-time-checked change everywhere.
#[derive(Debug, Clone)]
pub enum ValueKind {
    Number(f64),
    Bool(bool),
    /// A string literal, possibly with interpolation holes.
    Str(PsString),
    /// A dotted reference like `$binding.key`.
    Ref(PsRef),
    /// An ordered mapping with structural key equality.
    Map(PsMap),
    List(Vec<Value>),
    /// A parameter-list mapping key like `$(x)` — only ever produced by
    /// literal conversion as the key of an anonymous-function literal.
    Params(Vec<String>),
    /// A function. Never produced by literal conversion; arises from
    /// function-literal evaluation or from host-registered values.
    Fn(PsFn),
}

/// String text plus the interpolation holes found inside it.
///
/// Holes record the byte range of the `$ref` occurrence in `text` so the
/// evaluator can reconstruct the literal substrings around them exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsString {
    pub text: String,
    pub holes: Vec<Hole>,
}

/// A marked sub-range of a string literal to be replaced by an evaluated
/// reference's textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hole {
    /// Byte range `[start, end)` of the `$ref` occurrence in the text.
    pub range: (usize, usize),
    pub reference: PsRef,
}

/// A dotted path: `path[0]` is the binding name looked up in scope,
/// `path[1..]` are successive key lookups into the resulting mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsRef {
    pub path: Vec<String>,
}

impl PsRef {
    pub fn new(path: Vec<String>) -> Self {
        debug_assert!(!path.is_empty(), "reference path must be non-empty");
        Self { path }
    }

    /// The binding name, the first path segment.
    pub fn name(&self) -> &str {
        &self.path[0]
    }
}

impl Value {
    pub fn new(kind: ValueKind) -> Self {
        Self { kind, span: None }
    }

    /// Attach a source location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn number(n: f64) -> Self {
        Self::new(ValueKind::Number(n))
    }

    pub fn boolean(b: bool) -> Self {
        Self::new(ValueKind::Bool(b))
    }

    /// A string with no holes.
    pub fn string(text: impl Into<String>) -> Self {
        Self::new(ValueKind::Str(PsString {
            text: text.into(),
            holes: Vec::new(),
        }))
    }

    pub fn reference(path: Vec<String>) -> Self {
        Self::new(ValueKind::Ref(PsRef::new(path)))
    }

    pub fn map(entries: PsMap) -> Self {
        Self::new(ValueKind::Map(entries))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Self::new(ValueKind::List(items))
    }

    pub fn function(f: PsFn) -> Self {
        Self::new(ValueKind::Fn(f))
    }

    /// The text of a holeless string, or `None` for any other value.
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::Str(s) if s.holes.is_empty() => Some(&s.text),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&PsMap> {
        match &self.kind {
            ValueKind::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Human-readable name of this value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ValueKind::Number(_) => "number",
            ValueKind::Bool(_) => "boolean",
            ValueKind::Str(_) => "string",
            ValueKind::Ref(_) => "ref",
            ValueKind::Map(_) => "map",
            ValueKind::List(_) => "list",
            ValueKind::Params(_) => "params",
            ValueKind::Fn(_) => "fn",
        }
    }

    /// Remove diagnostic metadata recursively.
    ///
    /// Stripping an already-stripped value is a no-op; used when exposing
    /// values to the host.
    pub fn strip(&self) -> Value {
        let kind = match &self.kind {
            ValueKind::Map(m) => {
                ValueKind::Map(m.iter().map(|(k, v)| (k.strip(), v.strip())).collect())
            }
            ValueKind::List(items) => ValueKind::List(items.iter().map(Value::strip).collect()),
            other => other.clone(),
        };
        Value::new(kind)
    }
}

// Structural equality: spans are metadata and never participate.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl PartialEq for ValueKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // NaN != NaN, deliberately.
            (ValueKind::Number(a), ValueKind::Number(b)) => a == b,
            (ValueKind::Bool(a), ValueKind::Bool(b)) => a == b,
            (ValueKind::Str(a), ValueKind::Str(b)) => a == b,
            (ValueKind::Ref(a), ValueKind::Ref(b)) => a == b,
            (ValueKind::Map(a), ValueKind::Map(b)) => a == b,
            (ValueKind::List(a), ValueKind::List(b)) => a == b,
            (ValueKind::Params(a), ValueKind::Params(b)) => a == b,
            // Functions have no structure to compare; identity only.
            (ValueKind::Fn(a), ValueKind::Fn(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for PsRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.path.join("."))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            ValueKind::Bool(b) => write!(f, "{b}"),
            ValueKind::Str(s) => write!(f, "{}", s.text),
            ValueKind::Ref(r) => write!(f, "{r}"),
            ValueKind::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            ValueKind::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            ValueKind::Params(names) => write!(f, "$({})", names.join(", ")),
            ValueKind::Fn(_) => write!(f, "<fn>"),
        }
    }
}
