//! Evaluation environments.
//!
//! An [`Env`] is nothing more than the scope it evaluates against; the
//! dispatch logic lives in the [`Eval`](ps_types::Eval) impl. The global
//! scope holds the two special forms, `let` and `do`, and is the root of
//! every scope chain.

use crate::forms::{DoForm, LetForm};
use ps_types::{PsFn, PsMap, Value};

/// An evaluator bound to a scope.
#[derive(Debug, Clone)]
pub struct Env {
    scope: PsMap,
}

impl Env {
    /// An evaluator over the global scope.
    pub fn new() -> Self {
        Self {
            scope: global_scope(),
        }
    }

    /// An evaluator over an explicit scope. The caller is responsible for
    /// having chained the global scope in already.
    pub fn with_scope(scope: PsMap) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &PsMap {
        &self.scope
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

/// The root scope: the `let` and `do` special forms, under plain string keys.
pub fn global_scope() -> PsMap {
    let mut scope = PsMap::new();
    scope.insert(Value::string("let"), Value::function(PsFn::new(LetForm)));
    scope.insert(Value::string("do"), Value::function(PsFn::new(DoForm)));
    scope
}
