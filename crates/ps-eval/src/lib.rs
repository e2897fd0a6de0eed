//! The PS evaluator.
//!
//! Evaluation is lazy at the edges — mapping values and function bodies stay
//! literal until something forces them — and strict where order is
//! observable: list items, `do` blocks, and binding sets all evaluate in
//! source order. Every evaluation step is suspending, so host functions can
//! perform I/O mid-document, and dropping the future cancels the evaluation
//! at the next step.

mod env;
mod evaluator;
mod forms;

pub use env::{global_scope, Env};
pub use ps_parser::{parse, strip};
pub use ps_types::{Eval, PsError, PsMap, PsResult, Value, ValueKind};

/// Options for [`evaluate`].
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// Name used in syntax errors. Defaults to `"script"`.
    pub filename: Option<String>,
    /// Host-provided bindings layered over the global scope.
    pub context: Option<PsMap>,
}

/// Parse and evaluate a document against the global scope plus the
/// host-provided context.
pub async fn evaluate(source: &str, options: EvalOptions) -> PsResult<Value> {
    let filename = options.filename.as_deref().unwrap_or("script");
    let literal = parse(source, filename)?;
    let context = options.context.unwrap_or_default();
    Env::new().eval(&literal, &context).await
}
