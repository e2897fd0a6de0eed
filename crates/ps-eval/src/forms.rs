//! The `let` and `do` special forms.
//!
//! Both are ordinary function values in the global scope; what makes them
//! special is that they read their sibling entry (`$do` next to `$let`, and
//! vice versa) out of the call's trailing entries, so the two spellings
//! `{$let: …, $do: …}` and `{$do: …, $let: …}` mean the same thing.

use ps_types::{Eval, FnCall, FnImpl, PsError, PsMap, PsResult, Value, ValueKind};
use async_trait::async_trait;

pub(crate) struct LetForm;

#[async_trait]
impl FnImpl for LetForm {
    async fn invoke(&self, call: FnCall<'_>) -> PsResult<Value> {
        let bindings = bindings_from(Some(call.arg))?;
        match call.rest.get_ref("do") {
            Some(block) => run_block(block, &bindings, call.env).await,
            // Bindings with nothing to run them against.
            None => Ok(Value::boolean(false)),
        }
    }
}

pub(crate) struct DoForm;

#[async_trait]
impl FnImpl for DoForm {
    async fn invoke(&self, call: FnCall<'_>) -> PsResult<Value> {
        let bindings = bindings_from(call.rest.get_ref("let"))?;
        run_block(call.arg, &bindings, call.env).await
    }
}

fn bindings_from(value: Option<&Value>) -> PsResult<PsMap> {
    match value {
        None => Ok(PsMap::new()),
        Some(v) => match &v.kind {
            ValueKind::Map(m) => Ok(m.clone()),
            _ => Err(PsError::type_error(
                format!(
                    "'let' takes a mapping of bindings, got a {}",
                    v.kind_name()
                ),
                v.span,
            )),
        },
    }
}

/// Evaluate the bindings (in order, against the call-site scope — they do
/// not see each other), then the block under them. A list block runs each
/// item in order and yields the last; an empty list yields false.
async fn run_block(block: &Value, bindings: &PsMap, env: &dyn Eval) -> PsResult<Value> {
    let empty = PsMap::new();
    let scope = bindings.map_values(|_k, v| env.eval(v, &empty)).await?;
    match &block.kind {
        ValueKind::List(items) => {
            let mut result = Value::boolean(false);
            for item in items {
                result = env.eval(item, &scope).await?;
            }
            Ok(result)
        }
        _ => env.eval(block, &scope).await,
    }
}
