//! The dispatch core: what each value kind evaluates to.
//!
//! References resolve through the scope chain, strings with holes
//! interpolate, mappings either call a function (first key is a reference),
//! build a closure (single parameter-list key), or pass through as data.
//! Lists evaluate their items strictly in order. Everything else is
//! self-evaluating.

use crate::env::Env;
use async_trait::async_trait;
use ps_types::{
    Eval, FnCall, FnImpl, PsError, PsFn, PsMap, PsRef, PsResult, PsString, Span, Value, ValueKind,
};

#[async_trait]
impl Eval for Env {
    async fn eval(&self, value: &Value, context: &PsMap) -> PsResult<Value> {
        let scope = self.scope().concat(context);
        match &value.kind {
            ValueKind::Ref(r) => resolve(r, &scope, value.span),
            ValueKind::Str(s) if !s.holes.is_empty() => interpolate(s, value.span, scope).await,
            ValueKind::Map(entries) => eval_map(value, entries, scope).await,
            ValueKind::List(items) => {
                let env = Env::with_scope(scope);
                let empty = PsMap::new();
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(env.eval(item, &empty).await?);
                }
                Ok(Value::list(out))
            }
            _ => Ok(value.clone()),
        }
    }
}

/// Walk a dotted reference: scope lookup for the first segment, then key
/// lookups into successive mappings.
fn resolve(reference: &PsRef, scope: &PsMap, span: Option<Span>) -> PsResult<Value> {
    let mut current = scope.get_str(reference.name()).ok_or_else(|| {
        PsError::reference(format!("'${}' is not defined", reference.name()), span)
    })?;
    for segment in &reference.path[1..] {
        let entries = current.as_map().ok_or_else(|| {
            PsError::type_error(
                format!(
                    "cannot read key '{segment}' from a {} (in '{reference}')",
                    current.kind_name()
                ),
                span,
            )
        })?;
        current = entries.get_str(segment).ok_or_else(|| {
            PsError::reference(format!("no key '{segment}' (in '{reference}')"), span)
        })?;
    }
    Ok(current.clone())
}

/// Splice evaluated references into the literal text around them. Holes are
/// filled left to right; a failing reference aborts the whole string, with
/// the error located at the enclosing literal.
async fn interpolate(s: &PsString, span: Option<Span>, scope: PsMap) -> PsResult<Value> {
    let env = Env::with_scope(scope);
    let empty = PsMap::new();
    let mut out = String::new();
    let mut cursor = 0;
    for hole in &s.holes {
        let (start, end) = hole.range;
        out.push_str(&s.text[cursor..start]);
        let reference = Value {
            kind: ValueKind::Ref(hole.reference.clone()),
            span,
        };
        let filled = env.eval(&reference, &empty).await?;
        out.push_str(&filled.to_string());
        cursor = end;
    }
    out.push_str(&s.text[cursor..]);
    Ok(Value::string(out))
}

async fn eval_map(value: &Value, entries: &PsMap, scope: PsMap) -> PsResult<Value> {
    let Some((first_key, first_value)) = entries.first() else {
        // The empty mapping is the language's false.
        return Ok(Value::boolean(false));
    };
    match &first_key.kind {
        ValueKind::Ref(_) => {
            let env = Env::with_scope(scope);
            let callee = env.eval(first_key, &PsMap::new()).await?;
            let ValueKind::Fn(f) = &callee.kind else {
                return Err(PsError::type_error(
                    format!(
                        "'{first_key}' is not a function, it is a {}",
                        callee.kind_name()
                    ),
                    first_key.span,
                ));
            };
            let rest = entries.rest();
            f.invoke(FnCall {
                arg: first_value,
                env: &env,
                rest: &rest,
            })
            .await
        }
        ValueKind::Params(names) if entries.len() == 1 => {
            Ok(Value::function(PsFn::new(Closure {
                params: names.clone(),
                body: first_value.clone(),
                captured: scope,
            })))
        }
        _ => Ok(value.clone()),
    }
}

/// A function literal's runtime form: declared parameter names, the unevaluated
/// body, and the scope captured at the definition site.
struct Closure {
    params: Vec<String>,
    body: Value,
    captured: PsMap,
}

#[async_trait]
impl FnImpl for Closure {
    async fn invoke(&self, call: FnCall<'_>) -> PsResult<Value> {
        let arg = call.env.eval(call.arg, &PsMap::new()).await?;

        let mut bindings = PsMap::new();
        if let [name] = self.params.as_slice() {
            bindings.insert(Value::string(name.clone()), arg);
        } else {
            let items = match &arg.kind {
                ValueKind::List(items) if items.len() == self.params.len() => items,
                _ => {
                    return Err(PsError::type_error(
                        format!(
                            "function takes {} arguments, got {}",
                            self.params.len(),
                            arg.kind_name()
                        ),
                        call.arg.span,
                    ))
                }
            };
            for (name, item) in self.params.iter().zip(items) {
                bindings.insert(Value::string(name.clone()), item.clone());
            }
        }

        // The body sees the definition-site scope, not the caller's.
        let env = Env::with_scope(self.captured.clone());
        env.eval(&self.body, &bindings).await
    }
}
