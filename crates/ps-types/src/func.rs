//! Function values and the evaluation capability seam.
//!
//! The evaluator lives in its own crate; what functions need from it is only
//! the ability to evaluate a value against a context, so that capability is a
//! trait here. Function implementations receive their call argument as a
//! literal — unevaluated — and decide whether and when to evaluate it. All
//! invocation is suspending: a host-registered function may perform I/O, and
//! the special forms re-enter the evaluator.

use crate::{PsMap, PsResult, Value};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// The evaluation capability handed to function implementations.
///
/// `context` is layered over the evaluator's own scope; child entries shadow
/// parent entries with equal keys.
#[async_trait]
pub trait Eval: Send + Sync {
    async fn eval(&self, value: &Value, context: &PsMap) -> PsResult<Value>;
}

/// One function invocation.
pub struct FnCall<'a> {
    /// The first mapping entry's value, passed as a literal.
    pub arg: &'a Value,
    /// An evaluator scoped at the call site.
    pub env: &'a dyn Eval,
    /// The call mapping's remaining entries.
    pub rest: &'a PsMap,
}

/// A function implementation. Closures, special forms, and host-registered
/// natives all come in through here.
#[async_trait]
pub trait FnImpl: Send + Sync {
    async fn invoke(&self, call: FnCall<'_>) -> PsResult<Value>;
}

/// A first-class function value.
#[derive(Clone)]
pub struct PsFn(Arc<dyn FnImpl>);

impl PsFn {
    pub fn new(imp: impl FnImpl + 'static) -> Self {
        Self(Arc::new(imp))
    }

    /// Wrap a host closure as a function value.
    pub fn native<F>(f: F) -> Self
    where
        F: for<'a> Fn(FnCall<'a>) -> BoxFuture<'a, PsResult<Value>> + Send + Sync + 'static,
    {
        Self::new(NativeFn { f })
    }

    pub async fn invoke(&self, call: FnCall<'_>) -> PsResult<Value> {
        self.0.invoke(call).await
    }

    /// Identity comparison — functions have no structural equality.
    pub fn ptr_eq(&self, other: &PsFn) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for PsFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<fn>")
    }
}

struct NativeFn<F> {
    f: F,
}

#[async_trait]
impl<F> FnImpl for NativeFn<F>
where
    F: for<'a> Fn(FnCall<'a>) -> BoxFuture<'a, PsResult<Value>> + Send + Sync,
{
    async fn invoke(&self, call: FnCall<'_>) -> PsResult<Value> {
        (self.f)(call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    #[async_trait]
    impl Eval for Identity {
        async fn eval(&self, value: &Value, _context: &PsMap) -> PsResult<Value> {
            Ok(value.clone())
        }
    }

    #[tokio::test]
    async fn native_fn_receives_literal_argument() {
        let f = PsFn::native(|call| {
            Box::pin(async move { Ok(Value::string(format!("got {}", call.arg))) })
        });
        let env = Identity;
        let rest = PsMap::new();
        let out = f
            .invoke(FnCall {
                arg: &Value::number(7.0),
                env: &env,
                rest: &rest,
            })
            .await
            .unwrap();
        assert_eq!(out, Value::string("got 7"));
    }

    #[test]
    fn identity_equality_only() {
        let a = PsFn::native(|_| Box::pin(async { Ok(Value::boolean(true)) }));
        let b = a.clone();
        let c = PsFn::native(|_| Box::pin(async { Ok(Value::boolean(true)) }));
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}
