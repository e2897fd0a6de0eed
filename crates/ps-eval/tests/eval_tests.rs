//! End-to-end evaluation tests: source text in, value (or error) out.

use ps_eval::{evaluate, strip, EvalOptions};
use ps_types::{PsError, PsFn, PsMap, Value, ValueKind};
use std::sync::{Arc, Mutex};

async fn eval(source: &str) -> Value {
    evaluate(source, EvalOptions::default())
        .await
        .unwrap_or_else(|e| panic!("evaluating {source:?}: {e}"))
}

async fn eval_with(source: &str, context: PsMap) -> Value {
    evaluate(
        source,
        EvalOptions {
            context: Some(context),
            ..Default::default()
        },
    )
    .await
    .unwrap_or_else(|e| panic!("evaluating {source:?}: {e}"))
}

async fn eval_err(source: &str, context: PsMap) -> PsError {
    evaluate(
        source,
        EvalOptions {
            context: Some(context),
            ..Default::default()
        },
    )
    .await
    .expect_err("evaluation should fail")
}

fn ctx(pairs: &[(&str, Value)]) -> PsMap {
    pairs
        .iter()
        .map(|(k, v)| (Value::string(*k), v.clone()))
        .collect()
}

#[tokio::test]
async fn literals_evaluate_to_themselves() {
    assert_eq!(eval("5").await, Value::number(5.0));
    assert_eq!(eval("true").await, Value::boolean(true));
    assert_eq!(eval("'quoted'").await, Value::string("quoted"));
    assert_eq!(eval("bare word").await, Value::string("bare word"));
}

#[tokio::test]
async fn references_resolve_against_the_context() {
    let out = eval_with("$x", ctx(&[("x", Value::string("fin"))])).await;
    assert_eq!(out, Value::string("fin"));
}

#[tokio::test]
async fn unbound_reference_is_a_reference_error() {
    let err = eval_err("$nope", PsMap::new()).await;
    match err {
        PsError::Reference { message, .. } => assert!(message.contains("$nope"), "{message}"),
        other => panic!("expected reference error, got {other}"),
    }
}

#[tokio::test]
async fn dotted_references_traverse_mappings() {
    let conf = ctx(&[("port", Value::number(8080.0))]);
    let context = ctx(&[("conf", Value::map(conf))]);

    assert_eq!(
        eval_with("$conf.port", context.clone()).await,
        Value::number(8080.0)
    );

    assert!(matches!(
        eval_err("$conf.host", context.clone()).await,
        PsError::Reference { .. }
    ));
    // Traversing through a non-mapping is a type error, not a reference one.
    assert!(matches!(
        eval_err("$conf.port.deeper", context).await,
        PsError::Type { .. }
    ));
}

#[tokio::test]
async fn interpolation_fills_holes_in_order() {
    let context = ctx(&[
        ("to", Value::string("u")),
        ("emotion", Value::string("luv")),
    ]);
    let out = eval_with("Hello $to, i $emotion u", context).await;
    assert_eq!(out, Value::string("Hello u, i luv u"));
}

#[tokio::test]
async fn interpolated_numbers_render_without_fraction() {
    let out = eval_with("port is $port", ctx(&[("port", Value::number(8080.0))])).await;
    assert_eq!(out, Value::string("port is 8080"));
}

#[tokio::test]
async fn interpolation_failure_aborts_the_string() {
    // The error is located at the enclosing string literal.
    let err = eval_err("hello $missing", PsMap::new()).await;
    assert!(matches!(err, PsError::Reference { .. }));
    assert!(err.span().is_some());
}

#[tokio::test]
async fn single_quotes_are_inert() {
    let out = eval_with("'$x'", ctx(&[("x", Value::string("hidden"))])).await;
    assert_eq!(out, Value::string("$x"));
}

#[tokio::test]
async fn do_block_yields_the_last_item() {
    let out = eval_with("$do: [5, 10, $x]", ctx(&[("x", Value::string("fin"))])).await;
    assert_eq!(out, Value::string("fin"));
}

#[tokio::test]
async fn do_with_a_single_value_yields_it() {
    assert_eq!(eval("$do: 5").await, Value::number(5.0));
}

#[tokio::test]
async fn do_with_an_empty_list_is_false() {
    assert_eq!(eval("$do: []").await, Value::boolean(false));
}

#[tokio::test]
async fn let_and_do_commute() {
    assert_eq!(
        eval("$let: {x: 5}\n$do: $x").await,
        Value::number(5.0)
    );
    assert_eq!(
        eval("$do: $x\n$let: {x: 5}").await,
        Value::number(5.0)
    );
}

#[tokio::test]
async fn let_without_do_is_false() {
    assert_eq!(eval("$let: {x: 5}").await, Value::boolean(false));
}

#[tokio::test]
async fn let_bindings_must_be_a_mapping() {
    assert!(matches!(
        eval_err("$let: 5\n$do: $x", PsMap::new()).await,
        PsError::Type { .. }
    ));
}

#[tokio::test]
async fn inner_bindings_shadow_outer_ones() {
    let out = eval(
        "$let: {x: outer}\n$do:\n  $let: {x: inner}\n  $do: $x",
    )
    .await;
    assert_eq!(out, Value::string("inner"));
}

#[tokio::test]
async fn sibling_bindings_do_not_see_each_other() {
    assert!(matches!(
        eval_err("$let: {a: 1, b: $a}\n$do: $b", PsMap::new()).await,
        PsError::Reference { .. }
    ));
}

#[tokio::test]
async fn empty_mapping_is_false() {
    assert_eq!(eval("{}").await, Value::boolean(false));
}

#[tokio::test]
async fn plain_mappings_pass_through_as_data() {
    let out = eval("a: 1\nb: two").await;
    let map = out.as_map().expect("expected map");
    assert_eq!(map.get_str("a"), Some(&Value::number(1.0)));
    assert_eq!(map.get_str("b"), Some(&Value::string("two")));
}

#[tokio::test]
async fn mapping_values_stay_literal() {
    // A pass-through mapping does not evaluate its values.
    let out = eval("a: $unbound").await;
    let map = strip(&out);
    let map = map.as_map().expect("expected map");
    assert!(matches!(
        map.get_str("a").map(|v| &v.kind),
        Some(ValueKind::Ref(_))
    ));
}

#[tokio::test]
async fn calling_a_non_function_is_a_type_error() {
    let err = eval_err("$x: 1", ctx(&[("x", Value::number(5.0))])).await;
    match err {
        PsError::Type { message, .. } => assert!(message.contains("number"), "{message}"),
        other => panic!("expected type error, got {other}"),
    }
}

#[tokio::test]
async fn closures_apply_to_their_argument() {
    let out = eval("$let: {id: {$(x): $x}}\n$do: {$id: 'hi'}").await;
    assert_eq!(out, Value::string("hi"));
}

#[tokio::test]
async fn closure_arguments_evaluate_in_the_callers_scope() {
    let out = eval(
        "$let: {id: {$(x): $x}}\n$do:\n  $let: {y: 5}\n  $do: {$id: $y}",
    )
    .await;
    assert_eq!(out, Value::number(5.0));
}

#[tokio::test]
async fn closures_capture_their_definition_scope() {
    let out = eval_with(
        "$let: {f: {$(y): $x}}\n$do:\n  $let: {x: inner}\n  $do: {$f: 0}",
        ctx(&[("x", Value::string("outer"))]),
    )
    .await;
    assert_eq!(out, Value::string("outer"));
}

#[tokio::test]
async fn multi_parameter_closures_bind_from_a_list() {
    let out = eval("$let: {pair: {$(a, b): [$b, $a]}}\n$do: {$pair: [1, 2]}").await;
    assert_eq!(
        out,
        Value::list(vec![Value::number(2.0), Value::number(1.0)])
    );
}

#[tokio::test]
async fn arity_mismatch_is_a_type_error() {
    assert!(matches!(
        eval_err("$let: {pair: {$(a, b): $a}}\n$do: {$pair: 1}", PsMap::new()).await,
        PsError::Type { .. }
    ));
}

fn tracer(log: Arc<Mutex<Vec<String>>>) -> Value {
    Value::function(PsFn::native(move |call| {
        let log = log.clone();
        Box::pin(async move {
            let arg = call.env.eval(call.arg, &PsMap::new()).await?;
            log.lock().unwrap().push(arg.to_string());
            Ok(arg)
        })
    }))
}

#[tokio::test]
async fn host_functions_are_callable_from_documents() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let out = eval_with("$trace: hello", ctx(&[("trace", tracer(log.clone()))])).await;
    assert_eq!(out, Value::string("hello"));
    assert_eq!(*log.lock().unwrap(), vec!["hello"]);
}

#[tokio::test]
async fn do_items_run_strictly_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let context = ctx(&[("trace", tracer(log.clone()))]);
    let out = eval_with(
        "$do: [{$trace: a}, {$trace: b}, {$trace: c}]",
        context,
    )
    .await;
    assert_eq!(out, Value::string("c"));
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn binding_values_evaluate_before_the_block_runs() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let context = ctx(&[("trace", tracer(log.clone()))]);
    let out = eval_with(
        "$let: {a: {$trace: bind}}\n$do: [{$trace: body}, $a]",
        context,
    )
    .await;
    assert_eq!(out, Value::string("bind"));
    assert_eq!(*log.lock().unwrap(), vec!["bind", "body"]);
}

#[tokio::test]
async fn syntax_errors_carry_the_filename() {
    let err = evaluate(
        "a: [1,",
        EvalOptions {
            filename: Some("broken.ps".into()),
            ..Default::default()
        },
    )
    .await
    .expect_err("should fail");
    match err {
        PsError::Syntax { filename, .. } => assert_eq!(filename, "broken.ps"),
        other => panic!("expected syntax error, got {other}"),
    }
}
