use seqchain::testing::*;
use seqchain::{wrap, Arg, Chain, Payload, Registry, SeqError, Value};
use serde_json::json;
use std::rc::Rc;

fn is_even(v: &Value) -> bool {
    v.as_i64().is_some_and(|n| n % 2 == 0)
}

fn double(v: &Value) -> i64 {
    v.as_i64().unwrap_or(0) * 2
}

#[test]
fn filter_then_map() -> anyhow::Result<()> {
    let mut chain = wrap(vec![1, 2, 3, 4]).filter(is_even)?.map(double)?;
    assert_eq!(chain.value()?, Value::from(vec![4, 8]));
    Ok(())
}

#[test]
fn dispatch_by_name() -> anyhow::Result<()> {
    let mut chain = Chain::new(vec![5, 3, 9, 1])
        .call("sort_by", [Arg::callback(seqchain::identity)])?
        .call("take", [Arg::from(3_usize)])?
        .call("rev", [])?;
    assert_eq!(chain.value()?, Value::from(vec![5, 3, 1]));
    Ok(())
}

#[test]
fn aliases_reach_the_same_operation() -> anyhow::Result<()> {
    let a = Chain::new(json!([1, 1, 2])).call("distinct", [])?.value()?;
    let b = Chain::new(json!([1, 1, 2])).call("distinct_by", [])?.value()?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn unknown_operation_names_the_attempt() {
    let err = Chain::new(vec![1]).call("explode", []).err();
    let typed = err.as_ref().and_then(|e| e.downcast_ref::<SeqError>());
    assert_eq!(typed, Some(&SeqError::UnknownOperation { name: "explode".into() }));
}

#[test]
fn unknown_operation_does_not_touch_a_lazy_payload() -> anyhow::Result<()> {
    let (source, pulls) = counting_source(10);
    let registry = Registry::shared();
    let err = Chain::with_registry(source, Rc::clone(&registry)).call("nope", []);
    assert_error_kind(err, "UnknownOperation");
    assert_eq!(pulls.get(), 0);
    Ok(())
}

#[test]
fn value_leaves_maps_alone() -> anyhow::Result<()> {
    let source = json!({"k": [1, 2]});
    let mut chain = Chain::new(source.clone());
    assert_eq!(chain.value()?, Value::from(source));
    Ok(())
}

#[test]
fn value_returns_eager_results_unchanged() -> anyhow::Result<()> {
    let mut chain = Chain::new(vec![1, 2, 3]).call("length", [])?;
    assert_eq!(chain.value()?, Value::from(3));
    Ok(())
}

#[test]
fn max_on_an_empty_chain_is_null() -> anyhow::Result<()> {
    let mut chain = Chain::new(json!([])).call("max", [])?;
    assert_eq!(chain.value()?, Value::Null);
    Ok(())
}

#[test]
fn reduce_through_the_chain() -> anyhow::Result<()> {
    let product = |memo: Value, item: Value| {
        Value::from(memo.as_i64().unwrap_or(0) * item.as_i64().unwrap_or(0))
    };
    let mut chain = wrap(vec![1, 2, 3, 4]).reduce(product, 1)?;
    assert_eq!(chain.value()?, Value::from(24));
    Ok(())
}

#[test]
fn reduce_without_a_fold_is_invalid() {
    assert_error_kind(Chain::new(vec![1]).call("reduce", [Arg::value(0)]), "InvalidArgument");
}

#[test]
fn finalized_chains_refuse_more_calls() -> anyhow::Result<()> {
    let mut chain = wrap(vec![1, 2]).first(1)?;
    chain.value()?;
    assert_error_kind(chain.call("map", []), "Finalized");
    Ok(())
}

#[test]
fn a_failed_drain_keeps_failing() -> anyhow::Result<()> {
    let mut chain = wrap(json!([[1], 2])).collect(seqchain::identity)?;
    let first = chain.value();
    let second = chain.value();
    assert_error_kind(first, "TypeMismatch");
    assert_error_kind(second, "TypeMismatch");
    assert_error_kind(chain.call("length", []), "TypeMismatch");
    Ok(())
}

#[test]
fn a_failed_chain_hands_back_its_error() -> anyhow::Result<()> {
    let mut chain = wrap(json!([[1], 2])).collect(seqchain::identity)?;
    assert!(chain.value().is_err());
    let Payload::Seq(mut seq) = chain.into_payload() else {
        anyhow::bail!("expected the error as a pending item");
    };
    assert!(matches!(seq.next(), Some(Err(SeqError::TypeMismatch { .. }))));
    assert!(seq.next().is_none());
    Ok(())
}

#[test]
fn into_payload_keeps_streaming() -> anyhow::Result<()> {
    let (source, pulls) = counting_source(u64::MAX);
    let payload = wrap(source).map(double)?.into_payload();
    assert!(payload.is_pending());
    let Payload::Seq(mut seq) = payload else {
        anyhow::bail!("expected a pending payload");
    };
    assert_eq!(seq.next().transpose()?, Some(Value::from(0)));
    assert_eq!(seq.next().transpose()?, Some(Value::from(2)));
    assert_eq!(pulls.get(), 2);
    Ok(())
}

#[test]
fn custom_registry_operations_and_aliases() -> anyhow::Result<()> {
    let mut registry = Registry::standard();
    registry.register("evens", |payload, _args| {
        Ok(seqchain::ops::filter(payload, is_even)?.into())
    });
    registry.alias("only_evens", "evens")?;

    let mut chain = Chain::with_registry(vec![1, 2, 3, 4], Rc::new(registry))
        .call("only_evens", [])?
        .call("sum", [])?;
    assert_eq!(chain.value()?, Value::from(6));
    Ok(())
}

#[test]
fn errors_carry_the_failing_call() {
    let err = wrap(json!([1, "x"])).call("sum", []).err();
    let message = err.map(|e| format!("{e:#}")).unwrap_or_default();
    assert!(message.contains("chained call `sum`"), "{message}");
    assert!(message.contains("sum_by"), "{message}");
}

#[test]
fn group_by_then_value() -> anyhow::Result<()> {
    let mut chain = wrap(sample_orders()).group_by(|o: &Value| o.get("customer"))?;
    let groups = chain.value()?;
    assert_eq!(groups.as_list().map(<[Value]>::len), Some(3));
    Ok(())
}

#[test]
fn debug_rendering() -> anyhow::Result<()> {
    let mut chain = wrap(vec![1]).call("length", [])?;
    assert_eq!(format!("{chain:?}"), "Chain(1)");
    chain.value()?;
    assert_eq!(format!("{chain:?}"), "Chain(1)");
    Ok(())
}
