//! Integration tests demonstrating the testing utilities.

use anyhow::Result;
use seqchain::testing::*;
use seqchain::*;

#[test]
fn test_basic_chain_with_assertions() -> Result<()> {
    let result = wrap(vec![1, 2, 3])
        .map(|x: &Value| x.as_i64().unwrap_or(0) * 2)?
        .value()?;

    assert_values_equal(result.as_list().unwrap_or_default(), &[2, 4, 6].map(Value::from));
    Ok(())
}

#[test]
fn test_unordered_comparison() -> Result<()> {
    let result = ops::shuffle(vec![3, 1, 2])?;
    assert_unordered_equal(&result, &[1, 2, 3].map(Value::from));
    Ok(())
}

#[test]
fn test_grouped_orders() -> Result<()> {
    let orders = sample_orders();
    let groups = ops::group_by(orders.clone(), |o: &Value| o.get("customer"))?;

    assert_groups_equal(
        &groups,
        vec![
            (Value::from("bob"), vec![orders[1].clone(), orders[4].clone()]),
            (Value::from("carol"), vec![orders[3].clone()]),
            (
                Value::from("alice"),
                vec![orders[0].clone(), orders[2].clone(), orders[5].clone()],
            ),
        ],
    );
    Ok(())
}

#[test]
fn test_error_kind_through_a_chain() {
    assert_error_kind(wrap(vec![1]).call("nope", []), "UnknownOperation");
    assert_error_kind(ops::head(Vec::<i32>::new()), "NotFound");
}

#[test]
fn test_counting_source_measures_laziness() -> Result<()> {
    let (source, pulls) = counting_source(u64::MAX);
    let chain = wrap(source)
        .filter(|v: &Value| v.as_i64().is_some_and(|n| n % 3 == 0))?
        .first(3)?;
    assert_eq!(pulls.get(), 0);

    let mut chain = chain;
    let out = chain.value()?;
    assert_eq!(out, Value::from(vec![0, 3, 6]));
    assert_eq!(pulls.get(), 7);
    Ok(())
}

#[test]
fn test_debug_inspect_passes_items_through() -> Result<()> {
    let watched = debug_inspect("words", sample_words())?;
    let lengths = ops::map(watched, |w: &Value| w.as_str().map_or(0, str::len))?;
    assert_eq!(ops::sum(lengths)?, Value::from(31));
    Ok(())
}

#[test]
fn test_fixture_records_match_values() {
    let records = sample_order_records();
    let orders = sample_orders();
    assert_eq!(records.len(), orders.len());
    for (record, order) in records.iter().zip(&orders) {
        assert_eq!(order.get("product").as_str(), Some(record.product.as_str()));
    }
}
