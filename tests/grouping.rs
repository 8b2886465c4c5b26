use seqchain::testing::*;
use seqchain::{ops, Value};
use serde_json::json;

#[test]
fn group_by_keeps_items_in_source_order() -> anyhow::Result<()> {
    let rows = json!([{"t": "a"}, {"t": "b"}, {"t": "a"}]);
    let groups = ops::group_by(rows.clone(), |r: &Value| r.get("t"))?;
    let items = ops::to_list(rows)?;

    assert_groups_equal(
        &groups,
        vec![
            (Value::from("a"), vec![items[0].clone(), items[2].clone()]),
            (Value::from("b"), vec![items[1].clone()]),
        ],
    );
    Ok(())
}

#[test]
fn group_by_orders_groups_by_first_appearance() -> anyhow::Result<()> {
    let groups = ops::group_by(sample_orders(), |o: &Value| o.get("customer"))?;
    let keys: Vec<Value> = groups.iter().map(|g| g.at(0)).collect();
    assert_values_equal(&keys, &["alice", "bob", "carol"].map(Value::from));
    Ok(())
}

#[test]
fn count_by_tallies_words() -> anyhow::Result<()> {
    let counts = ops::count_by(sample_words(), seqchain::identity)?;
    let the = counts.iter().find(|pair| pair.at(0) == Value::from("the"));
    assert_eq!(the.map(|pair| pair.at(1)), Some(Value::from(2)));
    assert_eq!(counts.len(), 7);
    Ok(())
}

#[test]
fn count_by_on_an_empty_source_is_empty() -> anyhow::Result<()> {
    assert!(ops::count_by(json!([]), seqchain::identity)?.is_empty());
    Ok(())
}

#[test]
fn int_and_float_keys_are_distinct() -> anyhow::Result<()> {
    let out = ops::distinct(json!([1, 1.0, 1, "1"]))?.materialize()?;
    assert_eq!(out.len(), 3);
    Ok(())
}

#[test]
fn distinct_by_keeps_the_first_item_per_key() -> anyhow::Result<()> {
    let firsts = ops::distinct_by(sample_orders(), |o: &Value| o.get("product"))?;
    let ids: Vec<Value> = firsts.materialize()?.iter().map(|o| o.get("id")).collect();
    assert_values_equal(&ids, &[1, 2, 3, 4].map(Value::from));
    Ok(())
}

#[test]
fn distinct_is_lazy() -> anyhow::Result<()> {
    let (source, pulls) = counting_source(u64::MAX);
    let buckets = ops::distinct_by(source, |v: &Value| v.as_i64().unwrap_or(0) / 10)?;
    assert_eq!(pulls.get(), 0);
    let first_two = ops::first(buckets, 2)?.materialize()?;
    assert_values_equal(&first_two, &[Value::from(0), Value::from(10)]);
    assert_eq!(pulls.get(), 11);
    Ok(())
}
