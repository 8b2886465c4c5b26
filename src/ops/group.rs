//! Grouping and keying: `group_by`, `count_by`, `distinct_by`/`distinct`.
//!
//! # Overview
//! - [`group_by`] / [`count_by`] need a full scan before anything can be
//!   answered, so they are eager. Both return a `List` of `[key, value]` pairs
//!   with groups in order of first appearance.
//! - [`distinct_by`] / [`distinct`] are lazy and keep the set of keys seen so
//!   far for as long as the sequence lives.
//!
//! Keys use structural equality: `Int(1)` and `Float(1.0)` are different
//! keys, as are `"1"` and `1`.

use crate::callback::IntoCallback;
use crate::error::Result;
use crate::seq::{entries, Entries, Payload, Seq};
use crate::value::Value;
use std::collections::{HashMap, HashSet};

/// Group items by callback key.
///
/// ```
/// use seqchain::{ops, Value};
/// use serde_json::json;
///
/// let rows = json!([{"t": "a"}, {"t": "b"}, {"t": "a"}]);
/// let groups = ops::group_by(rows, |r: &Value| r.get("t"))?;
/// assert_eq!(groups[0].at(0), Value::from("a"));
/// assert_eq!(groups[0].at(1).as_list().map(<[Value]>::len), Some(2));
/// # Ok::<(), seqchain::SeqError>(())
/// ```
///
/// # Errors
/// Callback adaptation or a non-iterable source.
pub fn group_by<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Vec<Value>> {
    let mut groups: Vec<(Value, Vec<Value>)> = Vec::new();
    scan_keys(source.into(), f, "group_by", |slot, key, item| match slot {
        Some(i) => groups[i].1.push(item),
        None => groups.push((key, vec![item])),
    })?;
    Ok(groups
        .into_iter()
        .map(|(key, items)| Value::pair(key, items))
        .collect())
}

/// Count items by callback key.
///
/// # Errors
/// Callback adaptation or a non-iterable source.
pub fn count_by<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Vec<Value>> {
    let mut counts: Vec<(Value, usize)> = Vec::new();
    scan_keys(source.into(), f, "count_by", |slot, key, _| match slot {
        Some(i) => counts[i].1 += 1,
        None => counts.push((key, 1)),
    })?;
    Ok(counts
        .into_iter()
        .map(|(key, n)| Value::pair(key, n))
        .collect())
}

// Drives one pass, handing `visit` the slot of an already-seen key (or `None`
// the first time a key shows up). Slots are assigned in first-appearance order.
fn scan_keys<M>(
    payload: Payload,
    f: impl IntoCallback<M>,
    op: &'static str,
    mut visit: impl FnMut(Option<usize>, Value, Value),
) -> Result<()> {
    let f = f.into_callback().adapt()?;
    let Entries { items, source } = entries(payload, op)?;
    let mut slots: HashMap<Value, usize> = HashMap::new();
    for (idx, item) in items.enumerate() {
        let item = item?;
        let key = f.call(&item, idx, &source);
        match slots.get(&key) {
            Some(&slot) => visit(Some(slot), key, item),
            None => {
                slots.insert(key.clone(), slots.len());
                visit(None, key, item);
            }
        }
    }
    Ok(())
}

/// Lazily yield the first item for each distinct callback key.
///
/// # Errors
/// Callback adaptation or a non-iterable source.
pub fn distinct_by<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Seq> {
    let f = f.into_callback().adapt()?;
    let Entries { items, source } = entries(source.into(), "distinct_by")?;
    let mut seen: HashSet<Value> = HashSet::new();
    Ok(Seq::new(items.enumerate().filter_map(move |(idx, item)| {
        match item {
            Ok(item) => seen.insert(f.call(&item, idx, &source)).then_some(Ok(item)),
            Err(e) => Some(Err(e)),
        }
    })))
}

/// [`distinct_by`] keyed on the items themselves.
///
/// # Errors
/// A non-iterable source.
pub fn distinct(source: impl Into<Payload>) -> Result<Seq> {
    distinct_by(source, crate::callback::identity)
}
