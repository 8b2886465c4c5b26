//! Ordering operations: stable `sort_by`, its reversed twin
//! `sort_by_descending`, and `shuffle`.

use crate::callback::IntoCallback;
use crate::error::Result;
use crate::seq::{entries, Entries, Payload};
use crate::utils::SplitMix64;
use crate::value::Value;
use std::cmp::Ordering;

type Keyed = (Value, Value);

/// Stable ascending sort by callback key.
///
/// # Errors
/// [`TypeMismatch`](crate::SeqError::TypeMismatch) if two keys aren't
/// comparable; callback adaptation or a non-iterable source.
pub fn sort_by<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Vec<Value>> {
    sorted(source.into(), f, "sort_by")
}

/// Descending sort: the exact reverse of [`sort_by`].
///
/// Items with equal keys therefore come out in the reverse of their relative
/// source order, not in source order.
///
/// # Errors
/// See [`sort_by`].
pub fn sort_by_descending<M>(
    source: impl Into<Payload>,
    f: impl IntoCallback<M>,
) -> Result<Vec<Value>> {
    let mut items = sorted(source.into(), f, "sort_by_descending")?;
    items.reverse();
    Ok(items)
}

fn sorted<M>(payload: Payload, f: impl IntoCallback<M>, op: &'static str) -> Result<Vec<Value>> {
    let f = f.into_callback().adapt()?;
    let Entries { items, source } = entries(payload, op)?;
    let keyed = items
        .enumerate()
        .map(|(idx, item)| item.map(|item| (f.call(&item, idx, &source), item)))
        .collect::<Result<Vec<Keyed>>>()?;
    Ok(merge_sort(keyed, op)?.into_iter().map(|(_, item)| item).collect())
}

// Stable merge sort over a fallible comparison. The slice sorts need a total
// order up front, which mixed-type keys can't promise.
fn merge_sort(mut run: Vec<Keyed>, op: &'static str) -> Result<Vec<Keyed>> {
    if run.len() <= 1 {
        return Ok(run);
    }
    let right = run.split_off(run.len() / 2);
    let left = merge_sort(run, op)?;
    let right = merge_sort(right, op)?;

    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some((l, _)), Some((r, _))) => r.compare(l, op)? == Ordering::Less,
            _ => break,
        };
        out.extend(if take_right { right.next() } else { left.next() });
    }
    out.extend(left);
    out.extend(right);
    Ok(out)
}

/// A shuffled copy of the items, seeded from the clock.
///
/// # Errors
/// A non-iterable source, or an error pulled from a pending source.
pub fn shuffle(source: impl Into<Payload>) -> Result<Vec<Value>> {
    shuffled(source.into(), SplitMix64::from_clock())
}

/// A shuffled copy of the items; the same seed gives the same permutation.
///
/// # Errors
/// See [`shuffle`].
pub fn shuffle_seeded(source: impl Into<Payload>, seed: u64) -> Result<Vec<Value>> {
    shuffled(source.into(), SplitMix64::new(seed))
}

fn shuffled(payload: Payload, mut rng: SplitMix64) -> Result<Vec<Value>> {
    let mut items = entries(payload, "shuffle")?.items.materialize()?;
    // Fisher-Yates
    for i in (1..items.len()).rev() {
        items.swap(i, rng.below(i + 1));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeqError;
    use serde_json::json;

    fn key(v: &Value) -> Value {
        v.at(0)
    }

    #[test]
    fn sort_is_stable() -> Result<()> {
        let rows = json!([[2, "a"], [1, "b"], [2, "c"], [1, "d"]]);
        let tags: Vec<Value> = sort_by(rows, key)?.iter().map(|r| r.at(1)).collect();
        assert_eq!(tags, vec![Value::from("b"), Value::from("d"), Value::from("a"), Value::from("c")]);
        Ok(())
    }

    #[test]
    fn descending_reverses_ties() -> Result<()> {
        let rows = json!([[2, "a"], [1, "b"], [2, "c"], [1, "d"]]);
        let tags: Vec<Value> = sort_by_descending(rows, key)?.iter().map(|r| r.at(1)).collect();
        assert_eq!(tags, vec![Value::from("c"), Value::from("a"), Value::from("d"), Value::from("b")]);
        Ok(())
    }

    #[test]
    fn mixed_numeric_keys_sort_together() -> Result<()> {
        let out = sort_by(json!([2.5, 1, 3]), crate::callback::identity)?;
        assert_eq!(out, vec![Value::from(1), Value::from(2.5), Value::from(3)]);
        Ok(())
    }

    #[test]
    fn incomparable_keys_fail() {
        let err = sort_by(json!([1, "a"]), crate::callback::identity).err();
        assert_eq!(err.map(|e| e.kind()), Some("TypeMismatch"));
    }

    #[test]
    fn seeded_shuffle_is_a_stable_permutation() -> Result<()> {
        let a = shuffle_seeded(vec![1, 2, 3, 4, 5, 6], 9)?;
        let b = shuffle_seeded(vec![1, 2, 3, 4, 5, 6], 9)?;
        assert_eq!(a, b);
        let mut sorted = a;
        sorted.sort();
        assert_eq!(sorted, (1..=6).map(Value::from).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn shuffle_of_a_scalar_is_rejected() {
        assert!(matches!(
            shuffle(Value::from(1)),
            Err(SeqError::TypeMismatch { op: "shuffle", .. })
        ));
    }
}
