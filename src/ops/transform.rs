//! Element-wise lazy transforms: `map`, `filter`, `reject`, `collect`, `append`.

use crate::callback::{Adapted, IntoCallback};
use crate::error::Result;
use crate::seq::{entries, Entries, Payload, Seq};
use std::iter::once;

/// Lazily yield the callback's output for every item.
///
/// # Errors
/// Callback adaptation or a non-iterable source.
pub fn map<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Seq> {
    let f = f.into_callback().adapt()?;
    let Entries { items, source } = entries(source.into(), "map")?;
    Ok(Seq::new(items.enumerate().map(move |(idx, item)| {
        item.map(|item| f.call(&item, idx, &source))
    })))
}

/// Lazily yield the items for which the callback is truthy.
///
/// # Errors
/// Callback adaptation or a non-iterable source.
pub fn filter<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Seq> {
    keep_where(source.into(), f.into_callback().adapt()?, true, "filter")
}

/// The complement of [`filter`]: lazily yield the items for which the
/// callback is falsy.
///
/// # Errors
/// Callback adaptation or a non-iterable source.
pub fn reject<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Seq> {
    keep_where(source.into(), f.into_callback().adapt()?, false, "reject")
}

fn keep_where(payload: Payload, f: Adapted, keep: bool, op: &'static str) -> Result<Seq> {
    let Entries { items, source } = entries(payload, op)?;
    Ok(Seq::new(items.enumerate().filter_map(move |(idx, item)| {
        match item {
            Ok(item) => (f.call(&item, idx, &source).is_truthy() == keep).then_some(Ok(item)),
            Err(e) => Some(Err(e)),
        }
    })))
}

/// Flat-map: the callback returns an iterable per item, and every element of
/// every result is yielded in order. Flattens exactly one level.
///
/// A callback result that isn't iterable surfaces as a
/// [`TypeMismatch`](crate::SeqError::TypeMismatch) item when it is reached.
///
/// # Errors
/// Callback adaptation or a non-iterable source.
pub fn collect<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Seq> {
    let f = f.into_callback().adapt()?;
    let Entries { items, source } = entries(source.into(), "collect")?;
    Ok(Seq::new(items.enumerate().flat_map(move |(idx, item)| {
        let produced = item.and_then(|item| {
            let inner = f.call(&item, idx, &source);
            entries(inner.into(), "collect")
        });
        match produced {
            Ok(inner) => inner.items,
            Err(e) => Seq::new(once(Err(e))),
        }
    })))
}

/// Concatenate two sources lazily: every item of `first`, then every item of
/// `second`.
///
/// # Errors
/// Either source is not iterable.
pub fn append(first: impl Into<Payload>, second: impl Into<Payload>) -> Result<Seq> {
    let head = entries(first.into(), "append")?.items;
    let tail = entries(second.into(), "append")?.items;
    Ok(Seq::new(head.chain(tail)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use crate::SeqError;
    use serde_json::json;

    fn ints(v: &Value) -> i64 {
        v.as_i64().unwrap_or_default()
    }

    #[test]
    fn map_passes_index_to_binary_callbacks() -> Result<()> {
        let out = map(vec!["a", "b"], |v: &Value, i: usize| Value::pair(v.clone(), i))?;
        assert_eq!(out.materialize()?, vec![Value::pair("a", 0), Value::pair("b", 1)]);
        Ok(())
    }

    #[test]
    fn filter_and_reject_partition_the_source() -> Result<()> {
        let odd = |v: &Value| ints(v) % 2 == 1;
        let kept = filter(vec![1, 2, 3, 4, 5], odd)?.materialize()?;
        let dropped = reject(vec![1, 2, 3, 4, 5], odd)?.materialize()?;
        assert_eq!(kept, vec![Value::from(1), Value::from(3), Value::from(5)]);
        assert_eq!(dropped, vec![Value::from(2), Value::from(4)]);
        Ok(())
    }

    #[test]
    fn collect_flattens_one_level() -> Result<()> {
        let out = collect(json!([[1, [2]], [3]]), crate::callback::identity)?;
        assert_eq!(
            out.materialize()?,
            vec![Value::from(1), Value::from(vec![2]), Value::from(3)]
        );
        Ok(())
    }

    #[test]
    fn collect_reports_non_iterable_results_lazily() -> Result<()> {
        let mut out = collect(vec![1, 2], |v: &Value| v.clone())?;
        assert_eq!(
            out.next().transpose().err(),
            Some(SeqError::mismatch("collect", "an iterable", "int"))
        );
        assert!(out.next().is_none());
        Ok(())
    }

    #[test]
    fn append_drains_first_then_second() -> Result<()> {
        let out = append(vec![1, 2], json!({"k": "v"}))?.materialize()?;
        assert_eq!(out, vec![Value::from(1), Value::from(2), Value::pair("k", "v")]);
        Ok(())
    }
}
