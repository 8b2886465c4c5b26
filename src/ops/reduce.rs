//! Eager reducers: `length`, `each`, `reduce`, `reduce_right`, `find`, `all`,
//! `any`, `sum_by`.
//!
//! All of these drain their input before returning, except `find`, `all` and
//! `any`, which stop pulling as soon as the answer is known.

use crate::callback::{IntoCallback, Source};
use crate::error::{Result, SeqError};
use crate::seq::{entries, Entries, Payload};
use crate::value::Value;
use std::rc::Rc;

/// Number of items.
///
/// # Errors
/// A non-iterable source, or an error pulled from a pending source.
pub fn length(source: impl Into<Payload>) -> Result<usize> {
    let mut items = entries(source.into(), "length")?.items;
    items.try_fold(0, |n, item| item.map(|_| n + 1))
}

/// Alias of [`length`].
///
/// # Errors
/// See [`length`].
pub fn size(source: impl Into<Payload>) -> Result<usize> {
    length(source)
}

/// Run the callback on every item for its side effects.
///
/// Returns the input: a concrete source comes back as it was passed in, a
/// pending one as the `List` of the items visited (the original can't be
/// handed back once drained).
///
/// # Errors
/// Callback adaptation or a non-iterable source.
pub fn each<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Value> {
    let f = f.into_callback().adapt()?;
    let Entries { items, source } = entries(source.into(), "each")?;
    let mut visited = Vec::new();
    for (idx, item) in items.enumerate() {
        let item = item?;
        f.call(&item, idx, &source);
        if source.is_lazy() {
            visited.push(item);
        }
    }
    Ok(match source {
        Source::Concrete(whole) => Rc::try_unwrap(whole).unwrap_or_else(|rc| (*rc).clone()),
        Source::Lazy => Value::List(visited),
    })
}

/// Alias of [`each`].
///
/// # Errors
/// See [`each`].
pub fn for_each<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Value> {
    each(source, f)
}

/// Left fold. An empty source returns `seed` unchanged.
///
/// # Errors
/// A non-iterable source, or an error pulled from a pending source.
pub fn reduce<F>(source: impl Into<Payload>, mut fold: F, seed: impl Into<Value>) -> Result<Value>
where
    F: FnMut(Value, Value) -> Value,
{
    let mut items = entries(source.into(), "reduce")?.items;
    items.try_fold(seed.into(), |memo, item| Ok(fold(memo, item?)))
}

/// Right fold: like [`reduce`], but visits the items last to first.
///
/// # Errors
/// A non-iterable source, or an error pulled from a pending source.
pub fn reduce_right<F>(source: impl Into<Payload>, fold: F, seed: impl Into<Value>) -> Result<Value>
where
    F: FnMut(Value, Value) -> Value,
{
    let items = entries(source.into(), "reduce_right")?.items.materialize()?;
    Ok(items.into_iter().rev().fold(seed.into(), fold))
}

/// The first item, in source order, for which the callback is truthy.
///
/// # Errors
/// [`SeqError::NotFound`] if no item matches; callback adaptation or a
/// non-iterable source.
pub fn find<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Value> {
    let f = f.into_callback().adapt()?;
    let Entries { items, source } = entries(source.into(), "find")?;
    for (idx, item) in items.enumerate() {
        let item = item?;
        if f.call(&item, idx, &source).is_truthy() {
            return Ok(item);
        }
    }
    Err(SeqError::NotFound { op: "find" })
}

/// Whether the callback is truthy for every item. Stops at the first falsy one.
///
/// # Errors
/// Callback adaptation or a non-iterable source.
pub fn all<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<bool> {
    let f = f.into_callback().adapt()?;
    let Entries { items, source } = entries(source.into(), "all")?;
    for (idx, item) in items.enumerate() {
        if !f.call(&item?, idx, &source).is_truthy() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether the callback is truthy for some item. Stops at the first truthy one.
///
/// # Errors
/// Callback adaptation or a non-iterable source.
pub fn any<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<bool> {
    let f = f.into_callback().adapt()?;
    let Entries { items, source } = entries(source.into(), "any")?;
    for (idx, item) in items.enumerate() {
        if f.call(&item?, idx, &source).is_truthy() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Sum of the callback outputs, starting from `Int(0)`.
///
/// # Errors
/// [`SeqError::TypeMismatch`] if an output isn't numeric; callback adaptation
/// or a non-iterable source.
pub fn sum_by<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Value> {
    let f = f.into_callback().adapt()?;
    let Entries { items, source } = entries(source.into(), "sum_by")?;
    items
        .enumerate()
        .try_fold(Value::Int(0), |total, (idx, item)| {
            total.checked_add(&f.call(&item?, idx, &source), "sum_by")
        })
}

/// Sum of the items themselves.
///
/// # Errors
/// See [`sum_by`].
pub fn sum(source: impl Into<Payload>) -> Result<Value> {
    sum_by(source, crate::callback::identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::Seq;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    #[test]
    fn length_counts_map_entries() -> Result<()> {
        assert_eq!(length(json!({"a": 1, "b": 2}))?, 2);
        assert_eq!(size(Value::from("abc"))?, 3);
        Ok(())
    }

    #[test]
    fn each_returns_concrete_input_untouched() -> Result<()> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let out = each(vec![1, 2], move |v: &Value, i: usize| {
            log.borrow_mut().push((v.clone(), i));
        })?;
        assert_eq!(out, Value::from(vec![1, 2]));
        assert_eq!(*seen.borrow(), vec![(Value::from(1), 0), (Value::from(2), 1)]);
        Ok(())
    }

    #[test]
    fn each_on_pending_input_returns_visited_items() -> Result<()> {
        let out = for_each(Seq::from_values(vec![Value::from("x")]), || Value::Null)?;
        assert_eq!(out, Value::from(vec!["x"]));
        Ok(())
    }

    #[test]
    fn folds_respect_direction() -> Result<()> {
        let concat = |memo: Value, item: Value| {
            Value::from(format!("{}{}", memo.as_str().unwrap_or(""), item.as_str().unwrap_or("")))
        };
        assert_eq!(reduce(vec!["a", "b", "c"], concat, "")?, Value::from("abc"));
        assert_eq!(reduce_right(vec!["a", "b", "c"], concat, "")?, Value::from("cba"));
        Ok(())
    }

    #[test]
    fn empty_fold_returns_seed() -> Result<()> {
        assert_eq!(reduce(Vec::<i32>::new(), |m, _| m, 9)?, Value::from(9));
        assert_eq!(reduce_right(Vec::<i32>::new(), |m, _| m, 9)?, Value::from(9));
        Ok(())
    }

    #[test]
    fn find_short_circuits() -> Result<()> {
        let pulls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulls);
        let mut n = 0;
        let naturals = Seq::from_fn(move || {
            counter.set(counter.get() + 1);
            n += 1;
            Some(Value::from(n))
        });
        let hit = find(naturals, |v: &Value| v.as_i64().is_some_and(|n| n > 2))?;
        assert_eq!(hit, Value::from(3));
        assert_eq!(pulls.get(), 3);
        Ok(())
    }

    #[test]
    fn find_without_match_is_not_found() {
        let err = find(vec![1, 2], |_: &Value| false).err();
        assert_eq!(err, Some(SeqError::NotFound { op: "find" }));
    }

    #[test]
    fn all_and_any_on_empty() -> Result<()> {
        assert!(all(Vec::<i32>::new(), crate::callback::identity)?);
        assert!(!any(Vec::<i32>::new(), crate::callback::identity)?);
        assert!(!all(vec![1, 0, 2], crate::callback::identity)?);
        assert!(any(vec![0, 0, 2], crate::callback::identity)?);
        Ok(())
    }

    #[test]
    fn sum_promotes_and_rejects() -> Result<()> {
        assert_eq!(sum(vec![1, 2, 3])?, Value::from(6));
        assert_eq!(sum(json!([1, 0.5]))?, Value::from(1.5));
        assert_eq!(sum(Vec::<i32>::new())?, Value::from(0));
        assert_eq!(
            sum(json!([1, "x"])).err(),
            Some(SeqError::mismatch("sum_by", "a number", "string"))
        );
        Ok(())
    }
}
