//! Positional operations: `first`/`take`, `rest`/`skip`, `rev`, `head`.

use crate::error::{Result, SeqError};
use crate::seq::{entries, Payload, Seq};
use crate::value::Value;

/// Lazily yield at most `n` leading items.
///
/// Never pulls more than `n` items from upstream; `n = 0` pulls nothing.
///
/// # Errors
/// A non-iterable source.
pub fn first(source: impl Into<Payload>, n: usize) -> Result<Seq> {
    let items = entries(source.into(), "first")?.items;
    Ok(Seq::new(items.take(n)))
}

/// Alias of [`first`].
///
/// # Errors
/// See [`first`].
pub fn take(source: impl Into<Payload>, n: usize) -> Result<Seq> {
    first(source, n)
}

/// Lazily discard the first `n` items and yield the rest.
///
/// The discarded items are still pulled (and dropped) on the first pull.
///
/// # Errors
/// A non-iterable source.
pub fn rest(source: impl Into<Payload>, n: usize) -> Result<Seq> {
    let items = entries(source.into(), "rest")?.items;
    Ok(Seq::new(items.skip(n)))
}

/// Alias of [`rest`].
///
/// # Errors
/// See [`rest`].
pub fn skip(source: impl Into<Payload>, n: usize) -> Result<Seq> {
    rest(source, n)
}

/// The items in reverse order. Lazy, but the first pull drains the upstream.
///
/// # Errors
/// A non-iterable source.
pub fn rev(source: impl Into<Payload>) -> Result<Seq> {
    let items = entries(source.into(), "rev")?.items;
    Ok(Seq::deferred(move || {
        let mut all = items.materialize()?;
        all.reverse();
        Ok(all)
    }))
}

/// The first item.
///
/// # Errors
/// [`SeqError::NotFound`] on an empty source, or a non-iterable source.
pub fn head(source: impl Into<Payload>) -> Result<Value> {
    let mut items = entries(source.into(), "head")?.items;
    items.next().unwrap_or(Err(SeqError::NotFound { op: "head" }))
}
