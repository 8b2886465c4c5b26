//! Debug utilities for watching items flow through a pipeline of operations.

use crate::error::Result;
use crate::seq::{Payload, Seq};
use crate::value::Value;

/// Items printed per label before the output is cut short.
const SHOWN: usize = 10;

/// A lazy pass-through that prints every item it forwards to stderr, tagged
/// with `label`. Only the first few items are printed; the rest are still
/// forwarded.
///
/// Nothing is printed until the result is pulled, so this also shows *when*
/// a lazy pipeline actually runs.
///
/// # Errors
/// A non-iterable source.
///
/// # Example
///
/// ```
/// use seqchain::testing::debug_inspect;
/// use seqchain::{ops, Value};
///
/// # fn main() -> seqchain::Result<()> {
/// let watched = debug_inspect("source", vec![1, 2, 3])?;
/// let doubled = ops::map(watched, |v: &Value| v.as_i64().unwrap_or(0) * 2)?;
/// assert_eq!(doubled.materialize()?.len(), 3);
/// # Ok(())
/// # }
/// ```
pub fn debug_inspect(label: &str, source: impl Into<Payload>) -> Result<Seq> {
    let label = label.to_string();
    let items = source.into().into_seq("debug_inspect")?;
    Ok(Seq::new(items.enumerate().map(move |(i, item)| {
        match &item {
            Ok(v) if i < SHOWN => eprintln!("[Debug: {label}] [{i}]: {v}"),
            Ok(_) if i == SHOWN => eprintln!("[Debug: {label}] ..."),
            Err(e) => eprintln!("[Debug: {label}] [{i}]: error: {e}"),
            Ok(_) => {}
        }
        item
    })))
}

/// Drain a source and print how many items it held.
///
/// # Errors
/// A non-iterable source, or an error pulled from it.
pub fn debug_count(label: &str, source: impl Into<Payload>) -> Result<Vec<Value>> {
    let items = source.into().into_seq("debug_count")?.materialize()?;
    eprintln!("[Debug: {label}] Count: {} items", items.len());
    Ok(items)
}
