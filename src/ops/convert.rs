//! List and map conversions.

use crate::error::{Result, SeqError};
use crate::seq::{entries, Payload};
use crate::value::Value;
use std::collections::BTreeMap;

/// Drain the source into a list. Maps become their `[key, value]` pairs.
///
/// # Errors
/// A non-iterable source, or an error pulled from a pending source.
pub fn to_list(source: impl Into<Payload>) -> Result<Vec<Value>> {
    entries(source.into(), "to_list")?.items.materialize()
}

/// Build a map from `[key, value]` pairs. A map source passes through
/// untouched; a repeated key keeps the last value.
///
/// # Errors
/// [`SeqError::TypeMismatch`] for an item that isn't a two-item list; a
/// non-iterable source.
pub fn to_dict(source: impl Into<Payload>) -> Result<BTreeMap<Value, Value>> {
    let items = match source.into() {
        Payload::Value(Value::Map(m)) => return Ok(m),
        other => entries(other, "to_dict")?.items,
    };
    let mut out = BTreeMap::new();
    for item in items {
        match item? {
            Value::List(mut pair) if pair.len() == 2 => {
                let value = pair.pop().unwrap_or_default();
                let key = pair.pop().unwrap_or_default();
                out.insert(key, value);
            }
            other => {
                return Err(SeqError::mismatch("to_dict", "a [key, value] pair", other.kind()));
            }
        }
    }
    Ok(out)
}
