//! `max` / `min`: single pass, tracking the running best score and item.

use crate::callback::IntoCallback;
use crate::error::Result;
use crate::seq::{entries, Entries, Payload};
use crate::value::Value;
use std::cmp::Ordering;

/// The item with the greatest callback score, or `None` for an empty source.
///
/// Ties keep the first such item in source order. A falsy score (`0`,
/// `false`) is a legitimate candidate like any other.
///
/// # Errors
/// [`TypeMismatch`](crate::SeqError::TypeMismatch) when two scores aren't
/// comparable; callback adaptation or a non-iterable source.
pub fn max<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Option<Value>> {
    extreme(source.into(), f, Ordering::Greater, "max")
}

/// The item with the smallest callback score, or `None` for an empty source.
///
/// Ties keep the first such item in source order.
///
/// # Errors
/// See [`max`].
pub fn min<M>(source: impl Into<Payload>, f: impl IntoCallback<M>) -> Result<Option<Value>> {
    extreme(source.into(), f, Ordering::Less, "min")
}

fn extreme<M>(
    payload: Payload,
    f: impl IntoCallback<M>,
    wanted: Ordering,
    op: &'static str,
) -> Result<Option<Value>> {
    let f = f.into_callback().adapt()?;
    let Entries { items, source } = entries(payload, op)?;
    let mut best: Option<(Value, Value)> = None;
    for (idx, item) in items.enumerate() {
        let item = item?;
        let score = f.call(&item, idx, &source);
        // strict: an equal score never displaces the incumbent
        let replace = match &best {
            None => true,
            Some((top, _)) => score.compare(top, op)? == wanted,
        };
        if replace {
            best = Some((score, item));
        }
    }
    Ok(best.map(|(_, item)| item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeqError;
    use serde_json::json;

    fn field_a(v: &Value) -> Value {
        v.get("a")
    }

    #[test]
    fn first_of_tied_maximum_wins() -> Result<()> {
        let rows = json!([{"a": 1, "id": 0}, {"a": 3, "id": 1}, {"a": 3, "id": 2}]);
        let top = max(rows, field_a)?;
        assert_eq!(top.map(|v| v.get("id")), Some(Value::from(1)));
        Ok(())
    }

    #[test]
    fn first_of_tied_minimum_wins() -> Result<()> {
        let rows = json!([{"a": 2, "id": 0}, {"a": 0, "id": 1}, {"a": 0, "id": 2}]);
        let low = min(rows, field_a)?;
        assert_eq!(low.map(|v| v.get("id")), Some(Value::from(1)));
        Ok(())
    }

    #[test]
    fn zero_score_is_a_real_candidate() -> Result<()> {
        assert_eq!(max(vec![0, -1, -5], crate::callback::identity)?, Some(Value::from(0)));
        assert_eq!(min(json!([false, true]), crate::callback::identity)?, Some(Value::from(false)));
        Ok(())
    }

    #[test]
    fn empty_source_has_no_extreme() -> Result<()> {
        assert_eq!(max(Vec::<i32>::new(), crate::callback::identity)?, None);
        Ok(())
    }

    #[test]
    fn incomparable_scores_are_rejected() {
        let err = max(json!([1, "two"]), crate::callback::identity).err();
        assert_eq!(err, Some(SeqError::mismatch("max", "comparable values", "string")));
    }
}
