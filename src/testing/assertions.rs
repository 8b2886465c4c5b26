//! Assertion functions for testing operation outputs.
//!
//! These compare values produced by operations or chains with expected
//! results and panic with a detailed message when they differ.

use crate::error::SeqError;
use crate::value::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;

/// Assert that two value lists are equal in order and content.
///
/// # Panics
///
/// Panics if the lists differ in length or content.
///
/// # Example
///
/// ```
/// use seqchain::testing::assert_values_equal;
/// use seqchain::Value;
///
/// assert_values_equal(&[Value::from(1)], &[Value::from(1)]);
/// ```
pub fn assert_values_equal(actual: &[Value], expected: &[Value]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {}\n  Actual: {}",
        expected.len(),
        actual.len(),
        render(expected),
        render(actual)
    );

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(
            a,
            e,
            "Mismatch at index {i}:\n  Expected: {e}\n  Actual: {a}\n  Full expected: {}\n  Full actual: {}",
            render(expected),
            render(actual)
        );
    }
}

/// Assert that two value lists hold the same items with the same
/// multiplicities, ignoring order.
///
/// # Panics
///
/// Panics if any item occurs a different number of times in the two lists.
///
/// # Example
///
/// ```
/// use seqchain::testing::assert_unordered_equal;
/// use seqchain::Value;
///
/// let actual = vec![Value::from(3), Value::from(1), Value::from(1)];
/// let expected = vec![Value::from(1), Value::from(3), Value::from(1)];
/// assert_unordered_equal(&actual, &expected);
/// ```
pub fn assert_unordered_equal(actual: &[Value], expected: &[Value]) {
    fn tally(items: &[Value]) -> HashMap<&Value, usize> {
        let mut counts = HashMap::new();
        for item in items {
            *counts.entry(item).or_default() += 1;
        }
        counts
    }
    let (have, want) = (tally(actual), tally(expected));
    if have != want {
        let missing: Vec<String> = want
            .iter()
            .filter(|(v, n)| have.get(*v).copied().unwrap_or(0) < **n)
            .map(|(v, _)| v.to_string())
            .collect();
        let extra: Vec<String> = have
            .iter()
            .filter(|(v, n)| want.get(*v).copied().unwrap_or(0) < **n)
            .map(|(v, _)| v.to_string())
            .collect();
        panic!(
            "Content mismatch:\n  Missing: {missing:?}\n  Extra: {extra:?}\n  Expected: {}\n  Actual: {}",
            render(expected),
            render(actual)
        );
    }
}

/// Assert that `group_by` output matches the expected groups.
///
/// Group order is ignored; the order of items within each group is not.
///
/// # Panics
///
/// Panics if an entry isn't a `[key, [items...]]` pair, a key appears twice,
/// or the groups differ.
///
/// # Example
///
/// ```
/// use seqchain::testing::assert_groups_equal;
/// use seqchain::{ops, Value};
///
/// let groups = ops::group_by(vec!["aa", "b", "cc"], |w: &Value| {
///     w.as_str().map_or(0, str::len)
/// }).unwrap();
/// assert_groups_equal(&groups, vec![
///     (Value::from(1), vec![Value::from("b")]),
///     (Value::from(2), vec![Value::from("aa"), Value::from("cc")]),
/// ]);
/// ```
pub fn assert_groups_equal(actual: &[Value], expected: Vec<(Value, Vec<Value>)>) {
    let mut have: BTreeMap<Value, Vec<Value>> = BTreeMap::new();
    for entry in actual {
        let (key, items) = match entry.as_list() {
            Some([key, Value::List(items)]) => (key.clone(), items.clone()),
            _ => panic!("Not a [key, [items...]] group: {entry}"),
        };
        assert!(
            have.insert(key.clone(), items).is_none(),
            "Key {key} appears in more than one group"
        );
    }
    let want: BTreeMap<Value, Vec<Value>> = expected.into_iter().collect();

    let have_keys: Vec<&Value> = have.keys().collect();
    let want_keys: Vec<&Value> = want.keys().collect();
    assert_eq!(
        have_keys, want_keys,
        "Group keys differ:\n  Expected: {want_keys:?}\n  Actual: {have_keys:?}"
    );
    for (key, items) in &want {
        let got = &have[key];
        assert_eq!(
            got,
            items,
            "Group {key} differs:\n  Expected: {}\n  Actual: {}",
            render(items),
            render(got)
        );
    }
}

/// Assert that a result failed with the given [`SeqError`] kind
/// (see [`SeqError::kind`]). Works for both crate results and chain results.
///
/// # Panics
///
/// Panics if the result is `Ok`, the error isn't a [`SeqError`], or the kind differs.
///
/// # Example
///
/// ```
/// use seqchain::testing::assert_error_kind;
/// use seqchain::{ops, Value};
///
/// assert_error_kind(ops::find(vec![1, 2], |_: &Value| false), "NotFound");
/// ```
pub fn assert_error_kind<T, E>(result: Result<T, E>, kind: &str)
where
    T: Debug,
    E: Into<anyhow::Error>,
{
    let err: anyhow::Error = match result {
        Ok(v) => panic!("Expected a {kind} error, got Ok({v:?})"),
        Err(e) => e.into(),
    };
    match err.downcast_ref::<SeqError>() {
        Some(e) => assert_eq!(e.kind(), kind, "Wrong error kind: {err:#}"),
        None => panic!("Expected a {kind} error, got a foreign error: {err:#}"),
    }
}

fn render(items: &[Value]) -> String {
    Value::List(items.to_vec()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "Mismatch at index 1")]
    fn ordered_mismatch_names_the_index() {
        assert_values_equal(
            &[Value::from(1), Value::from(2)],
            &[Value::from(1), Value::from(3)],
        );
    }

    #[test]
    #[should_panic(expected = "Content mismatch")]
    fn unordered_counts_multiplicity() {
        assert_unordered_equal(
            &[Value::from(1), Value::from(1), Value::from(2)],
            &[Value::from(1), Value::from(2), Value::from(2)],
        );
    }

    #[test]
    #[should_panic(expected = "Wrong error kind")]
    fn error_kind_mismatch_panics() {
        assert_error_kind::<(), _>(Err(SeqError::NotFound { op: "find" }), "TypeMismatch");
    }
}
