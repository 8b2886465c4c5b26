//! Pre-built datasets and probe sources for common testing scenarios.

use crate::seq::Seq;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// An order record, as found in a typical e-commerce export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleOrder {
    pub id: u32,
    pub customer: String,
    pub product: String,
    pub quantity: u32,
    pub price: f64,
}

impl SampleOrder {
    fn new(id: u32, customer: &str, product: &str, quantity: u32, price: f64) -> Self {
        Self {
            id,
            customer: customer.to_string(),
            product: product.to_string(),
            quantity,
            price,
        }
    }
}

impl From<&SampleOrder> for Value {
    fn from(order: &SampleOrder) -> Self {
        serde_json::to_value(order).map_or(Value::Null, Value::from)
    }
}

/// Sample orders as a list of map values with the keys `id`, `customer`,
/// `product`, `quantity` and `price`.
///
/// Customers repeat (`alice` three times, `bob` twice, `carol` once) and two
/// orders share the top quantity, which makes the set handy for grouping and
/// tie-breaking tests.
///
/// # Example
///
/// ```
/// use seqchain::testing::sample_orders;
///
/// let orders = sample_orders();
/// assert_eq!(orders.len(), 6);
/// assert_eq!(orders[0].get("customer").as_str(), Some("alice"));
/// ```
#[must_use]
pub fn sample_orders() -> Vec<Value> {
    sample_order_records().iter().map(Value::from).collect()
}

/// The typed records behind [`sample_orders`].
#[must_use]
pub fn sample_order_records() -> Vec<SampleOrder> {
    vec![
        SampleOrder::new(1, "alice", "keyboard", 1, 49.5),
        SampleOrder::new(2, "bob", "mouse", 3, 19.0),
        SampleOrder::new(3, "alice", "monitor", 1, 199.0),
        SampleOrder::new(4, "carol", "cable", 5, 4.25),
        SampleOrder::new(5, "bob", "keyboard", 2, 49.5),
        SampleOrder::new(6, "alice", "cable", 5, 4.25),
    ]
}

/// A short word list with repeats.
///
/// # Example
///
/// ```
/// use seqchain::testing::sample_words;
///
/// assert_eq!(sample_words().len(), 8);
/// ```
#[must_use]
pub fn sample_words() -> Vec<Value> {
    ["the", "quick", "brown", "fox", "jumps", "over", "the", "dog"]
        .into_iter()
        .map(Value::from)
        .collect()
}

/// A lazy source yielding `0, 1, 2, ...` up to `limit` (exclusive), plus a
/// shared counter of how many items have been pulled from it so far.
///
/// Pass `u64::MAX` for an effectively infinite source.
#[must_use]
pub fn counting_source(limit: u64) -> (Seq, Rc<Cell<usize>>) {
    let pulls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulls);
    let mut next = 0_u64;
    let source = Seq::from_fn(move || {
        if next >= limit {
            return None;
        }
        counter.set(counter.get() + 1);
        next += 1;
        Some(Value::from(next - 1))
    });
    (source, pulls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_convert_to_maps() {
        let orders = sample_orders();
        assert_eq!(orders[3].get("price"), Value::from(4.25));
        assert_eq!(orders[3].get("quantity"), Value::from(5));
    }

    #[test]
    fn counting_source_counts_pulls() {
        let (mut source, pulls) = counting_source(2);
        assert_eq!(pulls.get(), 0);
        assert!(source.next().is_some());
        assert!(source.next().is_some());
        assert!(source.next().is_none());
        assert_eq!(pulls.get(), 2);
    }
}
