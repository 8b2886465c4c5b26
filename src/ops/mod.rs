//! The sequence operations.
//!
//! Every operation is a free function taking its source as the first
//! argument. A source is anything convertible into a [`Payload`](crate::Payload):
//! a concrete [`Value`](crate::Value) (list, map or string), a pending
//! [`Seq`](crate::Seq), a `Vec` of convertible items, or a `serde_json::Value`.
//!
//! Operations come in two flavors:
//!
//! - **lazy** (`map`, `filter`, `reject`, `collect`, `append`, `first`/`take`,
//!   `rest`/`skip`, `distinct_by`/`distinct`, `rev`) return a [`Seq`](crate::Seq)
//!   and don't pull a single item until the caller does;
//! - **eager** (`length`, `each`, `reduce`, `reduce_right`, `find`, `head`,
//!   `all`, `any`, `max`, `min`, `sum_by`, `sort_by`, `sort_by_descending`,
//!   `group_by`, `count_by`, `shuffle`, `to_list`, `to_dict`) drain or
//!   short-circuit their input before returning.
//!
//! Callbacks are adapted once per call (see [`callback`](crate::callback)), so
//! an unsupported callback fails before any item is looked at.
//!
//! ```
//! use seqchain::ops;
//! use seqchain::Value;
//!
//! let evens = ops::filter(vec![1, 2, 3, 4], |n: &Value| n.as_i64().unwrap_or(0) % 2 == 0)?;
//! let doubled = ops::map(evens, |n: &Value| n.as_i64().unwrap_or(0) * 2)?;
//! assert_eq!(doubled.materialize()?, vec![Value::from(4), Value::from(8)]);
//! # Ok::<(), seqchain::SeqError>(())
//! ```

mod convert;
mod extremes;
mod group;
mod reduce;
mod slice;
mod sort;
mod transform;

pub use convert::{to_dict, to_list};
pub use extremes::{max, min};
pub use group::{count_by, distinct, distinct_by, group_by};
pub use reduce::{all, any, each, find, for_each, length, reduce, reduce_right, size, sum, sum_by};
pub use slice::{first, head, rest, rev, skip, take};
pub use sort::{shuffle, shuffle_seeded, sort_by, sort_by_descending};
pub use transform::{append, collect, filter, map, reject};
