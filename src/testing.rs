//! Testing utilities for code built on seqchain.
//!
//! This module provides helpers for writing idiomatic Rust tests against
//! sequence operations and chains. It includes:
//!
//! - **Assertions**: compare operation outputs with expected values, with
//!   readable failure messages
//! - **Fixtures**: small ready-made datasets
//! - **Probes**: sources that count how often they were pulled, and a
//!   pass-through that prints items as they flow by
//!
//! # Quick Start
//!
//! ```
//! use seqchain::*;
//! use seqchain::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let (source, pulls) = counting_source(1_000);
//! let head = ops::first(source, 3)?.materialize()?;
//!
//! assert_values_equal(&head, &[Value::from(0), Value::from(1), Value::from(2)]);
//! assert_eq!(pulls.get(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! # Assertion Functions
//!
//! - [`assert_values_equal`]: exact, order-dependent comparison
//! - [`assert_unordered_equal`]: same items with the same multiplicities, any order
//! - [`assert_groups_equal`]: `group_by` output against expected groups, any group order
//! - [`assert_error_kind`]: a result failed with a given [`SeqError`](crate::SeqError) kind
//!
//! # Fixtures
//!
//! - [`sample_orders`]: order records (customer, product, quantity, price)
//! - [`sample_words`]: short word list with repeats
//! - [`counting_source`]: an infinite-capable source with a pull counter

pub mod assertions;
pub mod debug;
pub mod fixtures;

pub use assertions::*;
pub use debug::*;
pub use fixtures::*;
