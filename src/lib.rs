//! # seqchain
//!
//! A **sequence-transformation library**: composable operations (map, filter,
//! reduce, group, sort, distinct, ...) over lists, maps and lazy streams,
//! plus a chaining facade that pipes one payload through successive named
//! operations.
//!
//! ## Key Features
//!
//! - **Lazy by default** - element-wise operations return a pull-based [`Seq`]
//!   that touches nothing upstream until iterated, so infinite sources work
//! - **Short-circuiting** - `find`, `any`, `all` and `first` stop pulling as
//!   soon as the answer is known
//! - **Arity-adaptive callbacks** - pass `|| ..`, `|item| ..`,
//!   `|item, index| ..` or `|item, index, source| ..`; the shape is read once
//!   per call
//! - **Uniform inputs** - maps are viewed as `[key, value]` pairs and strings
//!   as characters
//! - **Name-dispatched chaining** - [`Chain`] resolves operations through a
//!   [`Registry`] that callers can extend or alias
//!
//! ## Quick Start
//!
//! ```
//! use seqchain::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let is_even = |n: &Value| n.as_i64().is_some_and(|n| n % 2 == 0);
//! let double = |n: &Value| n.as_i64().unwrap_or(0) * 2;
//!
//! // free functions
//! let evens = ops::filter(vec![1, 2, 3, 4], is_even)?;
//! assert_eq!(ops::map(evens, double)?.materialize()?, vec![Value::from(4), Value::from(8)]);
//!
//! // or the same thing, chained
//! let mut chain = wrap(vec![1, 2, 3, 4]).filter(is_even)?.map(double)?;
//! assert_eq!(chain.value()?, Value::from(vec![4, 8]));
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Value
//!
//! Items are dynamic [`Value`]s: null, bool, int, float, string, list or map.
//! Any value can key a group or a distinct set. Ranking (`max`, `min`, the
//! sorts) goes through [`Value::compare`], which refuses mixed kinds with
//! [`SeqError::TypeMismatch`].
//!
//! ### Seq and Payload
//!
//! A [`Seq`] is single-pass: iterating it a second time yields nothing. A
//! [`Payload`] is either a concrete [`Value`] or a pending [`Seq`], and is what
//! every operation takes as its source.
//!
//! ### Callbacks
//!
//! See [`callback`]. Closures declare their shape through their parameter
//! types; a runtime [`Function`] declares a parameter count and is rejected
//! with [`SeqError::UnsupportedArity`] above three.
//!
//! ### Chain
//!
//! A [`Chain`] stays pending through any number of calls and materializes on
//! [`Chain::value`]. Use [`Chain::into_payload`] to keep streaming instead.
//!
//! ## Errors
//!
//! Operations return [`Result`] with a [`SeqError`]; the chain surfaces
//! `anyhow::Error` with the failing call as context, and the typed error
//! stays reachable through `downcast_ref::<SeqError>()`.
//!
//! ## Logging
//!
//! Dispatch and finalization are reported through `tracing` at `trace` and
//! `debug` level. The library never installs a subscriber.
//!
//! ## Module Overview
//!
//! - [`value`] - the dynamic item model
//! - [`callback`] - arity adaptation
//! - [`seq`] - lazy sequences and payloads
//! - [`ops`] - the operations themselves
//! - [`registry`] - name-to-operation table used by chains
//! - [`chain`] - the fluent facade
//! - [`testing`] - assertions and fixtures for tests

pub mod callback;
pub mod chain;
pub mod error;
pub mod ops;
pub mod registry;
pub mod seq;
pub mod testing;
pub mod utils;
pub mod value;

pub use callback::{callback, identity, Callback, Function, IntoCallback, Source};
pub use chain::{wrap, Chain};
pub use error::{Result, SeqError};
pub use registry::{Arg, Args, Registry};
pub use seq::{Payload, Seq};
pub use value::Value;
