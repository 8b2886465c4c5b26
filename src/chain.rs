//! Fluent facade: pipe one payload through successive named operations.
//!
//! A [`Chain`] owns exactly one [`Payload`]. Each [`Chain::call`] looks the
//! name up in its [`Registry`], runs `payload := op(payload, args)`, and hands
//! the chain back. Nothing is materialized until [`Chain::value`].
//!
//! ```
//! use seqchain::{Chain, Value};
//!
//! let even = |n: &Value| n.as_i64().is_some_and(|n| n % 2 == 0);
//! let double = |n: &Value| n.as_i64().unwrap_or(0) * 2;
//!
//! let mut chain = Chain::new(vec![1, 2, 3, 4]).filter(even)?.map(double)?;
//! assert_eq!(chain.value()?, Value::from(vec![4, 8]));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! State machine:
//!
//! - **Pending** holds the current payload, eager or lazy. Every successful
//!   call stays in Pending.
//! - **Finalized** holds the materialized value. [`Chain::value`] can be
//!   called again and returns the same value; [`Chain::call`] fails with
//!   [`SeqError::Finalized`].
//! - **Failed** holds the error a drain produced. Every later
//!   [`Chain::value`] or [`Chain::call`] reports it again.

use crate::callback::IntoCallback;
use crate::error::SeqError;
use crate::registry::{Arg, Registry};
use crate::seq::{Payload, Seq};
use crate::value::Value;
use anyhow::{Context, Result};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

enum State {
    Pending(Payload),
    Finalized(Value),
    Failed(SeqError),
}

/// A payload threaded through named operations.
pub struct Chain {
    state: State,
    registry: Rc<Registry>,
}

/// Shorthand for [`Chain::new`].
pub fn wrap(source: impl Into<Payload>) -> Chain {
    Chain::new(source)
}

impl Chain {
    /// Start a chain over the standard operations.
    pub fn new(source: impl Into<Payload>) -> Self {
        Self::with_registry(source, Registry::shared())
    }

    /// Start a chain over a custom operation table.
    pub fn with_registry(source: impl Into<Payload>, registry: Rc<Registry>) -> Self {
        Self {
            state: State::Pending(source.into()),
            registry,
        }
    }

    /// Apply the operation registered under `name`.
    ///
    /// # Errors
    /// [`SeqError::UnknownOperation`] (raised before the payload is touched),
    /// [`SeqError::Finalized`] after [`Chain::value`], or whatever the
    /// operation returns. The original [`SeqError`] is reachable with
    /// `err.downcast_ref::<SeqError>()`.
    pub fn call<I>(self, name: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arg>,
    {
        let Chain { state, registry } = self;
        let payload = match state {
            State::Pending(payload) => payload,
            State::Finalized(_) => {
                return Err(SeqError::Finalized { name: name.to_owned() })
                    .with_context(|| format!("chained call `{name}`"));
            }
            State::Failed(err) => {
                return Err(err).with_context(|| format!("chained call `{name}`"));
            }
        };
        trace!(op = name, pending = payload.is_pending(), "dispatching chained call");
        let next = registry
            .invoke(name, payload, args)
            .with_context(|| format!("chained call `{name}`"))?;
        Ok(Chain {
            state: State::Pending(next),
            registry,
        })
    }

    /// Materialize and return the payload.
    ///
    /// A map comes back as-is, a pending sequence is drained into a list, and
    /// anything else is returned unchanged. The chain is Finalized afterwards.
    /// A failed drain leaves it Failed, and the same error comes back on every
    /// later call.
    ///
    /// # Errors
    /// The first error the pending sequence yields.
    pub fn value(&mut self) -> Result<Value> {
        let placeholder = State::Finalized(Value::Null);
        let outcome = match std::mem::replace(&mut self.state, placeholder) {
            State::Finalized(value) => Ok(value),
            State::Failed(err) => Err(err),
            State::Pending(payload) => {
                let was_pending = payload.is_pending();
                let outcome = payload.materialize();
                match &outcome {
                    Ok(value) => debug!(was_pending, kind = value.kind(), "chain finalized"),
                    Err(err) => debug!(was_pending, error = %err, "chain drain failed"),
                }
                outcome
            }
        };
        match outcome {
            Ok(value) => {
                self.state = State::Finalized(value.clone());
                Ok(value)
            }
            Err(err) => {
                self.state = State::Failed(err.clone());
                Err(err).context("materializing chain value")
            }
        }
    }

    /// Give up the payload without materializing it, so a caller can keep
    /// streaming a lazy result. A Failed chain yields its error as the only
    /// item.
    #[must_use]
    pub fn into_payload(self) -> Payload {
        match self.state {
            State::Pending(payload) => payload,
            State::Finalized(value) => Payload::Value(value),
            State::Failed(err) => Payload::Seq(Seq::new(std::iter::once(Err(err)))),
        }
    }

    /// True once [`Chain::value`] has run, whether or not it succeeded.
    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        matches!(self.state, State::Finalized(_) | State::Failed(_))
    }

    /// # Errors
    /// See [`Chain::call`].
    pub fn map<M>(self, f: impl IntoCallback<M>) -> Result<Self> {
        self.call("map", [Arg::callback(f)])
    }

    /// # Errors
    /// See [`Chain::call`].
    pub fn filter<M>(self, f: impl IntoCallback<M>) -> Result<Self> {
        self.call("filter", [Arg::callback(f)])
    }

    /// # Errors
    /// See [`Chain::call`].
    pub fn reject<M>(self, f: impl IntoCallback<M>) -> Result<Self> {
        self.call("reject", [Arg::callback(f)])
    }

    /// Flat-map.
    ///
    /// # Errors
    /// See [`Chain::call`].
    pub fn collect<M>(self, f: impl IntoCallback<M>) -> Result<Self> {
        self.call("collect", [Arg::callback(f)])
    }

    /// # Errors
    /// See [`Chain::call`].
    pub fn append(self, other: impl Into<Payload>) -> Result<Self> {
        self.call("append", [Arg::source(other)])
    }

    /// # Errors
    /// See [`Chain::call`].
    pub fn first(self, n: usize) -> Result<Self> {
        self.call("first", [Arg::from(n)])
    }

    /// # Errors
    /// See [`Chain::call`].
    pub fn rest(self, n: usize) -> Result<Self> {
        self.call("rest", [Arg::from(n)])
    }

    /// # Errors
    /// See [`Chain::call`].
    pub fn distinct_by<M>(self, f: impl IntoCallback<M>) -> Result<Self> {
        self.call("distinct_by", [Arg::callback(f)])
    }

    /// # Errors
    /// See [`Chain::call`].
    pub fn sort_by<M>(self, f: impl IntoCallback<M>) -> Result<Self> {
        self.call("sort_by", [Arg::callback(f)])
    }

    /// # Errors
    /// See [`Chain::call`].
    pub fn sort_by_descending<M>(self, f: impl IntoCallback<M>) -> Result<Self> {
        self.call("sort_by_descending", [Arg::callback(f)])
    }

    /// # Errors
    /// See [`Chain::call`].
    pub fn group_by<M>(self, f: impl IntoCallback<M>) -> Result<Self> {
        self.call("group_by", [Arg::callback(f)])
    }

    /// # Errors
    /// See [`Chain::call`].
    pub fn reduce<F>(self, fold: F, seed: impl Into<Value>) -> Result<Self>
    where
        F: Fn(Value, Value) -> Value + 'static,
    {
        self.call("reduce", [Arg::fold(fold), Arg::value(seed)])
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Pending(payload) => write!(f, "Chain({payload:?})"),
            State::Finalized(value) => write!(f, "Chain({value})"),
            State::Failed(err) => write!(f, "Chain(<failed: {err}>)"),
        }
    }
}
