//! Lazy sequences and the materialized/pending payload union.
//!
//! - [`Seq`] is a single-pass, pull-based stream of `Result<Value>`. It is
//!   never restartable: once drained (or once it has yielded an error) it
//!   yields nothing more. Iterating the same `Seq` twice therefore gives every
//!   item the first time and an empty result the second time.
//! - [`Payload`] is what operations consume and what the chain facade owns:
//!   either a concrete [`Value`] or a pending [`Seq`].
//!
//! Every operation normalizes its payload exactly once into an entry stream
//! plus the [`Source`] handed to 3-parameter callbacks. Maps are viewed as
//! their `[key, value]` pairs and strings as their characters.

use crate::callback::Source;
use crate::error::{Result, SeqError};
use crate::value::Value;
use std::fmt;
use std::iter::FusedIterator;
use std::rc::Rc;

/// A pending, single-pass sequence of values.
pub struct Seq {
    inner: Box<dyn Iterator<Item = Result<Value>>>,
    halted: bool,
}

impl Seq {
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<Value>> + 'static,
    {
        Self {
            inner: Box::new(iter),
            halted: false,
        }
    }

    /// A sequence over already-known values (which may still be infinite,
    /// e.g. `(0..).map(Value::from)`).
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Self::new(values.into_iter().map(Ok))
    }

    /// A generator: `f` is called once per pull until it returns `None`.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut() -> Option<Value> + 'static,
    {
        Self::from_values(std::iter::from_fn(f))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::from_values(std::iter::empty())
    }

    /// A sequence whose contents are computed by `f` on the first pull.
    ///
    /// Used by operations that need the whole upstream before they can yield
    /// anything (e.g. `rev`) but must still not touch it until pulled.
    pub fn deferred<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<Vec<Value>> + 'static,
    {
        let mut init = Some(f);
        let mut buffer: Option<std::vec::IntoIter<Value>> = None;
        Self::new(std::iter::from_fn(move || {
            if let Some(f) = init.take() {
                match f() {
                    Ok(items) => buffer = Some(items.into_iter()),
                    Err(e) => return Some(Err(e)),
                }
            }
            buffer.as_mut()?.next().map(Ok)
        }))
    }

    /// Drain into a vector, stopping at the first error.
    ///
    /// # Errors
    /// The first error the sequence yields.
    pub fn materialize(self) -> Result<Vec<Value>> {
        self.collect()
    }
}

impl Iterator for Seq {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        let next = self.inner.next();
        if matches!(next, None | Some(Err(_))) {
            self.halted = true;
        }
        next
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.halted {
            (0, Some(0))
        } else {
            self.inner.size_hint()
        }
    }
}

impl FusedIterator for Seq {}

impl fmt::Debug for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.halted { "Seq(<drained>)" } else { "Seq(<pending>)" })
    }
}

/// Either a concrete value or a pending sequence.
pub enum Payload {
    Value(Value),
    Seq(Seq),
}

impl Payload {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Payload::Seq(_))
    }

    /// Collapse to a concrete value.
    ///
    /// Maps are returned as they are, a pending sequence is drained into a
    /// `List`, and every other value is returned unchanged.
    ///
    /// # Errors
    /// The first error a pending sequence yields while draining.
    pub fn materialize(self) -> Result<Value> {
        match self {
            Payload::Value(v) => Ok(v),
            Payload::Seq(s) => s.materialize().map(Value::List),
        }
    }

    /// View the payload as a lazy entry stream (maps as pairs, strings as chars).
    ///
    /// # Errors
    /// [`SeqError::TypeMismatch`] if the payload is a non-iterable value.
    pub fn into_seq(self, op: &'static str) -> Result<Seq> {
        entries(self, op).map(|e| e.items)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Value(v) => write!(f, "{v}"),
            Payload::Seq(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<Value> for Payload {
    fn from(v: Value) -> Self {
        Payload::Value(v)
    }
}

impl From<Seq> for Payload {
    fn from(s: Seq) -> Self {
        Payload::Seq(s)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(json: serde_json::Value) -> Self {
        Payload::Value(json.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Payload {
    fn from(items: Vec<T>) -> Self {
        Payload::Value(items.into())
    }
}

/// An operation's normalized input.
pub(crate) struct Entries {
    pub(crate) items: Seq,
    pub(crate) source: Source,
}

pub(crate) fn entries(payload: Payload, op: &'static str) -> Result<Entries> {
    match payload {
        Payload::Seq(items) => Ok(Entries {
            items,
            source: Source::Lazy,
        }),
        Payload::Value(value) => {
            let whole = Rc::new(value);
            let items = match whole.as_ref() {
                Value::List(_) => Seq::new(ListCursor {
                    list: Rc::clone(&whole),
                    next: 0,
                }),
                Value::Map(m) => Seq::from_values(
                    m.iter()
                        .map(|(k, v)| Value::pair(k.clone(), v.clone()))
                        .collect::<Vec<_>>(),
                ),
                Value::Str(s) => Seq::from_values(s.chars().map(Value::from).collect::<Vec<_>>()),
                other => return Err(SeqError::mismatch(op, "an iterable", other.kind())),
            };
            Ok(Entries {
                items,
                source: Source::Concrete(whole),
            })
        }
    }
}

// Walks a shared list without copying it.
struct ListCursor {
    list: Rc<Value>,
    next: usize,
}

impl Iterator for ListCursor {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.list.as_list()?.get(self.next)?.clone();
        self.next += 1;
        Some(Ok(item))
    }
}
