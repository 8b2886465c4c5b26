//! Name → operation table consulted by [`Chain`](crate::Chain).
//!
//! Every entry takes the current [`Payload`] plus a positional [`Args`] list
//! and returns the next payload. Lazy operations hand back a pending
//! [`Seq`]; eager ones a concrete [`Value`]. Aliases are plain extra entries
//! pointing at the same implementation.
//!
//! ```
//! use seqchain::{Registry, Value};
//!
//! let mut registry = Registry::standard();
//! registry.register("double_all", |payload, _args| {
//!     let doubled = seqchain::ops::map(payload, |v: &Value| v.as_i64().unwrap_or(0) * 2)?;
//!     Ok(doubled.into())
//! });
//! registry.alias("twice", "double_all")?;
//! assert!(registry.contains("twice"));
//! # Ok::<(), seqchain::SeqError>(())
//! ```

use crate::callback::{Callback, IntoCallback};
use crate::error::{Result, SeqError};
use crate::ops;
use crate::seq::{Payload, Seq};
use crate::value::Value;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// A registered operation.
pub type Operation = Rc<dyn Fn(Payload, &mut Args) -> Result<Payload>>;

/// A `(memo, item) -> memo` fold, as taken by `reduce` and `reduce_right`.
pub type Fold = Rc<dyn Fn(Value, Value) -> Value>;

/// One positional argument to a chained call.
pub enum Arg {
    Value(Value),
    Callback(Callback),
    Fold(Fold),
    Seq(Payload),
}

impl Arg {
    pub fn value(v: impl Into<Value>) -> Self {
        Arg::Value(v.into())
    }

    pub fn callback<M>(f: impl IntoCallback<M>) -> Self {
        Arg::Callback(f.into_callback())
    }

    pub fn fold<F>(f: F) -> Self
    where
        F: Fn(Value, Value) -> Value + 'static,
    {
        Arg::Fold(Rc::new(f))
    }

    /// A second source, e.g. for `append`.
    pub fn source(p: impl Into<Payload>) -> Self {
        Arg::Seq(p.into())
    }

    const fn describe(&self) -> &'static str {
        match self {
            Arg::Value(_) => "a value",
            Arg::Callback(_) => "a callback",
            Arg::Fold(_) => "a fold",
            Arg::Seq(_) => "a source",
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => write!(f, "Arg::Value({v})"),
            Arg::Callback(c) => write!(f, "Arg::{c:?}"),
            Arg::Fold(_) => f.write_str("Arg::Fold"),
            Arg::Seq(p) => write!(f, "Arg::Seq({p:?})"),
        }
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

impl From<usize> for Arg {
    fn from(n: usize) -> Self {
        Arg::Value(n.into())
    }
}

impl From<Callback> for Arg {
    fn from(c: Callback) -> Self {
        Arg::Callback(c)
    }
}

impl From<Seq> for Arg {
    fn from(s: Seq) -> Self {
        Arg::Seq(s.into())
    }
}

/// The arguments of one call, consumed front to back by the operation.
#[derive(Debug)]
pub struct Args {
    op: String,
    items: VecDeque<Arg>,
}

impl Args {
    pub fn new(op: impl Into<String>, items: impl IntoIterator<Item = Arg>) -> Self {
        Self {
            op: op.into(),
            items: items.into_iter().collect(),
        }
    }

    /// Name of the operation these arguments were passed to.
    #[must_use]
    pub fn op(&self) -> &str {
        &self.op
    }

    /// The next callback, or identity if there are no more arguments.
    ///
    /// # Errors
    /// [`SeqError::InvalidArgument`] if the next argument isn't a callback.
    pub fn callback_or_identity(&mut self) -> Result<Callback> {
        match self.items.pop_front() {
            None => Ok(Callback::identity()),
            Some(Arg::Callback(c)) => Ok(c),
            Some(other) => Err(self.unexpected("a callback", &other)),
        }
    }

    /// The next argument as a count, or `default` if there are no more.
    ///
    /// # Errors
    /// [`SeqError::InvalidArgument`] unless the next argument is a
    /// non-negative integer.
    pub fn count_or(&mut self, default: usize) -> Result<usize> {
        match self.items.pop_front() {
            None => Ok(default),
            Some(Arg::Value(Value::Int(n))) => usize::try_from(n).map_err(|_| {
                SeqError::invalid(&self.op, format!("count must be non-negative, got {n}"))
            }),
            Some(other) => Err(self.unexpected("a count", &other)),
        }
    }

    /// The next argument as a seed, or `None` if there are no more.
    ///
    /// # Errors
    /// [`SeqError::InvalidArgument`] unless the next argument is an integer.
    pub fn seed(&mut self) -> Result<Option<u64>> {
        match self.items.pop_front() {
            None => Ok(None),
            #[allow(clippy::cast_sign_loss)]
            Some(Arg::Value(Value::Int(n))) => Ok(Some(n as u64)),
            Some(other) => Err(self.unexpected("an integer seed", &other)),
        }
    }

    /// # Errors
    /// [`SeqError::InvalidArgument`] if the next argument is missing or isn't a fold.
    pub fn fold(&mut self) -> Result<Fold> {
        match self.items.pop_front() {
            Some(Arg::Fold(f)) => Ok(f),
            Some(other) => Err(self.unexpected("a fold", &other)),
            None => Err(self.missing("a fold")),
        }
    }

    /// # Errors
    /// [`SeqError::InvalidArgument`] if the next argument is missing or isn't a value.
    pub fn value(&mut self) -> Result<Value> {
        match self.items.pop_front() {
            Some(Arg::Value(v)) => Ok(v),
            Some(other) => Err(self.unexpected("a value", &other)),
            None => Err(self.missing("a value")),
        }
    }

    /// The next argument as a source. A plain value counts as one.
    ///
    /// # Errors
    /// [`SeqError::InvalidArgument`] if the next argument is missing, a
    /// callback or a fold.
    pub fn payload(&mut self) -> Result<Payload> {
        match self.items.pop_front() {
            Some(Arg::Seq(p)) => Ok(p),
            Some(Arg::Value(v)) => Ok(v.into()),
            Some(other) => Err(self.unexpected("a source", &other)),
            None => Err(self.missing("a source")),
        }
    }

    /// Reject any arguments the operation didn't consume.
    ///
    /// # Errors
    /// [`SeqError::InvalidArgument`] naming how many were left over.
    pub fn finish(self) -> Result<()> {
        match self.items.len() {
            0 => Ok(()),
            n => Err(SeqError::invalid(self.op, format!("{n} unexpected extra argument(s)"))),
        }
    }

    fn unexpected(&self, wanted: &str, got: &Arg) -> SeqError {
        SeqError::invalid(&self.op, format!("expected {wanted}, got {}", got.describe()))
    }

    fn missing(&self, wanted: &str) -> SeqError {
        SeqError::invalid(&self.op, format!("missing {wanted}"))
    }
}

/// Operation table.
#[derive(Clone, Default)]
pub struct Registry {
    ops: BTreeMap<String, Operation>,
}

thread_local! {
    static STANDARD: Rc<Registry> = Rc::new(Registry::standard());
}

impl Registry {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard table, built once per thread and shared.
    #[must_use]
    pub fn shared() -> Rc<Self> {
        STANDARD.with(Rc::clone)
    }

    /// Every built-in operation and alias.
    #[must_use]
    pub fn standard() -> Self {
        let mut r = Self::new();
        r.register("map", |p, a| lazy(ops::map(p, a.callback_or_identity()?)))
            .register("filter", |p, a| lazy(ops::filter(p, a.callback_or_identity()?)))
            .register("reject", |p, a| lazy(ops::reject(p, a.callback_or_identity()?)))
            .register("collect", |p, a| lazy(ops::collect(p, a.callback_or_identity()?)))
            .register("append", |p, a| lazy(ops::append(p, a.payload()?)))
            .register("first", |p, a| lazy(ops::first(p, a.count_or(1)?)))
            .register("rest", |p, a| lazy(ops::rest(p, a.count_or(1)?)))
            .register("distinct_by", |p, a| {
                lazy(ops::distinct_by(p, a.callback_or_identity()?))
            })
            .register("rev", |p, _| lazy(ops::rev(p)))
            .register("length", |p, _| eager(ops::length(p)))
            .register("each", |p, a| eager(ops::each(p, a.callback_or_identity()?)))
            .register("reduce", |p, a| {
                let fold = a.fold()?;
                eager(ops::reduce(p, |m, i| fold(m, i), a.value()?))
            })
            .register("reduce_right", |p, a| {
                let fold = a.fold()?;
                eager(ops::reduce_right(p, |m, i| fold(m, i), a.value()?))
            })
            .register("find", |p, a| eager(ops::find(p, a.callback_or_identity()?)))
            .register("head", |p, _| eager(ops::head(p)))
            .register("all", |p, a| eager(ops::all(p, a.callback_or_identity()?)))
            .register("any", |p, a| eager(ops::any(p, a.callback_or_identity()?)))
            .register("max", |p, a| eager(ops::max(p, a.callback_or_identity()?)))
            .register("min", |p, a| eager(ops::min(p, a.callback_or_identity()?)))
            .register("sum_by", |p, a| eager(ops::sum_by(p, a.callback_or_identity()?)))
            .register("sort_by", |p, a| eager(ops::sort_by(p, a.callback_or_identity()?)))
            .register("sort_by_descending", |p, a| {
                eager(ops::sort_by_descending(p, a.callback_or_identity()?))
            })
            .register("group_by", |p, a| eager(ops::group_by(p, a.callback_or_identity()?)))
            .register("count_by", |p, a| eager(ops::count_by(p, a.callback_or_identity()?)))
            .register("shuffle", |p, a| match a.seed()? {
                Some(seed) => eager(ops::shuffle_seeded(p, seed)),
                None => eager(ops::shuffle(p)),
            })
            .register("to_list", |p, _| eager(ops::to_list(p)))
            .register("to_dict", |p, _| eager(ops::to_dict(p)));

        for (alias, target) in ALIASES {
            if let Some(op) = r.ops.get(target).cloned() {
                r.ops.insert(alias.to_owned(), op);
            }
        }
        r
    }

    /// Add or replace an operation.
    pub fn register<F>(&mut self, name: impl Into<String>, op: F) -> &mut Self
    where
        F: Fn(Payload, &mut Args) -> Result<Payload> + 'static,
    {
        let name = name.into();
        debug!(op = %name, "registering operation");
        self.ops.insert(name, Rc::new(op));
        self
    }

    /// Make `alias` another name for the operation currently under `target`.
    ///
    /// # Errors
    /// [`SeqError::UnknownOperation`] if `target` isn't registered.
    pub fn alias(&mut self, alias: impl Into<String>, target: &str) -> Result<&mut Self> {
        let op = self.get(target)?;
        let alias = alias.into();
        debug!(alias = %alias, to = target, "aliasing operation");
        self.ops.insert(alias, op);
        Ok(self)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }

    /// # Errors
    /// [`SeqError::UnknownOperation`] if `name` isn't registered.
    pub fn get(&self, name: &str) -> Result<Operation> {
        self.ops
            .get(name)
            .cloned()
            .ok_or_else(|| SeqError::UnknownOperation { name: name.to_owned() })
    }

    /// Look up `name` and run it. The payload isn't touched when the lookup fails.
    ///
    /// # Errors
    /// [`SeqError::UnknownOperation`], leftover arguments, or whatever the
    /// operation itself returns.
    pub fn invoke(
        &self,
        name: &str,
        payload: Payload,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Payload> {
        let op = self.get(name)?;
        let mut args = Args::new(name, args);
        let next = op(payload, &mut args)?;
        args.finish()?;
        Ok(next)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

const ALIASES: [(&str, &str); 6] = [
    ("size", "length"),
    ("for_each", "each"),
    ("take", "first"),
    ("skip", "rest"),
    ("distinct", "distinct_by"),
    ("sum", "sum_by"),
];

fn lazy(result: Result<Seq>) -> Result<Payload> {
    result.map(Payload::Seq)
}

fn eager(result: Result<impl Into<Value>>) -> Result<Payload> {
    result.map(|v| Payload::Value(v.into()))
}
