//! Arity-adaptive callbacks.
//!
//! Every operation that takes a callback invokes it through one normalized
//! shape, `(item, index, source) -> Value`, while callers are free to pass a
//! callback that only declares the leading parameters it cares about:
//!
//! | declared | receives |
//! |---|---|
//! | 0 | nothing |
//! | 1 | `item` |
//! | 2 | `item, index` |
//! | 3 | `item, index, source` |
//!
//! Closures pick their shape through their Rust signature (see
//! [`IntoCallback`]); a [`Function`] declares its parameter count at runtime,
//! which is where [`SeqError::UnsupportedArity`] comes from.
//!
//! Adaptation happens once per operation call via [`Callback::adapt`], never
//! per item. The resulting [`Adapted`] trampoline supplies exactly the declared
//! number of arguments, in order.
//!
//! ```
//! use seqchain::callback::{callback, Source};
//! use seqchain::Value;
//!
//! let adapted = callback(|item: &Value, index: usize| Value::from(index))
//!     .adapt()
//!     .unwrap();
//! let out = adapted.call(&Value::from("x"), 4, &Source::Lazy);
//! assert_eq!(out, Value::from(4));
//! ```

use crate::error::{Result, SeqError};
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// Largest parameter count a callback may declare.
pub const MAX_ARITY: usize = 3;

static NULL: Value = Value::Null;

/// What a 3-parameter callback sees as its third argument.
///
/// A concrete list, map or string is handed over as-is. A pending upstream
/// sequence can't be exposed without consuming it, so callbacks see
/// [`Source::Lazy`] instead.
#[derive(Clone, Debug)]
pub enum Source {
    Concrete(Rc<Value>),
    Lazy,
}

impl Source {
    /// The concrete source value, if there is one.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Source::Concrete(v) => Some(v),
            Source::Lazy => None,
        }
    }

    #[must_use]
    pub const fn is_lazy(&self) -> bool {
        matches!(self, Source::Lazy)
    }
}

/// A function value that declares its parameter count at runtime.
///
/// This is the shape callbacks take when they come from somewhere without a
/// static signature (an embedded interpreter, a config-driven rule table).
/// The body always receives exactly `arity` arguments.
#[derive(Clone)]
pub struct Function {
    arity: usize,
    body: Rc<dyn Fn(&[&Value]) -> Value>,
}

impl Function {
    pub fn new<F>(arity: usize, body: F) -> Self
    where
        F: Fn(&[&Value]) -> Value + 'static,
    {
        Self {
            arity,
            body: Rc::new(body),
        }
    }

    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    pub fn invoke(&self, args: &[&Value]) -> Value {
        (self.body)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function(arity={})", self.arity)
    }
}

/// A callback in one of the supported shapes.
#[derive(Clone)]
pub enum Callback {
    Nullary(Rc<dyn Fn() -> Value>),
    Unary(Rc<dyn Fn(&Value) -> Value>),
    Binary(Rc<dyn Fn(&Value, usize) -> Value>),
    Ternary(Rc<dyn Fn(&Value, usize, &Source) -> Value>),
    Declared(Function),
}

impl Callback {
    /// The default callback: returns its item unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Callback::Unary(Rc::new(identity))
    }

    /// Declared parameter count.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Callback::Nullary(_) => 0,
            Callback::Unary(_) => 1,
            Callback::Binary(_) => 2,
            Callback::Ternary(_) => 3,
            Callback::Declared(f) => f.arity,
        }
    }

    /// Inspect the declared arity and build the `(item, index, source)` trampoline.
    ///
    /// # Errors
    /// [`SeqError::UnsupportedArity`] for a [`Function`] declaring more than
    /// [`MAX_ARITY`] parameters.
    pub fn adapt(&self) -> Result<Adapted> {
        let call: Trampoline = match self.clone() {
            Callback::Nullary(f) => Rc::new(move |_: &Value, _: usize, _: &Source| f()),
            Callback::Unary(f) => Rc::new(move |item: &Value, _: usize, _: &Source| f(item)),
            Callback::Binary(f) => {
                Rc::new(move |item: &Value, index: usize, _: &Source| f(item, index))
            }
            Callback::Ternary(f) => Rc::new(move |item: &Value, index: usize, source: &Source| {
                f(item, index, source)
            }),
            Callback::Declared(func) => match func.arity {
                0 => Rc::new(move |_: &Value, _: usize, _: &Source| func.invoke(&[])),
                1 => Rc::new(move |item: &Value, _: usize, _: &Source| func.invoke(&[item])),
                2 => Rc::new(move |item: &Value, index: usize, _: &Source| {
                    func.invoke(&[item, &Value::from(index)])
                }),
                3 => Rc::new(move |item: &Value, index: usize, source: &Source| {
                    let whole = source.as_value().unwrap_or(&NULL);
                    func.invoke(&[item, &Value::from(index), whole])
                }),
                arity => return Err(SeqError::UnsupportedArity { arity }),
            },
        };
        Ok(Adapted {
            arity: self.arity(),
            call,
        })
    }
}

impl Default for Callback {
    fn default() -> Self {
        Callback::identity()
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Declared(func) => write!(f, "Callback::Declared({func:?})"),
            other => write!(f, "Callback(arity={})", other.arity()),
        }
    }
}

type Trampoline = Rc<dyn Fn(&Value, usize, &Source) -> Value>;

/// A callback normalized to the full `(item, index, source)` shape.
#[derive(Clone)]
pub struct Adapted {
    arity: usize,
    call: Trampoline,
}

impl Adapted {
    #[inline]
    pub fn call(&self, item: &Value, index: usize, source: &Source) -> Value {
        (self.call)(item, index, source)
    }

    /// The arity observed at adaptation time.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }
}

/// The identity callback, usable anywhere a callback is expected.
#[must_use]
pub fn identity(item: &Value) -> Value {
    item.clone()
}

/// Conversion into a [`Callback`], selected by the closure's signature.
///
/// The `Marker` parameter only exists to keep the per-shape impls apart;
/// callers never name it. Closures need their parameter types written out
/// (`|item: &Value| ...`) so the shape can be read off the signature.
pub trait IntoCallback<Marker> {
    fn into_callback(self) -> Callback;
}

impl IntoCallback<Callback> for Callback {
    fn into_callback(self) -> Callback {
        self
    }
}

impl IntoCallback<Function> for Function {
    fn into_callback(self) -> Callback {
        Callback::Declared(self)
    }
}

impl<F, R> IntoCallback<fn() -> R> for F
where
    F: Fn() -> R + 'static,
    R: Into<Value>,
{
    fn into_callback(self) -> Callback {
        Callback::Nullary(Rc::new(move || -> Value { self().into() }))
    }
}

impl<F, R> IntoCallback<fn(&Value) -> R> for F
where
    F: Fn(&Value) -> R + 'static,
    R: Into<Value>,
{
    fn into_callback(self) -> Callback {
        Callback::Unary(Rc::new(move |item: &Value| -> Value { self(item).into() }))
    }
}

impl<F, R> IntoCallback<fn(&Value, usize) -> R> for F
where
    F: Fn(&Value, usize) -> R + 'static,
    R: Into<Value>,
{
    fn into_callback(self) -> Callback {
        Callback::Binary(Rc::new(move |item: &Value, index: usize| -> Value {
            self(item, index).into()
        }))
    }
}

impl<F, R> IntoCallback<fn(&Value, usize, &Source) -> R> for F
where
    F: Fn(&Value, usize, &Source) -> R + 'static,
    R: Into<Value>,
{
    fn into_callback(self) -> Callback {
        Callback::Ternary(Rc::new(
            move |item: &Value, index: usize, source: &Source| -> Value {
                self(item, index, source).into()
            },
        ))
    }
}

/// Turn any supported closure (or a [`Function`]) into a [`Callback`].
pub fn callback<M>(f: impl IntoCallback<M>) -> Callback {
    f.into_callback()
}
