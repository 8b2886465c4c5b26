//! The dynamic item model every sequence operation works over.
//!
//! A [`Value`] is deliberately small: scalars, strings, lists and key-unique
//! maps. It is `Eq + Ord + Hash` (floats go through [`OrderedFloat`]) so that
//! any value can serve as a grouping key, a distinct key or a map key.
//!
//! Two notions of order coexist:
//! - the derived [`Ord`] is structural and total; it exists so values can key
//!   a [`BTreeMap`] and is never used to rank items.
//! - [`Value::compare`] is the *semantic* ordering used by `max`, `min` and the
//!   sorts. It compares numbers across `Int`/`Float`, strings and lists, and
//!   refuses everything else with [`SeqError::TypeMismatch`].

use crate::error::{Result, SeqError};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed item.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<Value, Value>),
}

impl Value {
    /// A two-item list, the shape mappings are normalized into.
    pub fn pair(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Value::List(vec![key.into(), value.into()])
    }

    /// Human-readable name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Truthiness: null, `false`, zero, and empty strings/lists/maps are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => f.0 != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(v) => !v.is_empty(),
            Value::Map(m) => !m.is_empty(),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether operations can iterate this value (list, map or string).
    #[must_use]
    pub const fn is_iterable(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_) | Value::Str(_))
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view; `Int` widens to `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(f.0),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<Value, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a string key in a map. Anything else (or a missing key) is `Null`.
    #[must_use]
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Map(m) => m.get(&Value::from(key)).cloned().unwrap_or_default(),
            _ => Value::Null,
        }
    }

    /// Positional lookup in a list. Out of range (or not a list) is `Null`.
    #[must_use]
    pub fn at(&self, index: usize) -> Value {
        match self {
            Value::List(v) => v.get(index).cloned().unwrap_or_default(),
            _ => Value::Null,
        }
    }

    /// Semantic ordering used to rank items.
    ///
    /// Two `Int`s compare exactly. An `Int` against a `Float` compares as
    /// `f64`, so an `i64` beyond 2^53 can come out `Equal` to a nearby float
    /// it does not equal.
    ///
    /// # Errors
    /// [`SeqError::TypeMismatch`] when the two values are not mutually
    /// comparable (e.g. a string against a number, or anything against null).
    pub fn compare(&self, other: &Value, op: &'static str) -> Result<Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
            (Value::List(a), Value::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    let ord = x.compare(y, op)?;
                    if ord != Ordering::Equal {
                        return Ok(ord);
                    }
                }
                Ok(a.len().cmp(&b.len()))
            }
            _ => match (numeric(self), numeric(other)) {
                (Some(Number::Int(a)), Some(Number::Int(b))) => Ok(a.cmp(&b)),
                (Some(a), Some(b)) => Ok(a.to_f64().total_cmp(&b.to_f64())),
                (None, _) => Err(SeqError::mismatch(op, "comparable values", self.kind())),
                (_, None) => Err(SeqError::mismatch(op, "comparable values", other.kind())),
            },
        }
    }

    /// Numeric addition used by `sum_by`. `Int + Int` wraps like native i64
    /// arithmetic; a `Float` on either side promotes the result.
    ///
    /// # Errors
    /// [`SeqError::TypeMismatch`] if either side is not a number or bool.
    pub fn checked_add(&self, other: &Value, op: &'static str) -> Result<Value> {
        let a = numeric(self).ok_or_else(|| SeqError::mismatch(op, "a number", self.kind()))?;
        let b = numeric(other).ok_or_else(|| SeqError::mismatch(op, "a number", other.kind()))?;
        Ok(match (a, b) {
            (Number::Int(x), Number::Int(y)) => Value::Int(x.wrapping_add(y)),
            (x, y) => Value::from(x.to_f64() + y.to_f64()),
        })
    }
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[allow(clippy::cast_precision_loss)]
    fn to_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }
}

// Bools take part in arithmetic and ordering as 0/1.
const fn numeric(v: &Value) -> Option<Number> {
    match v {
        Value::Bool(b) => Some(Number::Int(*b as i64)),
        Value::Int(n) => Some(Number::Int(*n)),
        Value::Float(f) => Some(Number::Float(f.0)),
        _ => None,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{:?}", x.0),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/* ===================== conversions ===================== */

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_small_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(i64::from(n))
            }
        })*
    };
}
from_small_int!(i8, i16, i32, i64, u8, u16, u32);

/// Values above `i64::MAX` become the nearest `Float`.
impl From<u64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or_else(|_| Value::from(n as f64), Value::Int)
    }
}

/// Values above `i64::MAX` become the nearest `Float`.
impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or_else(|_| Value::from(n as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(OrderedFloat(x))
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(OrderedFloat(f64::from(x)))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::pair(a, b)
    }
}

impl From<BTreeMap<Value, Value>> for Value {
    fn from(m: BTreeMap<Value, Value>) -> Self {
        Value::Map(m)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_u64().map(Value::from))
                .or_else(|| n.as_f64().map(Value::from))
                .unwrap_or_default(),
            Json::String(s) => Value::Str(s),
            Json::Array(items) => items.into_iter().map(Value::from).collect(),
            Json::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}
