//! Error kinds raised by sequence operations and the chain facade.
//!
//! Every operation in [`ops`](crate::ops) returns [`Result<T>`]. Errors are
//! raised at the call site that triggered them: callback adaptation happens
//! when an operation is invoked, so an over-arity callback fails before any
//! item is processed. The only errors that surface later are the ones a lazy
//! sequence discovers while being pulled (e.g. a `collect` callback returning
//! something that is not iterable); those are yielded as an `Err` item.

use thiserror::Error;

/// Result type for sequence operations.
pub type Result<T> = std::result::Result<T, SeqError>;

/// Everything that can go wrong inside `seqchain`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SeqError {
    /// A declared function takes more than three positional parameters.
    #[error("callbacks may declare at most 3 parameters, got {arity}")]
    UnsupportedArity { arity: usize },

    /// `find` (or `head`) exhausted its source without a match.
    #[error("`{op}`: no matching item")]
    NotFound { op: &'static str },

    /// The chain facade was asked for an operation the registry doesn't know.
    #[error("unknown operation `{name}`")]
    UnknownOperation { name: String },

    /// A value had the wrong shape for the operation (not iterable, not
    /// comparable, not summable, not a pair, ...).
    #[error("`{op}`: expected {expected}, found {found}")]
    TypeMismatch {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A dynamically dispatched call was given missing or ill-typed arguments.
    #[error("`{op}`: {reason}")]
    InvalidArgument { op: String, reason: String },

    /// A chained call was attempted after `value()` finalized the chain.
    #[error("cannot chain `{name}` after value() finalized the chain")]
    Finalized { name: String },
}

impl SeqError {
    pub(crate) fn mismatch(op: &'static str, expected: &'static str, found: &'static str) -> Self {
        SeqError::TypeMismatch {
            op,
            expected,
            found,
        }
    }

    pub(crate) fn invalid(op: impl Into<String>, reason: impl Into<String>) -> Self {
        SeqError::InvalidArgument {
            op: op.into(),
            reason: reason.into(),
        }
    }

    /// Short, stable name of the error kind (useful for matching in tests and logs).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SeqError::UnsupportedArity { .. } => "UnsupportedArity",
            SeqError::NotFound { .. } => "NotFound",
            SeqError::UnknownOperation { .. } => "UnknownOperation",
            SeqError::TypeMismatch { .. } => "TypeMismatch",
            SeqError::InvalidArgument { .. } => "InvalidArgument",
            SeqError::Finalized { .. } => "Finalized",
        }
    }
}
