//! ubridge Error Types
//!
//! Defines every error condition produced by the bridge core.
//! Errors are deterministic and scoped to argument checking, the evaluation
//! stack and the type registry.

use std::fmt;

use thiserror::Error;

use crate::message::ArgMessage;
use crate::registry::RecordId;

/// Which check rejected an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgErrorKind {
    /// The value at the index is not a boxed foreign object at all.
    NotBoxedValue,
    /// Identity comparison failed under exact matching.
    ExactTypeMismatch,
    /// Neither a record in the parent chain nor any const twin along it matched.
    AncestorChainExhausted,
}

impl fmt::Display for ArgErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgErrorKind::NotBoxedValue => write!(f, "not a boxed value"),
            ArgErrorKind::ExactTypeMismatch => write!(f, "exact type mismatch"),
            ArgErrorKind::AncestorChainExhausted => write!(f, "ancestor chain exhausted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    // Argument checks
    #[error("bad argument #{index} ({message})")]
    InvalidArgument {
        index: i32,
        kind: ArgErrorKind,
        message: ArgMessage,
    },

    // Evaluation stack
    #[error("stack overflow")]
    StackOverflow,
    #[error("stack underflow")]
    StackUnderflow,

    // Type registry
    #[error("type `{0}` is already registered")]
    DuplicateType(String),
    #[error("type `{0}` is not registered")]
    UnknownType(String),
    #[error("record {0} does not belong to this registry")]
    UnknownRecord(RecordId),
    #[error("cannot pair const twin for `{0}`")]
    InvalidConstTwin(String),
}

impl BridgeError {
    /// The argument check that failed, if this is an invalid-argument error.
    pub fn arg_kind(&self) -> Option<ArgErrorKind> {
        match self {
            BridgeError::InvalidArgument { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The formatted diagnostic, if this is an invalid-argument error.
    pub fn arg_message(&self) -> Option<&str> {
        match self {
            BridgeError::InvalidArgument { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
