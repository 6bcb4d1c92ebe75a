//! Runtime Value Representation
//!
//! Values that can sit on the evaluation stack, including boxed native
//! objects and the metadata references pushed while checking them.

use std::fmt;

use crate::registry::RecordId;

/// Description used for a position past the top of the stack
pub const NO_VALUE: &str = "no value";

/// Opaque machine address of a natively allocated object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawAddress(pub usize);

impl RawAddress {
    /// The address as a typed pointer
    pub fn cast<T>(self) -> *mut T {
        self.0 as *mut T
    }
}

impl fmt::Display for RawAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A native address together with the record describing its type.
///
/// The record is attached at construction and cannot be reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxedObject {
    address: RawAddress,
    record: RecordId,
}

impl BoxedObject {
    pub fn new(address: RawAddress, record: RecordId) -> Self {
        BoxedObject { address, record }
    }

    pub fn address(&self) -> RawAddress {
        self.address
    }

    pub fn record(&self) -> RecordId {
        self.record
    }
}

/// Runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value
    Nil,

    Bool(bool),

    /// Numeric value (IEEE 754)
    Number(f64),

    Str(String),

    /// Bare address with no type metadata
    Pointer(RawAddress),

    /// Reference to a type record
    Metadata(RecordId),

    /// Boxed foreign object
    Boxed(BoxedObject),
}

impl Value {
    /// Generic description of the value's kind, as shown in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Pointer(_) => "pointer",
            Value::Metadata(_) => "metadata",
            Value::Boxed(_) => "userdata",
        }
    }

    pub fn as_boxed(&self) -> Option<&BoxedObject> {
        match self {
            Value::Boxed(boxed) => Some(boxed),
            _ => None,
        }
    }

    pub fn as_metadata(&self) -> Option<RecordId> {
        match self {
            Value::Metadata(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<BoxedObject> for Value {
    fn from(boxed: BoxedObject) -> Self {
        Value::Boxed(boxed)
    }
}
