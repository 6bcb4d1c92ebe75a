//! Type metadata records
//!
//! Records are identified by their arena slot, never by name.

use std::fmt;

/// Index of a record inside a [`TypeRegistry`](super::TypeRegistry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub u32);

impl RecordId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for RecordId {
    fn from(raw: u32) -> Self {
        RecordId(raw)
    }
}

impl From<RecordId> for u32 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Metadata describing one registered native type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRecord {
    type_name: String,
    parent: Option<RecordId>,
    const_twin: Option<RecordId>,
}

impl TypeRecord {
    pub(crate) fn new(type_name: String, parent: Option<RecordId>) -> Self {
        TypeRecord {
            type_name,
            parent,
            const_twin: None,
        }
    }

    /// Display name used in diagnostics
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Direct ancestor, if any
    pub fn parent(&self) -> Option<RecordId> {
        self.parent
    }

    /// Record for the same type under the opposite const qualification
    pub fn const_twin(&self) -> Option<RecordId> {
        self.const_twin
    }

    pub(crate) fn set_const_twin(&mut self, twin: RecordId) {
        self.const_twin = Some(twin);
    }
}
