//! Type Registry
//!
//! Arena of type metadata records plus a name index.
//! Records are only ever appended, and a parent must exist before its child,
//! so the parent links always form a forest.

use std::collections::HashMap;

use log::debug;

use super::record::{RecordId, TypeRecord};
use crate::config::{BridgeConfig, DEFAULT_CONST_PREFIX};
use crate::error::{BridgeError, BridgeResult};

/// Name-addressable store of type records.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    records: Vec<TypeRecord>,
    by_name: HashMap<String, RecordId>,
    const_prefix: String,
}

impl TypeRegistry {
    /// Empty registry using the default const prefix
    pub fn new() -> Self {
        TypeRegistry {
            records: Vec::new(),
            by_name: HashMap::new(),
            const_prefix: DEFAULT_CONST_PREFIX.to_string(),
        }
    }

    /// Empty registry using the naming conventions from `config`
    pub fn with_config(config: &BridgeConfig) -> Self {
        TypeRegistry {
            const_prefix: config.const_prefix.clone(),
            ..Self::new()
        }
    }

    /// Add a single record.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        parent: Option<RecordId>,
    ) -> BridgeResult<RecordId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(BridgeError::DuplicateType(name));
        }
        if let Some(parent) = parent {
            if self.record(parent).is_none() {
                return Err(BridgeError::UnknownRecord(parent));
            }
        }

        let id = RecordId(self.records.len() as u32);
        debug!("register {} as {} (parent {:?})", name, id, parent);
        self.records.push(TypeRecord::new(name.clone(), parent));
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Pair two records as const twins of each other.
    pub fn link_const_twins(&mut self, a: RecordId, b: RecordId) -> BridgeResult<()> {
        let (rec_a, rec_b) = match (self.record(a), self.record(b)) {
            (Some(rec_a), Some(rec_b)) => (rec_a, rec_b),
            (None, _) => return Err(BridgeError::UnknownRecord(a)),
            (_, None) => return Err(BridgeError::UnknownRecord(b)),
        };
        if a == b || rec_a.const_twin().is_some() || rec_b.const_twin().is_some() {
            return Err(BridgeError::InvalidConstTwin(rec_a.type_name().to_string()));
        }

        self.records[a.index()].set_const_twin(b);
        self.records[b.index()].set_const_twin(a);
        Ok(())
    }

    /// Register a class as a mutable record and its const twin.
    ///
    /// With a parent class, each twin inherits from the parent's twin of the
    /// same qualification. Returns the mutable record.
    pub fn register_class(&mut self, name: &str, parent: Option<&str>) -> BridgeResult<RecordId> {
        let const_name = format!("{}{}", self.const_prefix, name);
        // An empty prefix would give both twins the same name.
        if const_name == name {
            return Err(BridgeError::InvalidConstTwin(name.to_string()));
        }
        for taken in [name, const_name.as_str()] {
            if self.by_name.contains_key(taken) {
                return Err(BridgeError::DuplicateType(taken.to_string()));
            }
        }

        let (parent, const_parent) = match parent {
            Some(parent_name) => {
                let id = self
                    .lookup(parent_name)
                    .ok_or_else(|| BridgeError::UnknownType(parent_name.to_string()))?;
                let twin = self.record(id).and_then(TypeRecord::const_twin).unwrap_or(id);
                (Some(id), Some(twin))
            }
            None => (None, None),
        };

        let mutable = self.register(name, parent)?;
        let constant = self.register(const_name, const_parent)?;
        self.link_const_twins(mutable, constant)?;
        Ok(mutable)
    }

    /// Record registered under `name`
    pub fn lookup(&self, name: &str) -> Option<RecordId> {
        self.by_name.get(name).copied()
    }

    /// Record stored at `id`, if it belongs to this registry
    pub fn record(&self, id: RecordId) -> Option<&TypeRecord> {
        self.records.get(id.index())
    }

    /// Display name of the record at `id`
    pub fn type_name(&self, id: RecordId) -> Option<&str> {
        self.record(id).map(TypeRecord::type_name)
    }

    /// Walk the parent chain, starting with `id` itself.
    pub fn ancestors(&self, id: RecordId) -> Ancestors<'_> {
        Ancestors {
            registry: self,
            next: self.record(id).map(|_| id),
        }
    }

    /// `name` without a leading const marker
    pub fn strip_const<'a>(&self, name: &'a str) -> &'a str {
        name.strip_prefix(self.const_prefix.as_str()).unwrap_or(name)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no record is registered
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a record and its ancestors
pub struct Ancestors<'a> {
    registry: &'a TypeRegistry,
    next: Option<RecordId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (RecordId, &'a TypeRecord);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let record = self.registry.record(id)?;
        self.next = record.parent();
        Some((id, record))
    }
}
