//! Evaluation Stack Implementation
//!
//! The stack abstraction consumed by argument checks, and a plain
//! vector-backed implementation of it.

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::registry::RecordId;

use super::index::slot_index;
use super::value::{RawAddress, Value, NO_VALUE};

/// Slots kept free above the configured maximum for auxiliary values.
///
/// An argument check holds at most two auxiliary values at a time.
pub const AUX_HEADROOM: usize = 4;

/// Operations a host stack must provide for argument checking.
///
/// Indices follow [`absolute_index`](super::index::absolute_index): 1-based
/// from the bottom, or negative from the top.
pub trait HostStack {
    /// Number of values currently on the stack
    fn depth(&self) -> usize;

    /// Value at `index`, or `None` past either end
    fn value_at(&self, index: i32) -> Option<&Value>;

    /// Push an auxiliary value.
    ///
    /// Must succeed for at least [`AUX_HEADROOM`] values above any depth the
    /// host itself can reach, so checks never fail for lack of room.
    fn push_temporary(&mut self, value: Value) -> BridgeResult<()>;

    /// Pop the top value
    fn pop_temporary(&mut self) -> BridgeResult<Value>;

    /// Drop values until `depth` remain
    fn truncate(&mut self, depth: usize);

    fn is_boxed(&self, index: i32) -> bool {
        matches!(self.value_at(index), Some(Value::Boxed(_)))
    }

    fn attached_record(&self, index: i32) -> Option<RecordId> {
        self.value_at(index)?.as_boxed().map(|boxed| boxed.record())
    }

    fn raw_address(&self, index: i32) -> Option<RawAddress> {
        self.value_at(index)?.as_boxed().map(|boxed| boxed.address())
    }

    /// Generic description of whatever sits at `index`
    fn type_description(&self, index: i32) -> &'static str {
        self.value_at(index).map_or(NO_VALUE, Value::type_name)
    }
}

/// Vector-backed evaluation stack
#[derive(Debug)]
pub struct Stack {
    values: Vec<Value>,
    max_size: usize,
}

impl Stack {
    /// Create new stack with maximum size
    pub fn new(max_size: usize) -> Self {
        Stack {
            values: Vec::new(),
            max_size,
        }
    }

    /// Create new stack sized from `config`
    pub fn with_config(config: &BridgeConfig) -> Self {
        Self::new(config.max_stack_size)
    }

    /// Push value onto stack
    pub fn push(&mut self, value: Value) -> BridgeResult<()> {
        if self.values.len() >= self.max_size {
            return Err(BridgeError::StackOverflow);
        }
        self.values.push(value);
        Ok(())
    }

    /// Pop value from stack
    pub fn pop(&mut self) -> BridgeResult<Value> {
        self.values.pop().ok_or(BridgeError::StackUnderflow)
    }

    /// Value at an absolute or top-relative index
    pub fn get(&self, index: i32) -> Option<&Value> {
        slot_index(index, self.values.len()).map(|slot| &self.values[slot])
    }

    /// Get current stack size
    pub fn size(&self) -> usize {
        self.values.len()
    }
}

impl HostStack for Stack {
    fn depth(&self) -> usize {
        self.size()
    }

    fn value_at(&self, index: i32) -> Option<&Value> {
        self.get(index)
    }

    fn push_temporary(&mut self, value: Value) -> BridgeResult<()> {
        if self.values.len() >= self.max_size.saturating_add(AUX_HEADROOM) {
            return Err(BridgeError::StackOverflow);
        }
        self.values.push(value);
        Ok(())
    }

    fn pop_temporary(&mut self) -> BridgeResult<Value> {
        self.pop()
    }

    fn truncate(&mut self, depth: usize) {
        self.values.truncate(depth);
    }
}
