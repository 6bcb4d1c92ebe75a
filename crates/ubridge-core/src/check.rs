//! Argument Type Checks
//!
//! Verifies that a stack value is a boxed object of a requested type, or of
//! a type descending from it, before native code is allowed to touch the
//! address inside.

use log::{debug, trace};

use crate::error::{ArgErrorKind, BridgeError, BridgeResult};
use crate::message::format_mismatch;
use crate::registry::{RecordId, TypeRegistry};
use crate::stack::{absolute_index, HostStack, RawAddress, Value};

/// Name reported for a runtime record the registry does not know
pub const UNKNOWN_TYPE_NAME: &str = "(unknown type)";

/// Check that the value at `index` is a boxed object of type `type_name`.
///
/// With `exact`, the object's record must be the record registered under
/// `type_name`. Otherwise the object's record or any of its ancestors may
/// match, either directly or through its const twin.
///
/// On success the object's address is returned. The stack depth is the same
/// after the call as before it, whatever the outcome.
pub fn validate<S>(
    stack: &mut S,
    registry: &TypeRegistry,
    index: i32,
    type_name: &str,
    exact: bool,
) -> BridgeResult<RawAddress>
where
    S: HostStack + ?Sized,
{
    // Pin the position before anything is pushed above it.
    let index = absolute_index(index, stack.depth());

    let runtime = match stack.attached_record(index) {
        Some(record) => record,
        None => {
            let actual = stack.type_description(index);
            debug!("argument #{}: {} is not a boxed value", index, actual);
            return Err(invalid_argument(
                index,
                ArgErrorKind::NotBoxedValue,
                type_name,
                actual,
            ));
        }
    };

    let mut scratch = Scratch::new(stack);
    scratch.push(registry.lookup(type_name).map_or(Value::Nil, Value::Metadata))?;
    scratch.push(Value::Metadata(runtime))?;
    let canonical = scratch.metadata(-2);

    if exact {
        let requested = registry.strip_const(type_name);
        if canonical.is_some() && scratch.metadata(-1) == canonical {
            return scratch.address(index, requested);
        }
        let actual = registry.type_name(runtime).unwrap_or(UNKNOWN_TYPE_NAME);
        debug!("argument #{}: exact {} expected, got {}", index, requested, actual);
        return Err(invalid_argument(
            index,
            ArgErrorKind::ExactTypeMismatch,
            requested,
            actual,
        ));
    }

    while let Some(current) = scratch.metadata(-1) {
        let Some(record) = registry.record(current) else {
            break;
        };
        trace!("argument #{}: visiting {}", index, record.type_name());

        let twin = record.const_twin();
        if (twin.is_some() && twin == canonical) || Some(current) == canonical {
            return scratch.address(index, type_name);
        }

        match record.parent() {
            Some(parent) => scratch.replace_top(Value::Metadata(parent))?,
            None => break,
        }
    }

    // Report the type the object was created with, not where the walk stopped.
    let actual = registry.type_name(runtime).unwrap_or(UNKNOWN_TYPE_NAME);
    debug!("argument #{}: {} expected, got {}", index, type_name, actual);
    Err(invalid_argument(
        index,
        ArgErrorKind::AncestorChainExhausted,
        type_name,
        actual,
    ))
}

fn invalid_argument(index: i32, kind: ArgErrorKind, requested: &str, actual: &str) -> BridgeError {
    BridgeError::InvalidArgument {
        index,
        kind,
        message: format_mismatch(requested, actual),
    }
}

/// Auxiliary values pushed during a check.
///
/// Dropping it pops everything pushed through it, so early returns leave the
/// stack as they found it.
struct Scratch<'a, S: HostStack + ?Sized> {
    stack: &'a mut S,
    base: usize,
}

impl<'a, S: HostStack + ?Sized> Scratch<'a, S> {
    fn new(stack: &'a mut S) -> Self {
        let base = stack.depth();
        Scratch { stack, base }
    }

    fn push(&mut self, value: Value) -> BridgeResult<()> {
        self.stack.push_temporary(value)
    }

    fn replace_top(&mut self, value: Value) -> BridgeResult<()> {
        self.stack.pop_temporary()?;
        self.stack.push_temporary(value)
    }

    fn metadata(&self, index: i32) -> Option<RecordId> {
        self.stack.value_at(index)?.as_metadata()
    }

    fn address(&self, index: i32, type_name: &str) -> BridgeResult<RawAddress> {
        self.stack.raw_address(index).ok_or_else(|| {
            invalid_argument(
                index,
                ArgErrorKind::NotBoxedValue,
                type_name,
                self.stack.type_description(index),
            )
        })
    }
}

impl<S: HostStack + ?Sized> Drop for Scratch<'_, S> {
    fn drop(&mut self) {
        self.stack.truncate(self.base);
    }
}
