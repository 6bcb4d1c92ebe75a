//! Host boundary for ubridge
//!
//! Argument checks in `ubridge-core` return errors. Native-call glue usually
//! wants the opposite: a check that either yields the object or abandons the
//! whole call. This crate is the one place where a rejected argument becomes
//! a non-local exit, and where that exit is caught again.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use log::debug;

pub use ubridge_core::{
    validate, ArgErrorKind, BridgeError, BridgeResult, HostStack, RawAddress, TypeRegistry,
};

/// Unwind payload carrying the error that aborted a native call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aborted(pub BridgeError);

impl fmt::Display for Aborted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "native call aborted: {}", self.0)
    }
}

/// Abort the current native call with `err`.
///
/// Control resumes at the nearest enclosing [`protected`] call. The panic
/// hook is not run.
pub fn raise(err: BridgeError) -> ! {
    debug!("aborting native call: {}", err);
    panic::resume_unwind(Box::new(Aborted(err)))
}

/// Run `f`, turning an abort raised inside it back into an error.
///
/// Panics that were not raised through [`raise`] keep unwinding.
pub fn protected<F, T>(f: F) -> BridgeResult<T>
where
    F: FnOnce() -> T,
{
    // Checks restore the stack before raising.
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<Aborted>() {
            Ok(aborted) => Err(aborted.0),
            Err(other) => panic::resume_unwind(other),
        },
    }
}

/// Check the argument at `index` and return its address, or abort the call.
pub fn check_class<S>(
    stack: &mut S,
    registry: &TypeRegistry,
    index: i32,
    type_name: &str,
    exact: bool,
) -> RawAddress
where
    S: HostStack + ?Sized,
{
    match validate(stack, registry, index, type_name, exact) {
        Ok(address) => address,
        Err(err) => raise(err),
    }
}

/// [`check_class`], returning the address as a pointer to `T`.
pub fn check_class_ptr<T, S>(
    stack: &mut S,
    registry: &TypeRegistry,
    index: i32,
    type_name: &str,
    exact: bool,
) -> *mut T
where
    S: HostStack + ?Sized,
{
    check_class(stack, registry, index, type_name, exact).cast::<T>()
}
