//! ubridge - Core Library
//!
//! Runtime type checks for native objects boxed on a host evaluation stack.
//! The registry describes the native class hierarchy; [`validate`] decides
//! whether a stack value may be handed to native code as a given type.

pub mod check;
pub mod config;
pub mod error;
pub mod message;
pub mod registry;
pub mod stack;

// Re-export commonly used types
pub use check::{validate, UNKNOWN_TYPE_NAME};
pub use config::BridgeConfig;
pub use error::{ArgErrorKind, BridgeError, BridgeResult};
pub use message::{format_mismatch, ArgMessage};
pub use registry::{RecordId, TypeRecord, TypeRegistry};
pub use stack::{BoxedObject, HostStack, RawAddress, Stack, Value};

#[cfg(test)]
mod tests {
    use super::*;

    // Base (root) and Derived (parent Base), registered without const twins.
    fn base_and_derived() -> (TypeRegistry, Stack) {
        let mut reg = TypeRegistry::new();
        let base = reg.register("Base", None).expect("register failed");
        let derived = reg.register("Derived", Some(base)).expect("register failed");

        let mut stack = Stack::with_config(&BridgeConfig::new());
        stack
            .push(BoxedObject::new(RawAddress(0xABC), derived).into())
            .expect("push failed");
        (reg, stack)
    }

    #[test]
    fn derived_handle_scenario() {
        let (reg, mut stack) = base_and_derived();

        assert_eq!(validate(&mut stack, &reg, 1, "Base", false), Ok(RawAddress(0xABC)));
        assert_eq!(validate(&mut stack, &reg, 1, "Derived", true), Ok(RawAddress(0xABC)));

        let err = validate(&mut stack, &reg, 1, "Other", false).unwrap_err();
        assert_eq!(err.arg_message(), Some("Other expected, got Derived"));

        let err = validate(&mut stack, &reg, 1, "Base", true).unwrap_err();
        assert_eq!(err.arg_message(), Some("Base expected, got Derived"));
        assert_eq!(err.to_string(), "bad argument #1 (Base expected, got Derived)");
    }

    #[test]
    fn root_handle_names_original_type() {
        let (mut reg, mut stack) = base_and_derived();
        let root = reg.register("Root", None).expect("register failed");
        stack
            .push(BoxedObject::new(RawAddress(0x1), root).into())
            .expect("push failed");

        let err = validate(&mut stack, &reg, -1, "Derived", false).unwrap_err();
        assert_eq!(err.arg_kind(), Some(ArgErrorKind::AncestorChainExhausted));
        assert_eq!(err.arg_message(), Some("Derived expected, got Root"));
    }

    #[test]
    fn failure_message_uses_runtime_type_not_last_ancestor() {
        let (mut reg, mut stack) = base_and_derived();
        reg.register("Unrelated", None).expect("register failed");

        let err = validate(&mut stack, &reg, 1, "Unrelated", false).unwrap_err();
        assert_eq!(err.arg_message(), Some("Unrelated expected, got Derived"));
    }

    #[test]
    fn validation_leaves_stack_unchanged() {
        let (reg, mut stack) = base_and_derived();
        stack.push(Value::Str("arg".to_string())).expect("push failed");

        let before: Vec<Value> = (1..=2).filter_map(|i| stack.get(i).cloned()).collect();
        let _ = validate(&mut stack, &reg, -2, "Base", false);
        let _ = validate(&mut stack, &reg, -1, "Base", false);
        let after: Vec<Value> = (1..=2).filter_map(|i| stack.get(i).cloned()).collect();

        assert_eq!(stack.size(), 2);
        assert_eq!(before, after);
    }
}
