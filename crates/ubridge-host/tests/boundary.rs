use std::panic;

use ubridge_core::{BoxedObject, Stack, Value};
use ubridge_host::{
    check_class, check_class_ptr, protected, ArgErrorKind, BridgeError, RawAddress, TypeRegistry,
};

#[derive(Debug, PartialEq)]
struct Counter {
    hits: u32,
}

fn registry() -> TypeRegistry {
    let mut reg = TypeRegistry::new();
    reg.register_class("Shape", None).unwrap();
    reg.register_class("Circle", Some("Shape")).unwrap();
    reg.register_class("Counter", None).unwrap();
    reg
}

fn boxed(reg: &TypeRegistry, name: &str, address: usize) -> Value {
    BoxedObject::new(RawAddress(address), reg.lookup(name).unwrap()).into()
}

// Glue for a two-argument native method `Shape::overlaps(&self, other: &Circle)`.
fn overlaps_glue(stack: &mut Stack, reg: &TypeRegistry) -> (RawAddress, RawAddress) {
    let this = check_class(stack, reg, 1, "const Shape", false);
    let other = check_class(stack, reg, 2, "Circle", false);
    (this, other)
}

#[test]
fn glue_receives_both_addresses() {
    let _ = env_logger::builder().is_test(true).try_init();
    let reg = registry();
    let mut stack = Stack::new(16);
    stack.push(boxed(&reg, "Circle", 0x10)).unwrap();
    stack.push(boxed(&reg, "const Circle", 0x20)).unwrap();

    let result = protected(|| overlaps_glue(&mut stack, &reg));
    assert_eq!(result, Ok((RawAddress(0x10), RawAddress(0x20))));
}

#[test]
fn second_argument_failure_aborts_glue() {
    let _ = env_logger::builder().is_test(true).try_init();
    let reg = registry();
    let mut stack = Stack::new(16);
    stack.push(boxed(&reg, "Circle", 0x10)).unwrap();
    stack.push(boxed(&reg, "Shape", 0x20)).unwrap();

    let err = protected(|| overlaps_glue(&mut stack, &reg)).unwrap_err();
    assert_eq!(err.arg_kind(), Some(ArgErrorKind::AncestorChainExhausted));
    assert_eq!(err.to_string(), "bad argument #2 (Circle expected, got Shape)");
    assert_eq!(stack.size(), 2);
}

#[test]
fn non_boxed_argument_aborts_glue() {
    let reg = registry();
    let mut stack = Stack::new(16);
    stack.push(Value::Str("circle".to_string())).unwrap();

    let err = protected(|| overlaps_glue(&mut stack, &reg)).unwrap_err();
    assert_eq!(err.arg_kind(), Some(ArgErrorKind::NotBoxedValue));
    assert_eq!(err.arg_message(), Some("const Shape expected, got string"));
}

#[test]
fn typed_pointer_reaches_native_object() {
    let reg = registry();
    let raw = Box::into_raw(Box::new(Counter { hits: 0 }));
    let mut stack = Stack::new(16);
    stack.push(boxed(&reg, "Counter", raw as usize)).unwrap();

    let result = protected(|| {
        let counter = check_class_ptr::<Counter, _>(&mut stack, &reg, -1, "Counter", false);
        // SAFETY: the address was produced by Box::into_raw above and is still live.
        unsafe { (*counter).hits += 1 };
        counter
    });
    assert_eq!(result, Ok(raw));

    // SAFETY: reclaim the allocation made above exactly once.
    let counter = unsafe { Box::from_raw(raw) };
    assert_eq!(*counter, Counter { hits: 1 });
}

#[test]
fn nested_boundaries_catch_innermost_first() {
    let reg = registry();
    let mut stack = Stack::new(16);
    stack.push(boxed(&reg, "Shape", 0x30)).unwrap();

    let outer = protected(|| {
        let inner = protected(|| check_class(&mut stack, &reg, 1, "Circle", false));
        assert!(matches!(inner, Err(BridgeError::InvalidArgument { .. })));
        check_class(&mut stack, &reg, 1, "Shape", true)
    });
    assert_eq!(outer, Ok(RawAddress(0x30)));
}

#[test]
fn foreign_panics_pass_through_boundary() {
    let caught = panic::catch_unwind(|| {
        let _: Result<(), BridgeError> = protected(|| panic::resume_unwind(Box::new(42u32)));
    });
    let payload = caught.unwrap_err();
    assert_eq!(payload.downcast_ref::<u32>(), Some(&42));
}

#[test]
fn glue_runs_on_a_full_stack() {
    let reg = registry();
    let mut stack = Stack::new(2);
    stack.push(boxed(&reg, "Circle", 0x10)).unwrap();
    stack.push(boxed(&reg, "Circle", 0x20)).unwrap();
    assert_eq!(stack.push(Value::Nil), Err(BridgeError::StackOverflow));

    let result = protected(|| overlaps_glue(&mut stack, &reg));
    assert_eq!(result, Ok((RawAddress(0x10), RawAddress(0x20))));
    assert_eq!(stack.size(), 2);
}
