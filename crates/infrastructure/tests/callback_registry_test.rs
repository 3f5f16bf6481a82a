use dnsbridge_application::{CallbackId, ScriptError, ScriptRuntime, ScriptValue};
use dnsbridge_domain::AsyncError;
use dnsbridge_infrastructure::CallbackRegistry;
use std::cell::RefCell;
use std::rc::Rc;

mod helpers;
use helpers::{recording_callbacks, registry_setup, Settled};

#[test]
fn test_ids_are_sequential() {
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let mut registry = CallbackRegistry::new();

    let first = registry.register_callback(recording_callbacks(&outcomes)).unwrap();
    let second = registry.register_callback(recording_callbacks(&outcomes)).unwrap();

    assert_eq!(first, CallbackId(0));
    assert_eq!(second, CallbackId(1));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_resolve_runs_resolve_continuation_once() {
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let mut registry = CallbackRegistry::new();
    let id = registry.register_callback(recording_callbacks(&outcomes)).unwrap();

    registry.resolve_callback(id, ScriptValue::Int(42)).unwrap();

    assert_eq!(*outcomes.borrow(), vec![Settled::Resolved(ScriptValue::Int(42))]);
    assert!(!registry.is_pending(id));
    assert_eq!(
        registry.resolve_callback(id, ScriptValue::Int(43)),
        Err(ScriptError::UnknownCallback(id))
    );
    assert_eq!(outcomes.borrow().len(), 1);
}

#[test]
fn test_reject_runs_reject_continuation() {
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let mut registry = CallbackRegistry::new();
    let id = registry.register_callback(recording_callbacks(&outcomes)).unwrap();

    registry
        .reject_callback(id, ScriptValue::Error("nope".to_string()))
        .unwrap();

    assert_eq!(
        *outcomes.borrow(),
        vec![Settled::Rejected(ScriptValue::Error("nope".to_string()))]
    );
    assert!(registry.is_empty());
}

#[test]
fn test_reject_unknown_id_is_error() {
    let mut registry = CallbackRegistry::new();
    assert_eq!(
        registry.reject_callback(CallbackId(5), ScriptValue::Undefined),
        Err(ScriptError::UnknownCallback(CallbackId(5)))
    );
}

#[test]
fn test_ids_wrap_and_skip_pending() {
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let mut registry = CallbackRegistry::with_max_id(2);

    let a = registry.register_callback(recording_callbacks(&outcomes)).unwrap();
    let b = registry.register_callback(recording_callbacks(&outcomes)).unwrap();
    let c = registry.register_callback(recording_callbacks(&outcomes)).unwrap();
    assert_eq!((a, b, c), (CallbackId(0), CallbackId(1), CallbackId(2)));

    registry.resolve_callback(b, ScriptValue::Undefined).unwrap();

    // 0 is still pending, so the wrapped counter lands on 1.
    let d = registry.register_callback(recording_callbacks(&outcomes)).unwrap();
    assert_eq!(d, CallbackId(1));
}

#[test]
fn test_full_id_space_is_exhausted() {
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let mut registry = CallbackRegistry::with_max_id(1);

    registry.register_callback(recording_callbacks(&outcomes)).unwrap();
    registry.register_callback(recording_callbacks(&outcomes)).unwrap();

    assert!(matches!(
        registry.register_callback(recording_callbacks(&outcomes)),
        Err(ScriptError::CallbackSpaceExhausted)
    ));

    registry.reject_callback(CallbackId(0), ScriptValue::Undefined).unwrap();
    assert_eq!(
        registry.register_callback(recording_callbacks(&outcomes)).unwrap(),
        CallbackId(0)
    );
}

#[test]
fn test_second_settlement_through_bridge_runs_no_continuation() {
    let (mut dispatcher, bridge) = registry_setup();
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let id = bridge
        .register_callback(dispatcher.handle_mut(), recording_callbacks(&outcomes))
        .unwrap();

    bridge.complete_promise(id, Ok(ScriptValue::Int(1)));
    bridge.complete_promise(id, Err(AsyncError::Failed("late".to_string())));

    // Both jobs run; the later one finds no continuation and is only logged.
    assert_eq!(dispatcher.run_until_idle(), 2);
    assert_eq!(outcomes.borrow().len(), 1);
    assert!(dispatcher.handle().runtime().is_empty());
}
