#![allow(dead_code)]

use dnsbridge_application::{AsyncBridge, Dispatcher, ScriptValue, WorkQueue, WorkerPool};
use dnsbridge_domain::config::QueueDiscipline;
use dnsbridge_infrastructure::{CallbackRegistry, PromiseCallbacks};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    Resolved(ScriptValue),
    Rejected(ScriptValue),
}

pub type Outcomes = Rc<RefCell<Vec<Settled>>>;

/// Continuations that append to a shared list.
pub fn recording_callbacks(outcomes: &Outcomes) -> PromiseCallbacks {
    let on_resolve = Rc::clone(outcomes);
    let on_reject = Rc::clone(outcomes);
    PromiseCallbacks::new(
        move |value| on_resolve.borrow_mut().push(Settled::Resolved(value)),
        move |error| on_reject.borrow_mut().push(Settled::Rejected(error)),
    )
}

pub fn registry_setup() -> (Dispatcher<CallbackRegistry>, AsyncBridge<CallbackRegistry>) {
    let queue = Arc::new(WorkQueue::new(QueueDiscipline::Lifo));
    let bridge = AsyncBridge::new(Arc::clone(&queue), WorkerPool::ThreadPerTask);
    (Dispatcher::new(queue, CallbackRegistry::new()), bridge)
}

/// Drive the dispatcher until `outcomes` holds `count` entries or the
/// timeout elapses.
pub fn pump_until_settled(
    dispatcher: &mut Dispatcher<CallbackRegistry>,
    outcomes: &Outcomes,
    count: usize,
) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        dispatcher.run_until_idle();
        if outcomes.borrow().len() >= count {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        dispatcher.queue().wait_for_work(Duration::from_millis(10));
    }
}
