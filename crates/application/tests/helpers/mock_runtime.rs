#![allow(dead_code)]

use dnsbridge_application::{CallbackId, Dispatcher, ScriptError, ScriptRuntime, ScriptValue};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    Resolved(CallbackId, ScriptValue),
    Rejected(CallbackId, ScriptValue),
}

impl Settlement {
    pub fn id(&self) -> CallbackId {
        match self {
            Self::Resolved(id, _) | Self::Rejected(id, _) => *id,
        }
    }
}

/// Script runtime double that records every settle attempt and the thread it
/// happened on, including attempts on ids that are no longer pending.
#[derive(Default)]
pub struct MockRuntime {
    next_id: u64,
    pending: HashSet<CallbackId>,
    pub log: Vec<String>,
    settlements: Arc<Mutex<Vec<(Settlement, ThreadId)>>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recorder(settlements: Arc<Mutex<Vec<(Settlement, ThreadId)>>>) -> Self {
        Self {
            settlements,
            ..Self::default()
        }
    }

    pub fn recorder(&self) -> Arc<Mutex<Vec<(Settlement, ThreadId)>>> {
        Arc::clone(&self.settlements)
    }

    pub fn settlements(&self) -> Vec<Settlement> {
        self.settlements
            .lock()
            .unwrap()
            .iter()
            .map(|(s, _)| s.clone())
            .collect()
    }

    pub fn settlement_threads(&self) -> Vec<ThreadId> {
        self.settlements
            .lock()
            .unwrap()
            .iter()
            .map(|(_, t)| *t)
            .collect()
    }

    pub fn settled_count(&self, id: CallbackId) -> usize {
        self.settlements().iter().filter(|s| s.id() == id).count()
    }

    pub fn is_pending(&self, id: CallbackId) -> bool {
        self.pending.contains(&id)
    }

    fn settle(&mut self, id: CallbackId, settlement: Settlement) -> Result<(), ScriptError> {
        self.settlements
            .lock()
            .unwrap()
            .push((settlement, thread::current().id()));
        if !self.pending.remove(&id) {
            return Err(ScriptError::UnknownCallback(id));
        }
        Ok(())
    }
}

impl ScriptRuntime for MockRuntime {
    type Continuations = ();

    fn register_callback(&mut self, _: ()) -> Result<CallbackId, ScriptError> {
        self.next_id += 1;
        let id = CallbackId(self.next_id);
        self.pending.insert(id);
        Ok(id)
    }

    fn resolve_callback(&mut self, id: CallbackId, value: ScriptValue) -> Result<(), ScriptError> {
        self.settle(id, Settlement::Resolved(id, value))
    }

    fn reject_callback(&mut self, id: CallbackId, error: ScriptValue) -> Result<(), ScriptError> {
        self.settle(id, Settlement::Rejected(id, error))
    }
}

/// Drive `dispatcher` until `done` holds or `timeout` elapses.
pub fn pump_until<F>(dispatcher: &mut Dispatcher<MockRuntime>, timeout: Duration, done: F) -> bool
where
    F: Fn(&MockRuntime) -> bool,
{
    let deadline = Instant::now() + timeout;
    loop {
        dispatcher.run_until_idle();
        if done(dispatcher.handle().runtime()) {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        dispatcher.queue().wait_for_work(Duration::from_millis(10));
    }
}
