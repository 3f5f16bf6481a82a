use dnsbridge_application::{CallbackId, ScriptError, ScriptRuntime, ScriptValue};
use rustc_hash::FxHashMap;
use tracing::debug;

type Continuation = Box<dyn FnOnce(ScriptValue)>;

/// Resolve/reject pair for one pending operation.
pub struct PromiseCallbacks {
    resolve: Continuation,
    reject: Continuation,
}

impl PromiseCallbacks {
    pub fn new<F, G>(resolve: F, reject: G) -> Self
    where
        F: FnOnce(ScriptValue) + 'static,
        G: FnOnce(ScriptValue) + 'static,
    {
        Self {
            resolve: Box::new(resolve),
            reject: Box::new(reject),
        }
    }
}

/// In-process script runtime whose continuations are native closures.
///
/// Ids are handed out in sequence from zero, wrap after `max_id`, and skip
/// any id still awaiting settlement. Settling an id removes it.
pub struct CallbackRegistry {
    callbacks: FxHashMap<CallbackId, PromiseCallbacks>,
    next_id: u64,
    max_id: u64,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::with_max_id(u64::MAX)
    }

    pub fn with_max_id(max_id: u64) -> Self {
        Self {
            callbacks: FxHashMap::default(),
            next_id: 0,
            max_id,
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn is_pending(&self, id: CallbackId) -> bool {
        self.callbacks.contains_key(&id)
    }

    fn mint_id(&mut self) -> Result<CallbackId, ScriptError> {
        // len + 1 consecutive candidates always include a free id unless the
        // whole range is taken.
        for _ in 0..=self.callbacks.len() {
            let candidate = CallbackId(self.next_id);
            self.next_id = if self.next_id >= self.max_id {
                0
            } else {
                self.next_id + 1
            };

            if !self.callbacks.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
        Err(ScriptError::CallbackSpaceExhausted)
    }

    fn take(&mut self, id: CallbackId) -> Result<PromiseCallbacks, ScriptError> {
        self.callbacks
            .remove(&id)
            .ok_or(ScriptError::UnknownCallback(id))
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptRuntime for CallbackRegistry {
    type Continuations = PromiseCallbacks;

    fn register_callback(
        &mut self,
        continuations: PromiseCallbacks,
    ) -> Result<CallbackId, ScriptError> {
        let id = self.mint_id()?;
        self.callbacks.insert(id, continuations);
        debug!(callback = %id, pending = self.callbacks.len(), "Callback registered");
        Ok(id)
    }

    fn resolve_callback(&mut self, id: CallbackId, value: ScriptValue) -> Result<(), ScriptError> {
        let callbacks = self.take(id)?;
        (callbacks.resolve)(value);
        Ok(())
    }

    fn reject_callback(&mut self, id: CallbackId, error: ScriptValue) -> Result<(), ScriptError> {
        let callbacks = self.take(id)?;
        (callbacks.reject)(error);
        Ok(())
    }
}
