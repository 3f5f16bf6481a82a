use super::dispatcher::ScriptHandle;
use super::work_queue::WorkQueue;
use super::worker_pool::WorkerPool;
use crate::ports::{CallbackId, ScriptError, ScriptRuntime, ScriptValue};
use dnsbridge_domain::AsyncError;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Result of a native operation, settled into the script environment.
pub type Outcome = Result<ScriptValue, AsyncError>;

/// Connects blocking native work on worker threads to script-side
/// continuations on the dispatch thread.
pub struct AsyncBridge<R> {
    queue: Arc<WorkQueue<R>>,
    workers: WorkerPool,
}

impl<R> Clone for AsyncBridge<R> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
            workers: self.workers.clone(),
        }
    }
}

impl<R: ScriptRuntime + 'static> AsyncBridge<R> {
    pub fn new(queue: Arc<WorkQueue<R>>, workers: WorkerPool) -> Self {
        Self { queue, workers }
    }

    pub fn queue(&self) -> &Arc<WorkQueue<R>> {
        &self.queue
    }

    /// Bind `continuations` to a fresh id. Needs the handle, so this only
    /// runs on the dispatch thread.
    pub fn register_callback(
        &self,
        handle: &mut ScriptHandle<R>,
        continuations: R::Continuations,
    ) -> Result<CallbackId, ScriptError> {
        let id = handle.runtime_mut().register_callback(continuations)?;
        debug!(callback = %id, "Registered callback");
        Ok(id)
    }

    /// Fire-and-forget `work` on the worker pool.
    pub fn run_async<F>(&self, work: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Err(e) = self.workers.spawn(work) {
            error!(error = %e, "Failed to launch worker");
        }
    }

    /// Queue the settlement of `id` for the dispatch thread.
    pub fn complete_promise(&self, id: CallbackId, outcome: Outcome) {
        enqueue_settlement(&self.queue, id, outcome);
    }

    pub fn completer(&self, id: CallbackId) -> PromiseCompleter<R> {
        PromiseCompleter {
            id,
            queue: Some(Arc::clone(&self.queue)),
        }
    }

    /// Run `work` on the worker pool and settle `id` with its result. The
    /// callback is settled exactly once even if `work` panics or never starts.
    pub fn spawn_promise<F>(&self, id: CallbackId, work: F)
    where
        F: FnOnce() -> Outcome + Send + 'static,
    {
        let completer = self.completer(id);
        self.run_async(move || completer.complete(work()));
    }
}

/// Obligation to settle one callback.
///
/// `complete` consumes it. Dropping it unsettled rejects the callback with
/// [`AsyncError::Abandoned`].
pub struct PromiseCompleter<R: ScriptRuntime + 'static> {
    id: CallbackId,
    queue: Option<Arc<WorkQueue<R>>>,
}

impl<R: ScriptRuntime + 'static> PromiseCompleter<R> {
    pub fn id(&self) -> CallbackId {
        self.id
    }

    pub fn complete(mut self, outcome: Outcome) {
        if let Some(queue) = self.queue.take() {
            enqueue_settlement(&queue, self.id, outcome);
        }
    }
}

impl<R: ScriptRuntime + 'static> Drop for PromiseCompleter<R> {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.take() {
            warn!(callback = %self.id, "Promise dropped without a result");
            enqueue_settlement(&queue, self.id, Err(AsyncError::Abandoned));
        }
    }
}

fn enqueue_settlement<R: ScriptRuntime + 'static>(
    queue: &WorkQueue<R>,
    id: CallbackId,
    outcome: Outcome,
) {
    queue.enqueue(move |handle: &mut ScriptHandle<R>| {
        let runtime = handle.runtime_mut();
        let result = match outcome {
            Ok(value) => runtime.resolve_callback(id, value),
            Err(err) => {
                debug!(callback = %id, error = %err, "Rejecting callback");
                runtime.reject_callback(id, ScriptValue::from(err))
            }
        };

        if let Err(e) = result {
            warn!(callback = %id, error = %e, "Failed to settle callback");
        }
    });
}
