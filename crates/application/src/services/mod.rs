mod async_bridge;
mod dispatcher;
mod work_queue;
mod worker_pool;

pub use async_bridge::{AsyncBridge, Outcome, PromiseCompleter};
pub use dispatcher::{Dispatcher, ScriptHandle};
pub use work_queue::{Job, WorkQueue};
pub use worker_pool::WorkerPool;

use std::any::Any;

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
