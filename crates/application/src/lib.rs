pub mod ports;
pub mod services;

pub use ports::{CallbackId, ScriptError, ScriptRuntime, ScriptValue};
pub use services::{
    AsyncBridge, Dispatcher, Job, Outcome, PromiseCompleter, ScriptHandle, WorkQueue, WorkerPool,
};
