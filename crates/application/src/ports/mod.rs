mod script_runtime;

pub use script_runtime::{CallbackId, ScriptError, ScriptRuntime, ScriptValue};
