use dnsbridge_application::{
    AsyncBridge, CallbackId, Outcome, ScriptError, ScriptHandle, ScriptRuntime, ScriptValue,
};
use dnsbridge_domain::AsyncError;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads whole files on the worker pool and settles a script callback with
/// the contents.
pub struct FileReader<R> {
    bridge: AsyncBridge<R>,
}

impl<R: ScriptRuntime + 'static> FileReader<R> {
    pub fn new(bridge: AsyncBridge<R>) -> Self {
        Self { bridge }
    }

    /// Register `continuations` and start reading `path`.
    pub fn read(
        &self,
        handle: &mut ScriptHandle<R>,
        continuations: R::Continuations,
        path: impl Into<PathBuf>,
    ) -> Result<CallbackId, ScriptError> {
        let id = self.bridge.register_callback(handle, continuations)?;
        self.read_with_id(id, path);
        Ok(id)
    }

    /// Start reading `path` for an already registered callback.
    pub fn read_with_id(&self, id: CallbackId, path: impl Into<PathBuf>) {
        let path = path.into();
        debug!(callback = %id, path = %path.display(), "Reading file");
        self.bridge.spawn_promise(id, move || read_file(&path));
    }
}

pub fn read_file(path: &Path) -> Outcome {
    match std::fs::read(path) {
        Ok(bytes) => Ok(ScriptValue::Buffer(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(AsyncError::FileNotFound(path.display().to_string()))
        }
        Err(e) => Err(AsyncError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}
