use dnsbridge_domain::AsyncError;
use std::fmt;
use thiserror::Error;

/// Integer handle a script environment hands out for a resolve/reject pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(pub u64);

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value passed across the native/script boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptValue {
    Undefined,
    Bool(bool),
    Int(i64),
    String(String),
    Buffer(Vec<u8>),
    Error(String),
}

impl From<AsyncError> for ScriptValue {
    fn from(err: AsyncError) -> Self {
        Self::Error(err.to_string())
    }
}

impl From<Vec<u8>> for ScriptValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Buffer(bytes)
    }
}

impl From<String> for ScriptValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("No continuation registered for callback {0}")]
    UnknownCallback(CallbackId),

    #[error("Every callback id is in use")]
    CallbackSpaceExhausted,
}

/// The script environment as seen from native code.
///
/// Implementations are single-threaded: every method is only ever called
/// from the dispatch thread through a [`ScriptHandle`](crate::ScriptHandle).
/// Native code never sees the continuations again once registered, only the
/// id they were bound to.
pub trait ScriptRuntime {
    /// Script-side resolve/reject pair bound to a callback id.
    type Continuations;

    fn register_callback(
        &mut self,
        continuations: Self::Continuations,
    ) -> Result<CallbackId, ScriptError>;

    fn resolve_callback(&mut self, id: CallbackId, value: ScriptValue) -> Result<(), ScriptError>;

    fn reject_callback(&mut self, id: CallbackId, error: ScriptValue) -> Result<(), ScriptError>;
}
