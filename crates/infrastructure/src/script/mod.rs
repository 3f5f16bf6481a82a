pub mod callback_registry;

pub use callback_registry::{CallbackRegistry, PromiseCallbacks};
