pub mod mock_runtime;

#[allow(unused_imports)]
pub use mock_runtime::{pump_until, MockRuntime, Settlement};
