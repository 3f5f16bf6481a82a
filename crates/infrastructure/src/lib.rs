pub mod dns;
pub mod fs;
pub mod script;

pub use dns::{DatagramHandler, DatagramStats};
pub use fs::FileReader;
pub use script::{CallbackRegistry, PromiseCallbacks};
