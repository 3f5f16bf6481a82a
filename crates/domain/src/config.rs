mod dispatch;
mod errors;
mod logging;
mod root;
mod server;
mod workers;

pub use dispatch::{DispatchConfig, IdleStrategy, QueueDiscipline};
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use workers::WorkerConfig;
