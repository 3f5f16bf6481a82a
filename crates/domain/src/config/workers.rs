use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkerConfig {
    /// Upper bound on concurrently running native operations.
    /// `0` spawns one thread per operation with no limit.
    #[serde(default)]
    pub max_threads: usize,
}

impl WorkerConfig {
    pub fn is_bounded(&self) -> bool {
        self.max_threads > 0
    }
}
