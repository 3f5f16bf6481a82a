use super::panic_message;
use dnsbridge_domain::config::WorkerConfig;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::io;
use std::sync::Arc;
use std::thread;
use tracing::error;

/// Where blocking native operations run.
#[derive(Clone, Default)]
pub enum WorkerPool {
    /// One fresh thread per operation. Concurrency is unbounded and there is
    /// no backpressure.
    #[default]
    ThreadPerTask,

    /// A fixed set of threads; excess operations wait their turn.
    Bounded(Arc<ThreadPool>),
}

impl WorkerPool {
    pub fn bounded(max_threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(max_threads)
            .thread_name(|index| format!("dnsbridge-worker-{}", index))
            .panic_handler(|payload| {
                error!(panic = %panic_message(&*payload), "Worker task panicked");
            })
            .build()?;
        Ok(Self::Bounded(Arc::new(pool)))
    }

    pub fn from_config(config: &WorkerConfig) -> Result<Self, ThreadPoolBuildError> {
        if config.is_bounded() {
            Self::bounded(config.max_threads)
        } else {
            Ok(Self::ThreadPerTask)
        }
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, Self::Bounded(_))
    }

    /// Launch `work` without waiting for it. If the work cannot be started it
    /// is dropped, along with anything it owns.
    pub fn spawn<F>(&self, work: F) -> io::Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        match self {
            Self::ThreadPerTask => {
                thread::Builder::new()
                    .name("dnsbridge-worker".to_string())
                    .spawn(work)?;
                Ok(())
            }
            Self::Bounded(pool) => {
                pool.spawn(work);
                Ok(())
            }
        }
    }
}

