use super::panic_message;
use super::work_queue::WorkQueue;
use dnsbridge_domain::config::{DispatchConfig, IdleStrategy};
use std::io;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Exclusive access to the script runtime.
///
/// Only a [`Dispatcher`] creates one, and the raw-pointer marker keeps it
/// `!Send` and `!Sync` so it cannot leave the dispatch thread.
pub struct ScriptHandle<R> {
    runtime: R,
    _not_send: PhantomData<*const ()>,
}

impl<R> ScriptHandle<R> {
    fn new(runtime: R) -> Self {
        Self {
            runtime,
            _not_send: PhantomData,
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }
}

/// Owns the script handle and runs queued jobs against it one at a time.
pub struct Dispatcher<R> {
    queue: Arc<WorkQueue<R>>,
    handle: ScriptHandle<R>,
    idle_strategy: IdleStrategy,
    park_timeout: Duration,
}

impl<R> Dispatcher<R> {
    pub fn new(queue: Arc<WorkQueue<R>>, runtime: R) -> Self {
        let config = DispatchConfig::default();
        Self {
            queue,
            handle: ScriptHandle::new(runtime),
            idle_strategy: config.idle_strategy,
            park_timeout: Duration::from_millis(config.park_timeout_ms),
        }
    }

    pub fn with_config(mut self, config: &DispatchConfig) -> Self {
        self.idle_strategy = config.idle_strategy;
        self.park_timeout = Duration::from_millis(config.park_timeout_ms);
        self
    }

    pub fn queue(&self) -> &Arc<WorkQueue<R>> {
        &self.queue
    }

    pub fn handle(&self) -> &ScriptHandle<R> {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut ScriptHandle<R> {
        &mut self.handle
    }

    /// Run at most one queued job. Returns `false` immediately if the queue
    /// was empty.
    pub fn drain_one(&mut self) -> bool {
        let Some(job) = self.queue.pop() else {
            return false;
        };

        let handle = &mut self.handle;
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| job(handle))) {
            error!(panic = %panic_message(&*payload), "Dispatched job panicked");
        }
        true
    }

    /// Run jobs until the queue is empty, including jobs enqueued by the
    /// jobs themselves. Returns how many ran.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        while self.drain_one() {
            ran += 1;
        }
        ran
    }

    /// Dispatch until `shutdown` is cancelled. Returns how many jobs ran.
    pub fn run(&mut self, shutdown: &CancellationToken) -> usize {
        info!(
            discipline = self.queue.discipline().as_str(),
            idle_strategy = ?self.idle_strategy,
            "Dispatch loop started"
        );

        let mut dispatched = 0;
        while !shutdown.is_cancelled() {
            if self.drain_one() {
                dispatched += 1;
                continue;
            }

            match self.idle_strategy {
                IdleStrategy::Spin => thread::yield_now(),
                IdleStrategy::Park => {
                    self.queue.wait_for_work(self.park_timeout);
                }
            }
        }

        info!(
            dispatched,
            pending = self.queue.len(),
            "Dispatch loop stopped"
        );
        dispatched
    }
}

impl<R: 'static> Dispatcher<R> {
    /// Start a dispatch loop on a dedicated thread. The runtime is built on
    /// that thread by `factory`, so it never has to be `Send`.
    pub fn spawn<F>(
        queue: Arc<WorkQueue<R>>,
        config: &DispatchConfig,
        factory: F,
        shutdown: CancellationToken,
    ) -> io::Result<JoinHandle<usize>>
    where
        F: FnOnce() -> R + Send + 'static,
    {
        let config = config.clone();
        thread::Builder::new()
            .name("dnsbridge-dispatch".to_string())
            .spawn(move || {
                debug!("Building script runtime on dispatch thread");
                let mut dispatcher = Dispatcher::new(queue, factory()).with_config(&config);
                dispatcher.run(&shutdown)
            })
    }
}
