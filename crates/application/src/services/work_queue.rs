use super::dispatcher::ScriptHandle;
use dnsbridge_domain::config::QueueDiscipline;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Deferred callback run on the dispatch thread against the script handle.
pub type Job<R> = Box<dyn FnOnce(&mut ScriptHandle<R>) + Send + 'static>;

/// Hand-off point between worker threads and the single dispatch thread.
///
/// The lock is held only to push or pop a job, never while one runs.
pub struct WorkQueue<R> {
    jobs: Mutex<VecDeque<Job<R>>>,
    ready: Condvar,
    discipline: QueueDiscipline,
}

impl<R> WorkQueue<R> {
    pub fn new(discipline: QueueDiscipline) -> Self {
        Self {
            jobs: Mutex::new(VecDeque::new()),
            ready: Condvar::new(),
            discipline,
        }
    }

    pub fn discipline(&self) -> QueueDiscipline {
        self.discipline
    }

    /// Append a job. Safe to call from any thread.
    pub fn enqueue<F>(&self, job: F)
    where
        F: FnOnce(&mut ScriptHandle<R>) + Send + 'static,
    {
        self.lock().push_back(Box::new(job));
        self.ready.notify_one();
    }

    /// Remove the next job without waiting.
    pub(crate) fn pop(&self) -> Option<Job<R>> {
        let mut jobs = self.lock();
        match self.discipline {
            QueueDiscipline::Lifo => jobs.pop_back(),
            QueueDiscipline::Fifo => jobs.pop_front(),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Block until the queue is non-empty or `timeout` elapses.
    /// Returns whether work is available.
    pub fn wait_for_work(&self, timeout: Duration) -> bool {
        let jobs = self.lock();
        if !jobs.is_empty() {
            return true;
        }

        let (jobs, _) = self
            .ready
            .wait_timeout(jobs, timeout)
            .unwrap_or_else(PoisonError::into_inner);
        !jobs.is_empty()
    }

    // A job never runs under the lock, so a poisoned mutex still guards a
    // consistent deque.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Job<R>>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R> Default for WorkQueue<R> {
    fn default() -> Self {
        Self::new(QueueDiscipline::default())
    }
}
