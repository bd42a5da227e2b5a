use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Notify, Semaphore};
use tracing::trace;
use volley_core::RunConfig;

/// Execute a fixed batch of independent work units, at most `config.workers`
/// in flight at once, resolving only after every unit has signaled
/// completion.
///
/// Each unit holds a [`CompletionGuard`] for the whole of its execution, so
/// the barrier is released on every exit path, including a panicking unit.
/// Units run in no particular order and cannot be cancelled once submitted.
pub(crate) async fn run_units<T, F>(config: RunConfig, unit: T)
where
    T: Fn(u64) -> F + Send + Sync + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let total = config.requests.get();
    let barrier = Arc::new(CompletionBarrier::new(total));
    let pool = Arc::new(Semaphore::new(config.workers.get()));
    let unit = Arc::new(unit);

    for id in 0..total {
        let signal = barrier.guard();
        let pool = pool.clone();
        let unit = unit.clone();
        tokio::spawn(async move {
            // Dropped on every exit path out of this task.
            let _signal = signal;
            let _slot = pool
                .acquire()
                .await
                .expect("worker pool semaphore closed while units were pending");
            trace!(id, "unit start");
            unit(id).await;
        });
    }

    barrier.wait().await;
}

/// Releases the single waiting coordinator only after exactly `count`
/// completion signals have been received.
pub(crate) struct CompletionBarrier {
    remaining: AtomicU64,
    released: Notify,
}

impl CompletionBarrier {
    pub fn new(count: u64) -> Self {
        Self {
            remaining: AtomicU64::new(count),
            released: Notify::new(),
        }
    }

    /// A completion signal that fires when dropped.
    pub fn guard(self: &Arc<Self>) -> CompletionGuard {
        CompletionGuard {
            barrier: self.clone(),
        }
    }

    /// Suspend until the count reaches zero. Single waiter: the final signal
    /// stores a wake permit, so a signal landing before the waiter registers
    /// is not lost.
    pub async fn wait(&self) {
        while self.remaining.load(Ordering::Acquire) != 0 {
            self.released.notified().await;
        }
    }

    fn signal(&self) {
        if self.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.released.notify_one();
        }
    }
}

pub(crate) struct CompletionGuard {
    barrier: Arc<CompletionBarrier>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.barrier.signal();
    }
}
