use anyhow::anyhow;
use cpfgen::BaseDigits;
use tokio::sync::mpsc;

/// Round-robin dispatcher over the per-worker job channels.
///
/// Owned by the single producer task, so a plain index is enough for the
/// rotation. Dropping the pool closes every job channel, which is the
/// workers' normal termination signal.
pub struct WorkerPool {
    workers: Vec<mpsc::Sender<BaseDigits>>,
    next_worker: usize,
}

impl WorkerPool {
    #[must_use]
    pub fn new(workers: Vec<mpsc::Sender<BaseDigits>>) -> Self {
        debug_assert!(!workers.is_empty());
        Self {
            workers,
            next_worker: 0,
        }
    }

    /// Blocking send to the next worker in line. Suspends while that
    /// worker's queue is full and fails only when the worker is gone, which
    /// means the run is already tearing down.
    fn dispatch(&mut self, base: BaseDigits) -> anyhow::Result<()> {
        let worker_idx = self.next_worker;
        self.next_worker = (self.next_worker + 1) % self.workers.len();
        self.workers[worker_idx]
            .blocking_send(base)
            .map_err(|_| anyhow!("worker {worker_idx} channel closed"))
    }
}

/// Drains the enumerator into the pool. Runs on a blocking thread and
/// returns the number of base sequences emitted.
pub fn produce(
    bases: impl Iterator<Item = BaseDigits>,
    mut pool: WorkerPool,
) -> anyhow::Result<u64> {
    let mut emitted = 0u64;
    for base in bases {
        pool.dispatch(base)?;
        emitted += 1;
    }
    tracing::debug!(emitted, "enumeration complete");
    Ok(emitted)
}
