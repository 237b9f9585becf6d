use cpfgen::{BaseDigits, Cpf};
use tokio::sync::mpsc;

/// A single pipeline worker: pulls base sequences until the job channel
/// closes, appends both check digits (the second computed over the sequence
/// including the first), and forwards the completed number to the sink.
///
/// Upstream closure is the normal stop signal, not an error. A failed result
/// send means the sink is gone - a fatal write error downstream - so the
/// worker stops pulling and exits, which in turn lets the producer observe
/// the closed job channel.
///
/// Returns the number of items processed.
pub async fn worker_loop(
    worker_id: usize,
    mut jobs: mpsc::Receiver<BaseDigits>,
    results: mpsc::Sender<Cpf>,
) -> u64 {
    tracing::trace!(worker_id, "worker started");

    let mut processed = 0u64;
    while let Some(base) = jobs.recv().await {
        tracing::trace!(worker_id, %base, "received base sequence");
        let cpf = base.complete();
        tracing::trace!(worker_id, %cpf, "generated");

        if results.send(cpf).await.is_err() {
            tracing::debug!(worker_id, "result channel closed; stopping");
            break;
        }
        processed += 1;
    }

    tracing::trace!(worker_id, processed, "worker stopped");
    processed
}
