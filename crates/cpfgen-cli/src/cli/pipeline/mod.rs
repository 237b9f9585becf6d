//! The concurrent generation pipeline.
//!
//! One producer task drains the configured enumerator into per-worker job
//! channels; W worker tasks append check digits; a single sink task
//! serializes completed numbers to the destination. All communication is
//! over bounded mpsc channels, never shared mutable state, and every stage
//! terminates on channel closure.
//!
//! ## Structure
//!
//! - [`producer`] - round-robin dispatch of base sequences to the pool.
//! - [`worker`] - per-worker completion loop.
//! - [`sink`] - fan-in serialization to stdout or a file.

pub mod producer;
pub mod sink;
pub mod worker;

use crate::cli::config::Config;
use anyhow::Context;
use cpfgen::{BaseDigits, Cpf, ExhaustiveBases, RandomBases};
use self::producer::WorkerPool;
use tokio::fs::File;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tokio::task;

/// Depth of each worker's job queue. The producer suspends when a queue is
/// full, which is the pipeline's backpressure mechanism.
const JOB_QUEUE_DEPTH: usize = 256;

/// Depth of the fan-in result queue feeding the sink.
const RESULT_QUEUE_DEPTH: usize = 1024;

/// Pipeline lifecycle, logged as the run progresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    /// The enumerator is producing and workers are consuming.
    Running,
    /// The enumerator is exhausted; workers are finishing in-flight items.
    Draining,
    /// Every worker has signalled completion and the sink has flushed.
    Done,
}

/// Runs the generation pipeline described by `config` and returns the number
/// of lines written.
///
/// Completion is coordinated purely through channel closure: the producer
/// finishing drops every job sender, each worker observes its channel close
/// and exits, and once the last worker drops its result sender the sink
/// drains, flushes and returns. The function waits for *all* workers (a
/// counted join barrier), never just the first to finish, so no in-flight
/// item can be discarded.
#[tracing::instrument(skip_all, fields(workers = config.workers))]
pub async fn run(config: Config) -> anyhow::Result<u64> {
    // Open the destination before any generation starts so a bad path is a
    // plain configuration error, not a mid-run failure.
    let writer: Box<dyn AsyncWrite + Send + Unpin> = match &config.output {
        Some(path) => {
            let file = File::create(path)
                .await
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(tokio::io::stdout()),
    };

    let (results_tx, results_rx) = mpsc::channel::<Cpf>(RESULT_QUEUE_DEPTH);
    let sink = tokio::spawn(sink::write_results(results_rx, config.format, writer));

    let mut job_senders = Vec::with_capacity(config.workers);
    let mut workers = Vec::with_capacity(config.workers);
    for worker_id in 0..config.workers {
        let (tx, rx) = mpsc::channel::<BaseDigits>(JOB_QUEUE_DEPTH);
        job_senders.push(tx);
        workers.push(tokio::spawn(worker::worker_loop(
            worker_id,
            rx,
            results_tx.clone(),
        )));
    }
    // From here on the workers hold the only result senders, so the sink
    // observes closure exactly when the last worker exits.
    drop(results_tx);

    let pool = WorkerPool::new(job_senders);
    let stream_config = config.clone();
    let producer = task::spawn_blocking(move || -> anyhow::Result<u64> {
        let bases = base_stream(&stream_config)?;
        producer::produce(bases, pool)
    });

    tracing::debug!(state = ?RunState::Running, "pipeline started");

    let produced = producer.await.context("producer task panicked")?;
    tracing::debug!(state = ?RunState::Draining, "enumerator task finished; draining workers");

    let processed: u64 = futures::future::join_all(workers)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .context("worker task panicked")?
        .into_iter()
        .sum();

    let written = sink.await.context("sink task panicked")?;

    // A sink failure is the root cause of any upstream send error, so report
    // it in preference to the producer's.
    let written = written?;
    let produced = produced?;

    tracing::debug!(
        state = ?RunState::Done,
        produced,
        processed,
        written,
        "pipeline complete"
    );
    Ok(written)
}

/// Builds the base-sequence stream for the configured mode. Random sampling
/// fills its uniqueness set eagerly, so this runs on the producer's blocking
/// thread.
fn base_stream(config: &Config) -> anyhow::Result<Box<dyn Iterator<Item = BaseDigits> + Send>> {
    if config.sample_count > 0 {
        let mut rng = rand::rng();
        let bases = RandomBases::new(&mut rng, &config.regions, config.sample_count)?;
        Ok(Box::new(bases))
    } else {
        Ok(Box::new(ExhaustiveBases::new(
            config.regions.clone(),
            config.heuristic,
        )))
    }
}
