//! End-to-end pipeline runs against real file destinations.

use cpfgen::{BaseDigits, CpfFormat, RegionSet, check_digit};
use cpfgen_cli::cli::config::Config;
use cpfgen_cli::cli::pipeline;
use std::collections::HashSet;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;

fn sample_config(count: u64, workers: usize, format: CpfFormat, output: PathBuf) -> Config {
    Config {
        regions: RegionSet::all(),
        heuristic: false,
        sample_count: count,
        format,
        output: Some(output),
        workers,
        verbose: false,
    }
}

fn assert_valid_digits(digits: &[u8]) {
    assert_eq!(digits.len(), 11);
    assert!(digits.iter().all(|&d| d <= 9));
    assert_eq!(digits[9], check_digit(&digits[..9]));
    assert_eq!(digits[10], check_digit(&digits[..10]));
}

#[tokio::test(flavor = "multi_thread")]
async fn drains_every_sampled_number_to_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let mut config = sample_config(1_000, 8, CpfFormat::Bare, path.clone());
    config.regions = RegionSet::new([8]).unwrap();

    let written = pipeline::run(config).await.unwrap();
    assert_eq!(written, 1_000);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1_000);

    let distinct: HashSet<&str> = lines.iter().copied().collect();
    assert_eq!(distinct.len(), 1_000, "duplicate numbers reached the sink");

    for line in lines {
        let digits: Vec<u8> = line.bytes().map(|b| b - b'0').collect();
        assert_valid_digits(&digits);
        assert_eq!(digits[8], 8, "region constraint violated: {line}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn worker_count_does_not_drop_or_duplicate_work() {
    for workers in [1, 4, 32] {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let config = sample_config(500, workers, CpfFormat::Bare, path.clone());
        let written = pipeline::run(config).await.unwrap();
        assert_eq!(written, 500, "workers = {workers}");

        let text = std::fs::read_to_string(&path).unwrap();
        let distinct: HashSet<&str> = text.lines().collect();
        assert_eq!(distinct.len(), 500, "workers = {workers}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn renders_dotted_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let config = sample_config(50, 4, CpfFormat::Dotted, path.clone());
    pipeline::run(config).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    for line in text.lines() {
        assert_eq!(line.len(), 14);
        let bytes = line.as_bytes();
        assert_eq!(bytes[3], b'.');
        assert_eq!(bytes[7], b'.');
        assert_eq!(bytes[11], b'-');

        let digits: Vec<u8> = line
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        assert_valid_digits(&digits);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn renders_dashed_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let config = sample_config(50, 4, CpfFormat::Dashed, path.clone());
    pipeline::run(config).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    for line in text.lines() {
        assert_eq!(line.len(), 12);
        assert_eq!(line.as_bytes()[9], b'-');

        let digits: Vec<u8> = line
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        assert_valid_digits(&digits);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn truncates_a_preexisting_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    std::fs::write(&path, "stale contents\n").unwrap();

    let config = sample_config(10, 2, CpfFormat::Bare, path.clone());
    pipeline::run(config).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 10);
    assert!(!text.contains("stale"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unopenable_destination_fails_before_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.txt");

    let config = sample_config(10, 2, CpfFormat::Bare, path);
    let err = pipeline::run(config).await.unwrap_err();
    assert!(err.to_string().contains("failed to create output file"));
}

/// Writer whose every write fails, standing in for a destination that goes
/// bad mid-run (disk full, closed pipe).
struct FailingWriter;

impl AsyncWrite for FailingWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut TaskContext<'_>,
        _buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        Poll::Ready(Err(std::io::Error::other("disk full")))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn sink_surfaces_write_errors_mid_run() {
    let (tx, rx) = mpsc::channel(16);
    let sink = tokio::spawn(pipeline::sink::write_results(
        rx,
        CpfFormat::Bare,
        FailingWriter,
    ));

    // The sink buffers internally, so keep feeding until it bails out and
    // drops its receiver; the failed send proves upstream backpressure stops.
    let cpf = BaseDigits::new([1, 1, 1, 2, 2, 2, 3, 3, 3]).complete();
    let mut rejected = false;
    for _ in 0..10_000 {
        if tx.send(cpf).await.is_err() {
            rejected = true;
            break;
        }
    }
    drop(tx);
    assert!(rejected, "sink kept accepting input after the writer failed");

    let err = sink.await.unwrap().unwrap_err();
    assert!(err.to_string().contains("failed to write result"));
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_sample_counts_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let mut config = sample_config(100_000_001, 2, CpfFormat::Bare, path);
    config.regions = RegionSet::new([1]).unwrap();

    let err = pipeline::run(config).await.unwrap_err();
    assert!(err.to_string().contains("exceeds"));
}
