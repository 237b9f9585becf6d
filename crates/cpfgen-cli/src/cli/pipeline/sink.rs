use anyhow::Context;
use cpfgen::{Cpf, CpfFormat};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;

/// Fan-in sink: receives completed numbers from every worker and serializes
/// them to the single destination, one newline-terminated line each.
///
/// Arrival order is whatever interleaving the workers produce; no reordering
/// is attempted. The writer is held for the whole run and flushed once after
/// the channel closes. Any write failure is fatal and returned immediately -
/// no retry, no partial-result recovery.
///
/// Returns the number of lines written.
pub async fn write_results<W>(
    mut results: mpsc::Receiver<Cpf>,
    format: CpfFormat,
    writer: W,
) -> anyhow::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut out = BufWriter::new(writer);
    let mut written = 0u64;

    while let Some(cpf) = results.recv().await {
        let mut line = cpf.render(format);
        line.push('\n');
        out.write_all(line.as_bytes())
            .await
            .context("failed to write result")?;
        written += 1;
    }

    out.flush().await.context("failed to flush output")?;
    tracing::debug!(written, "sink flushed");
    Ok(written)
}
