use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the stderr tracing subscriber for the run.
///
/// `RUST_LOG` takes precedence when set. Otherwise the filter defaults to
/// `info`, widened to `trace` for the cpfgen crates under `--verbose` so the
/// per-item worker lines become visible. Diagnostics always go to stderr;
/// stdout is reserved for generated numbers.
pub fn init_telemetry(verbose: bool) -> anyhow::Result<()> {
    let default_directives = if verbose {
        "info,cpfgen=trace,cpfgen_cli=trace"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
