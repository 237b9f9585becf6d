use clap::Parser;
use cpfgen::REGION_CODES;
use cpfgen_cli::cli::config::{CliArgs, Config};
use cpfgen_cli::cli::{pipeline, telemetry::init_telemetry};

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    if args.list {
        list_regions();
        return Ok(());
    }

    let config = Config::try_from(args)?;
    init_telemetry(config.verbose)?;
    log_startup_info(&config);

    let written = pipeline::run(config).await?;
    tracing::info!(written, "run complete");
    Ok(())
}

/// Prints the static table mapping each region digit to its state codes.
fn list_regions() {
    println!("List of Regions:");
    for (digit, codes) in REGION_CODES.iter().enumerate() {
        println!("\t{digit}\t{codes:?}");
    }
}

fn log_startup_info(config: &Config) {
    if config.sample_count > 0 {
        tracing::info!(
            count = config.sample_count,
            workers = config.workers,
            "sampling random CPF numbers"
        );
    } else {
        tracing::info!(
            regions = config.regions.len(),
            heuristic = config.heuristic,
            workers = config.workers,
            "enumerating all CPF numbers"
        );
    }
}
