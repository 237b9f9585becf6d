use anyhow::Context;
use clap::Parser;
use cpfgen::{CpfFormat, RegionSet};
use core::num::NonZeroUsize;
use std::path::PathBuf;

/// Matches the original tool's default of 20 consumer threads.
const DEFAULT_WORKERS: usize = 20;

/// Raw command-line surface. All fallible interpretation lives in
/// [`Config::try_from`].
#[derive(Parser, Debug)]
#[command(name = "cpfgen", version, about = "Generate valid CPF numbers")]
pub struct CliArgs {
    /// List regions and their state codes, then exit
    #[arg(short, long)]
    pub list: bool,

    /// Comma-separated list of allowed region digits
    #[arg(
        short,
        long,
        env = "CPFGEN_REGIONS",
        default_value = "0,1,2,3,4,5,6,7,8,9"
    )]
    pub regions: String,

    /// Prune base sequences with heavily repeated digits
    #[arg(short = 'e', long)]
    pub heuristic: bool,

    /// Generate this many unique random numbers instead of the full
    /// enumeration (0 selects exhaustive mode)
    #[arg(short = 'n', long = "count", default_value_t = 0)]
    pub count: u64,

    /// Output format (1: 11122233396, 2: 111.222.333-96, 3: 111222333-96)
    #[arg(short, long, env = "CPFGEN_FORMAT", default_value_t = 1)]
    pub format: u8,

    /// Write results to this file (created/truncated) instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(short, long, env = "CPFGEN_WORKERS", default_value_t = NonZeroUsize::new(DEFAULT_WORKERS).unwrap())]
    pub workers: NonZeroUsize,

    /// Emit a trace line per base sequence received and per number generated
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated run configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub regions: RegionSet,
    pub heuristic: bool,
    /// `0` = exhaustive mode, `>0` = random mode with this many outputs.
    pub sample_count: u64,
    pub format: CpfFormat,
    /// `None` writes to stdout.
    pub output: Option<PathBuf>,
    pub workers: usize,
    pub verbose: bool,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> anyhow::Result<Self> {
        let digits = args
            .regions
            .split(',')
            .map(|token| {
                token
                    .trim()
                    .parse::<u8>()
                    .with_context(|| format!("invalid region digit {token:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        let regions = RegionSet::new(digits)?;
        let format = CpfFormat::try_from(args.format)?;

        Ok(Self {
            regions,
            heuristic: args.heuristic,
            sample_count: args.count,
            format,
            output: args.output,
            workers: args.workers.get(),
            verbose: args.verbose,
        })
    }
}
