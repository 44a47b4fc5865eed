//! Timed Fibonacci heap workload
//!
//! ```bash
//! cargo run --release --features cli --bin fibheap-bench -- --ops 10000,100000
//! RUST_LOG=fibonacci_forest=info cargo run --release --features cli --bin fibheap-bench
//! ```
//!
//! Reports go to stdout; logs go to stderr.

use anyhow::Context;
use clap::Parser;
use fibonacci_forest::workload::{
    run_experiment, ExperimentConfig, DEFAULT_MAX_KEY, DEFAULT_MAX_UNION_BATCH, DEFAULT_MIN_KEY,
    DEFAULT_OPS, DEFAULT_SEED,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fibheap-bench",
    about = "Times insert, get-min, extract-min and union on a Fibonacci heap",
    version
)]
struct Cli {
    /// Operations per phase; repeat or comma-separate to run several sizes
    #[arg(short = 'n', long = "ops", value_delimiter = ',', default_values_t = [DEFAULT_OPS])]
    ops: Vec<usize>,

    /// Seed for the key generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Smallest key drawn (inclusive)
    #[arg(long, default_value_t = DEFAULT_MIN_KEY, allow_negative_numbers = true)]
    min_key: i64,

    /// Largest key drawn (inclusive)
    #[arg(long, default_value_t = DEFAULT_MAX_KEY, allow_negative_numbers = true)]
    max_key: i64,

    /// Upper bound on the size of each heap built in the union phase
    #[arg(long, default_value_t = DEFAULT_MAX_UNION_BATCH)]
    max_union_batch: usize,
}

impl Cli {
    fn configs(&self) -> impl Iterator<Item = ExperimentConfig> + '_ {
        self.ops.iter().map(|&ops| ExperimentConfig {
            ops,
            seed: self.seed,
            min_key: self.min_key,
            max_key: self.max_key,
            max_union_batch: self.max_union_batch,
        })
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(?cli, "starting benchmark");

    for config in cli.configs() {
        let report = run_experiment(&config)
            .with_context(|| format!("invalid configuration for N = {}", config.ops))?;
        if !report.extracted_sorted {
            warn!(ops = config.ops, "extract-min returned keys out of order");
        }
        println!("{report}");
    }

    Ok(())
}
