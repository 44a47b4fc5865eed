//! Seeded benchmark workload
//!
//! Reproduces the classic Fibonacci heap experiment: draw `ops` uniform keys
//! from a seeded generator and time four phases over one heap:
//!
//! 1. `ops` inserts
//! 2. `ops` get-min queries
//! 3. `ops` extract-min calls (draining the heap)
//! 4. `ops` rounds of building two small random heaps in the same forest and
//!    unioning both into the main heap
//!
//! The same seed always yields the same keys, batch sizes and final heap, so
//! timings from different runs are comparable.

use crate::forest::FibonacciForest;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_OPS: usize = 100_000;
pub const DEFAULT_SEED: u64 = 123_456_789;
pub const DEFAULT_MIN_KEY: i64 = 1;
pub const DEFAULT_MAX_KEY: i64 = 1_000_000;
pub const DEFAULT_MAX_UNION_BATCH: usize = 100;

/// Parameters of one experiment run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentConfig {
    /// Operations per phase
    pub ops: usize,
    pub seed: u64,
    /// Smallest key drawn (inclusive)
    pub min_key: i64,
    /// Largest key drawn (inclusive)
    pub max_key: i64,
    /// Upper bound on the size of each heap built during the union phase
    pub max_union_batch: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            ops: DEFAULT_OPS,
            seed: DEFAULT_SEED,
            min_key: DEFAULT_MIN_KEY,
            max_key: DEFAULT_MAX_KEY,
            max_union_batch: DEFAULT_MAX_UNION_BATCH,
        }
    }
}

/// Rejected experiment configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("key range is empty: min key {min} is greater than max key {max}")]
    EmptyKeyRange { min: i64, max: i64 },
    #[error("union batches need room for at least one node")]
    ZeroUnionBatch,
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_key > self.max_key {
            return Err(ConfigError::EmptyKeyRange {
                min: self.min_key,
                max: self.max_key,
            });
        }
        if self.max_union_batch == 0 {
            return Err(ConfigError::ZeroUnionBatch);
        }
        Ok(())
    }
}

/// Timings and outcome of one experiment run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentReport {
    pub ops: usize,
    pub insert: Duration,
    pub get_min: Duration,
    pub extract_min: Duration,
    pub union: Duration,
    /// Whether the extract-min phase produced a non-decreasing sequence
    pub extracted_sorted: bool,
    /// Nodes inserted into the temporary heaps of the union phase
    pub union_nodes: usize,
    /// Size of the main heap after the union phase
    pub final_len: usize,
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "N = {}", self.ops)?;
        writeln!(f, "Insert time: {} microseconds", self.insert.as_micros())?;
        writeln!(f, "Get-min time: {} microseconds", self.get_min.as_micros())?;
        writeln!(
            f,
            "Extract-min time: {} microseconds",
            self.extract_min.as_micros()
        )?;
        writeln!(
            f,
            "Union time: {} microseconds ({} nodes merged)",
            self.union.as_micros(),
            self.union_nodes
        )?;
        write!(f, "----------------------------------")
    }
}

/// Runs the four timed phases described in the module docs
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport, ConfigError> {
    config.validate()?;

    let ops = config.ops;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let keys = Uniform::new_inclusive(config.min_key, config.max_key);
    let mut forest: FibonacciForest<(), i64> = FibonacciForest::with_capacity(ops);
    let mut heap = forest.new_heap();

    let start = Instant::now();
    for _ in 0..ops {
        forest.insert(&mut heap, keys.sample(&mut rng), ());
    }
    let insert = start.elapsed();
    info!(ops, elapsed_us = insert.as_micros() as u64, "insert phase");

    let start = Instant::now();
    for _ in 0..ops {
        black_box(forest.peek(&heap));
    }
    let get_min = start.elapsed();
    info!(ops, elapsed_us = get_min.as_micros() as u64, "get-min phase");

    let start = Instant::now();
    let mut extracted_sorted = true;
    let mut last = None;
    for _ in 0..ops {
        if let Some((key, ())) = forest.extract_min(&mut heap) {
            if last.is_some_and(|prev| key < prev) {
                extracted_sorted = false;
            }
            last = Some(key);
        }
    }
    let extract_min = start.elapsed();
    info!(
        ops,
        elapsed_us = extract_min.as_micros() as u64,
        extracted_sorted,
        "extract-min phase"
    );

    let start = Instant::now();
    let mut union_nodes = 0usize;
    for _ in 0..ops {
        let sizes = [
            rng.gen_range(1..=config.max_union_batch),
            rng.gen_range(1..=config.max_union_batch),
        ];
        for size in sizes {
            let mut batch = forest.new_heap();
            for _ in 0..size {
                forest.insert(&mut batch, keys.sample(&mut rng), ());
            }
            heap = forest.union(heap, batch);
            union_nodes += size;
        }
    }
    let union = start.elapsed();
    info!(
        ops,
        elapsed_us = union.as_micros() as u64,
        union_nodes,
        "union phase"
    );

    let final_len = heap.len();
    forest.clear(&mut heap);

    Ok(ExperimentReport {
        ops,
        insert,
        get_min,
        extract_min,
        union,
        extracted_sorted,
        union_nodes,
        final_len,
    })
}
