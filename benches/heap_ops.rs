//! Fibonacci Heap Operation Benchmarks
//!
//! Measures each heap operation in isolation across input sizes, using the
//! same seeded uniform keys as the `fibheap-bench` workload.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_ops
//! cargo bench --bench heap_ops -- union
//! ```
//!
//! ## Groups
//!
//! - `insert`: n inserts into a fresh forest
//! - `extract_min`: draining a heap of n elements
//! - `decrease_key`: n decreases after one consolidating extract
//! - `union`: folding n small heaps into one, as the workload's union phase does

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use fibonacci_forest::fibonacci::FibonacciHeap;
use fibonacci_forest::forest::{FibonacciForest, HeapRoot};
use fibonacci_forest::workload::{DEFAULT_MAX_KEY, DEFAULT_MIN_KEY, DEFAULT_SEED};
use fibonacci_forest::{DecreaseKeyHeap, Heap};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn random_keys(n: usize) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
    let keys = Uniform::new_inclusive(DEFAULT_MIN_KEY, DEFAULT_MAX_KEY);
    (0..n).map(|_| keys.sample(&mut rng)).collect()
}

fn filled_forest(keys: &[i64]) -> (FibonacciForest<(), i64>, HeapRoot) {
    let mut forest = FibonacciForest::with_capacity(keys.len());
    let mut heap = forest.new_heap();
    for &k in keys {
        forest.insert(&mut heap, k, ());
    }
    (forest, heap)
}

fn benchmark_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for &n in &SIZES {
        let keys = random_keys(n);
        group.bench_with_input(BenchmarkId::new("forest", n), &keys, |b, keys| {
            b.iter(|| black_box(filled_forest(keys)));
        });
    }

    group.finish();
}

fn benchmark_extract_min(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_min");
    group.sample_size(20);

    for &n in &SIZES {
        let keys = random_keys(n);
        group.bench_with_input(BenchmarkId::new("drain", n), &keys, |b, keys| {
            b.iter_batched(
                || filled_forest(keys),
                |(mut forest, mut heap)| {
                    while let Some(entry) = forest.extract_min(&mut heap) {
                        black_box(entry);
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn benchmark_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key");
    group.sample_size(20);

    for &n in &SIZES {
        let keys = random_keys(n);
        group.bench_with_input(BenchmarkId::new("all", n), &keys, |b, keys| {
            b.iter_batched(
                || {
                    let mut heap = FibonacciHeap::with_capacity(keys.len() + 1);
                    heap.push(i64::MIN, usize::MAX);
                    let handles: Vec<_> = keys
                        .iter()
                        .enumerate()
                        .map(|(i, &k)| heap.push_with_handle(k, i))
                        .collect();
                    // Build real trees so that decreases cut and cascade
                    heap.pop();
                    (heap, handles)
                },
                |(mut heap, handles)| {
                    for (handle, &k) in handles.iter().zip(keys) {
                        let _ = heap.decrease_key(handle, k - DEFAULT_MAX_KEY);
                    }
                    black_box(heap.peek().map(|(p, _)| *p));
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn benchmark_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("union");
    group.sample_size(20);

    for &rounds in &[100usize, 1_000, 10_000] {
        // Batch sizes and keys are drawn up front; only the fold is timed
        let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
        let keys = Uniform::new_inclusive(DEFAULT_MIN_KEY, DEFAULT_MAX_KEY);
        let batches: Vec<Vec<i64>> = (0..rounds)
            .map(|_| {
                let size = rng.gen_range(1..=100);
                (0..size).map(|_| keys.sample(&mut rng)).collect()
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("forest", rounds), &batches, |b, batches| {
            b.iter_batched(
                || {
                    let mut forest = FibonacciForest::new();
                    let heaps: Vec<_> = batches
                        .iter()
                        .map(|batch| {
                            let mut heap = forest.new_heap();
                            for &k in batch {
                                forest.insert(&mut heap, k, ());
                            }
                            heap
                        })
                        .collect();
                    (forest, heaps)
                },
                |(mut forest, heaps)| {
                    let mut acc = forest.new_heap();
                    for heap in heaps {
                        acc = forest.union(acc, heap);
                    }
                    black_box(forest.peek(&acc).map(|(p, _)| *p));
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("facade_merge", rounds), &batches, |b, batches| {
            b.iter_batched(
                || {
                    batches
                        .iter()
                        .map(|batch| {
                            let mut heap = FibonacciHeap::new();
                            for &k in batch {
                                heap.push(k, ());
                            }
                            heap
                        })
                        .collect::<Vec<_>>()
                },
                |heaps| {
                    let mut acc = FibonacciHeap::new();
                    for heap in heaps {
                        acc.merge(heap);
                    }
                    black_box(acc.len());
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_extract_min,
    benchmark_decrease_key,
    benchmark_union,
);

criterion_main!(benches);
