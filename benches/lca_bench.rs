//! Performance benchmarks for preprocessing and query folding.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use taxlca::{LcaEngine, TreeBuilder};

/// Deterministic tree shaped like a real taxonomy: a long trunk with
/// branchy subtrees hanging off it. `seed`-free so runs are comparable.
fn build_tree(n: usize) -> TreeBuilder<u32> {
    let mut builder = TreeBuilder::new();
    for v in 1..n as u32 {
        // Mix of deep chains and wide fans without a RNG dependency.
        let parent = match v % 3 {
            0 => v - 1,
            1 => v / 2,
            _ => v / 4,
        };
        builder.add_edge(&parent, &v).unwrap();
    }
    builder
}

fn benchmark_preprocessing(c: &mut Criterion) {
    c.bench_function("build_engine_n=100000", |b| {
        b.iter(|| {
            let engine = LcaEngine::build(build_tree(100_000)).unwrap();
            black_box(engine.tour_len());
        });
    });
}

fn benchmark_pairwise_queries(c: &mut Criterion) {
    let engine = LcaEngine::build(build_tree(100_000)).unwrap();

    c.bench_function("lca_pairwise_n=100000", |b| {
        let mut u = 1u32;
        b.iter(|| {
            u = u % 99_990 + 7;
            black_box(engine.lca(&u, &(u * 3 % 99_991)).unwrap());
        });
    });
}

fn benchmark_fold(c: &mut Criterion) {
    let engine = LcaEngine::build(build_tree(100_000)).unwrap();
    let group: Vec<u32> = (0..64).map(|i| (i * 1_543 + 11) % 99_991).collect();

    c.bench_function("fold_lca_k=64", |b| {
        b.iter(|| {
            black_box(engine.fold_lca(&group).unwrap());
        });
    });
}

criterion_group!(
    benches,
    benchmark_preprocessing,
    benchmark_pairwise_queries,
    benchmark_fold
);
criterion_main!(benches);
