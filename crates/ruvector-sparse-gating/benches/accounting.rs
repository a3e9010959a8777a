//! Benchmarks for storage and compute accounting.
//!
//! One evaluation of a mapping runs the storage accounting once per level and
//! the compute accounting once per unit, so these measure the per-level cost
//! as the number of data spaces grows.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ruvector_sparse_gating::{
    account_compute, account_storage, ComputeGating, ComputeInfo, DataMovement, DataSpaceGating,
    DataSpaceId, DataSpaceRegistry, FixedDensity, GatedAction, LevelGating,
};

// ---------------------------------------------------------------------------
// Helpers: deterministic random level generation
// ---------------------------------------------------------------------------

fn random_level(n: usize, seed: u64) -> (DataSpaceRegistry, Vec<DataMovement>, LevelGating) {
    let mut rng = StdRng::seed_from_u64(seed);
    let registry = DataSpaceRegistry::new((0..n).map(|i| format!("T{i}")));

    let movement = (0..n)
        .map(|_| {
            let density = FixedDensity::new(rng.gen_range(0.0..=1.0)).unwrap_or(FixedDensity::DENSE);
            DataMovement::new(
                rng.gen_range(0..1_000_000),
                rng.gen_range(0..1_000_000),
                rng.gen_range(0..1_000_000),
                Arc::new(density),
            )
        })
        .collect();

    // Every data space gated on itself and one neighbour.
    let mut level = LevelGating::new();
    for i in 0..n {
        let pair = [DataSpaceId(i), DataSpaceId((i + 1) % n)];
        level.insert(
            DataSpaceId(i),
            DataSpaceGating::new()
                .gated_by(GatedAction::Read, pair)
                .gated_by(GatedAction::Write, [DataSpaceId(i)])
                .gated_by(GatedAction::MetadataRead, pair),
        );
    }
    (registry, movement, level)
}

fn storage_accounting(c: &mut Criterion) {
    let mut group = c.benchmark_group("account_storage");
    group.warm_up_time(Duration::from_secs(1));

    for n in [3, 8, 32, 128] {
        let (registry, movement, level) = random_level(n, 42);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("gated", n), &n, |b, _| {
            let mut movement = movement.clone();
            b.iter(|| {
                account_storage(
                    criterion::black_box(&registry),
                    criterion::black_box(&mut movement),
                    criterion::black_box(&level),
                )
                .unwrap();
            });
        });
    }
    group.finish();
}

fn compute_accounting(c: &mut Criterion) {
    let (_, movement, _) = random_level(3, 7);
    let gating = ComputeGating::new().gated_by(GatedAction::Compute, [DataSpaceId(0), DataSpaceId(1)]);

    c.bench_function("account_compute", |b| {
        let mut compute = ComputeInfo::new(256, 1 << 20);
        b.iter(|| {
            account_compute(
                criterion::black_box(&mut compute),
                criterion::black_box(&gating),
                criterion::black_box(&movement),
            )
            .unwrap();
        });
    });
}

criterion_group!(accounting, storage_accounting, compute_accounting);
criterion_main!(accounting);
