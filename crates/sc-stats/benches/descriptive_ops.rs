use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sc_stats::{extended_statistics, ranks};

/// Deterministic pseudo-random series via an LCG.
fn make_series(n: usize) -> Vec<f64> {
    let mut state = 12345u64;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as f64 / (1u64 << 31) as f64
        })
        .collect()
}

fn bench_extended_statistics(c: &mut Criterion) {
    let xs = make_series(1000);
    c.bench_function("extended_statistics_1000", |b| {
        b.iter(|| extended_statistics(black_box(&xs)).unwrap())
    });
}

fn bench_ranks(c: &mut Criterion) {
    let xs = make_series(1000);
    c.bench_function("ranks_1000", |b| b.iter(|| ranks(black_box(&xs)).unwrap()));
}

criterion_group!(benches, bench_extended_statistics, bench_ranks);
criterion_main!(benches);
