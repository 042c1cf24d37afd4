use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sc_core::{kendall, multi_source_correlation, pearson, spearman, MultiSourceConfig};

fn make_series(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|i| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let frac = (state >> 33) as f64 / (1u64 << 31) as f64;
            10.0 + (i as f64 * 0.1).sin() + frac
        })
        .collect()
}

fn bench_pearson(c: &mut Criterion) {
    let xs = make_series(300, 1);
    let ys = make_series(300, 2);
    c.bench_function("pearson_300", |b| {
        b.iter(|| pearson(black_box(&xs), black_box(&ys)).unwrap())
    });
}

fn bench_spearman(c: &mut Criterion) {
    let xs = make_series(300, 3);
    let ys = make_series(300, 4);
    c.bench_function("spearman_300", |b| {
        b.iter(|| spearman(black_box(&xs), black_box(&ys)).unwrap())
    });
}

fn bench_kendall(c: &mut Criterion) {
    let xs = make_series(300, 5);
    let ys = make_series(300, 6);
    c.bench_function("kendall_300", |b| {
        b.iter(|| kendall(black_box(&xs), black_box(&ys)).unwrap())
    });
}

fn bench_multi_source(c: &mut Criterion) {
    let xs = make_series(200, 7);
    let ys = make_series(200, 8);
    let config = MultiSourceConfig::default();
    c.bench_function("multi_source_lag_search_200", |b| {
        b.iter(|| multi_source_correlation("a", "b", black_box(&xs), black_box(&ys), &config))
    });
}

criterion_group!(
    benches,
    bench_pearson,
    bench_spearman,
    bench_kendall,
    bench_multi_source
);
criterion_main!(benches);
