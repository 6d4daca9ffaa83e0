//! Criterion micro-benchmarks for column reads and writes.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mzcol_bench::{feature_list_profile, REFERENCE_ROWS};

/// Benchmark: Read every m/z value of a 10K-row list.
fn bench_scalar_get_10k(c: &mut Criterion) {
    let list = feature_list_profile(42).unwrap();
    c.bench_function("scalar_get_10k", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..REFERENCE_ROWS {
                sum += list.mz.get(i).unwrap().unwrap_or(0.0);
            }
            black_box(sum)
        });
    });
}

/// Benchmark: Overwrite every m/z value, decoding the previous one.
fn bench_scalar_set_10k(c: &mut Criterion) {
    let mut list = feature_list_profile(42).unwrap();
    c.bench_function("scalar_set_10k", |b| {
        b.iter(|| {
            for i in 0..REFERENCE_ROWS {
                black_box(list.mz.set(i, Some(i as f64)).unwrap());
            }
        });
    });
}

/// Benchmark: Resolve every charge symbol through the universe.
fn bench_symbol_get_10k(c: &mut Criterion) {
    let list = feature_list_profile(42).unwrap();
    c.bench_function("symbol_get_10k", |b| {
        b.iter(|| {
            for i in 0..REFERENCE_ROWS {
                black_box(list.charge.get(i).unwrap());
            }
        });
    });
}

/// Benchmark: Decode every 40-byte alignment record.
fn bench_record_get_10k(c: &mut Criterion) {
    let list = feature_list_profile(42).unwrap();
    c.bench_function("record_get_10k", |b| {
        b.iter(|| {
            for i in 0..REFERENCE_ROWS {
                black_box(list.scores.get(i).unwrap());
            }
        });
    });
}

/// Benchmark: Read one named sub-field of every record.
fn bench_record_get_field_10k(c: &mut Criterion) {
    let list = feature_list_profile(42).unwrap();
    c.bench_function("record_get_field_10k", |b| {
        b.iter(|| {
            let mut total = 0i64;
            for i in 0..REFERENCE_ROWS {
                total += i64::from(list.scores.get_field::<i32>(i, "aligned_features").unwrap());
            }
            black_box(total)
        });
    });
}

/// Benchmark: Read every retention-time window.
fn bench_interval_get_10k(c: &mut Criterion) {
    let list = feature_list_profile(42).unwrap();
    c.bench_function("interval_get_10k", |b| {
        b.iter(|| {
            for i in 0..REFERENCE_ROWS {
                black_box(list.rt_range.get(i).unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_scalar_get_10k,
    bench_scalar_set_10k,
    bench_symbol_get_10k,
    bench_record_get_10k,
    bench_record_get_field_10k,
    bench_interval_get_10k
);
criterion_main!(benches);
