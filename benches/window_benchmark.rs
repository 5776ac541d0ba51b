//! Window resolution and measurement benchmarks.
//!
//! Window resolution runs once per scroll frame and must stay logarithmic in the row
//! count; a measurement report shifts every later unmeasured row, so its cost grows with
//! the distance from the end of the list.
//!
//! Run with: cargo bench --bench window_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rowcache::cache::{CacheId, PositionCache, RemeasurePolicy};
use rowcache::window::{resolve_window, WindowRequest};

const SIZES: [usize; 3] = [1_000, 100_000, 1_000_000];
const ESTIMATE: f64 = 40.0;
const VIEWPORT: f64 = 900.0;

fn cache_of(length: usize) -> PositionCache {
    PositionCache::new(length, ESTIMATE, CacheId::new("bench"), RemeasurePolicy::Once)
        .expect("non-empty cache")
}

fn bench_resolve_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_window");

    for length in SIZES {
        let cache = cache_of(length);
        let middle = cache.total_height() / 2.0;

        group.bench_with_input(BenchmarkId::new("middle", length), &length, |b, &length| {
            let request = WindowRequest::new(middle, Some(VIEWPORT), length);
            b.iter(|| resolve_window(black_box(&cache), black_box(&request)))
        });

        group.bench_with_input(BenchmarkId::new("nested", length), &length, |b, &length| {
            let request =
                WindowRequest::new(middle, Some(VIEWPORT), length).with_parent_offset(5_000.0);
            b.iter(|| resolve_window(black_box(&cache), black_box(&request)))
        });
    }

    group.finish();
}

fn bench_update_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_cache");

    for length in SIZES {
        // Moving the first row shifts every other row.
        group.bench_with_input(BenchmarkId::new("first_row", length), &length, |b, &length| {
            b.iter_batched(
                || cache_of(length),
                |mut cache| cache.update_cache(0, ESTIMATE * 0.5, ESTIMATE),
                BatchSize::LargeInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("last_row", length), &length, |b, &length| {
            b.iter_batched(
                || cache_of(length),
                |mut cache| {
                    let last = length - 1;
                    cache.update_cache(last, last as f64 * ESTIMATE, ESTIMATE * 1.5)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("resize_append_1000", |b| {
        b.iter_batched(
            || cache_of(100_000),
            |mut cache| cache.resize(101_000, None),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_resolve_window, bench_update_cache, bench_append);
criterion_main!(benches);
