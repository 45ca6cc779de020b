// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for catalog operations.
//!
//! Measures the performance of:
//! - Category derivation over a large photo list
//! - Subset filtering for one category
//! - Wraparound navigation across a full cycle

use criterion::{criterion_group, criterion_main, Criterion};
use iced_gallery::catalog::{self, Photo};
use std::hint::black_box;

/// Builds a synthetic photo list spread over a handful of categories.
fn synthetic_photos(count: usize) -> Vec<Photo> {
    let categories = ["travel", "family", "food", "street", "misc"];
    (0..count)
        .map(|i| {
            let category = categories[i % categories.len()];
            Photo::new(
                format!("photos/{category}/{i}.jpg"),
                category,
                format!("{i}.jpg"),
            )
        })
        .collect()
}

fn bench_build_categories(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");
    let photos = synthetic_photos(10_000);

    group.bench_function("build_categories", |b| {
        b.iter(|| black_box(catalog::build_categories(black_box(&photos))));
    });

    group.finish();
}

fn bench_visible_photos(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");
    let photos = synthetic_photos(10_000);

    group.bench_function("visible_photos", |b| {
        b.iter(|| black_box(catalog::visible_photos(black_box(&photos), "travel")));
    });

    group.finish();
}

fn bench_navigation_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");
    let photos = synthetic_photos(10_000);
    let subset = catalog::visible_photos(&photos, "travel");

    group.bench_function("full_wraparound_cycle", |b| {
        b.iter(|| {
            let mut index = 0usize;
            for _ in 0..subset.len() {
                index = catalog::next_index(index, subset.len());
            }
            black_box(index)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_build_categories,
    bench_visible_photos,
    bench_navigation_cycle
);
criterion_main!(benches);
