//! Benchmark tests for grid reflow.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fling_core::Size;
use fling_layout::{layout, AvailableExtent, GridItem, GridLayout, GridLayoutConfig};

fn items(n: usize) -> Vec<GridItem> {
    (0..n)
        .map(|i| GridItem::new(20.0 + (i % 7) as f32 * 6.0, 16.0 + (i % 5) as f32 * 4.0))
        .collect()
}

fn bench_layout_100_items(c: &mut Criterion) {
    let items = items(100);
    let config = GridLayoutConfig::default().with_gap(4.0, 4.0);

    c.bench_function("grid_layout_100_items", |b| {
        b.iter(|| layout(black_box(&items), black_box(AvailableExtent::width(400.0)), &config))
    });
}

fn bench_layout_1000_items(c: &mut Criterion) {
    let items = items(1000);
    let config = GridLayoutConfig::default().with_gap(4.0, 4.0);

    c.bench_function("grid_layout_1000_items", |b| {
        b.iter(|| layout(black_box(&items), black_box(AvailableExtent::width(800.0)), &config))
    });
}

fn bench_layout_homogeneous_end_aligned(c: &mut Criterion) {
    let items = items(1000);
    let config = GridLayoutConfig::default()
        .with_homogeneous_rows(true)
        .with_homogeneous_columns(true)
        .with_end_align(true)
        .with_align(0.5, 0.5)
        .with_gap(4.0, 4.0);

    c.bench_function("grid_layout_1000_homogeneous_end_aligned", |b| {
        b.iter(|| layout(black_box(&items), black_box(AvailableExtent::width(800.0)), &config))
    });
}

fn bench_layout_column_major(c: &mut Criterion) {
    let items = items(1000);
    let config = GridLayoutConfig::default()
        .with_column_major(true)
        .with_gap(4.0, 4.0);

    c.bench_function("grid_layout_1000_column_major", |b| {
        b.iter(|| layout(black_box(&items), black_box(AvailableExtent::height(600.0)), &config))
    });
}

fn bench_measure_cached(c: &mut Criterion) {
    let mut grid = GridLayout::new(GridLayoutConfig::default().with_gap(4.0, 4.0));
    grid.set_items(items(1000));

    c.bench_function("grid_measure_cached", |b| {
        b.iter(|| grid.measure(black_box(AvailableExtent::width(800.0))))
    });
}

fn bench_place(c: &mut Criterion) {
    let mut grid = GridLayout::new(GridLayoutConfig::default().with_gap(4.0, 4.0));
    grid.set_items(items(1000));

    c.bench_function("grid_place_1000", |b| {
        b.iter(|| grid.place(black_box(Size::new(800.0, 600.0))))
    });
}

criterion_group!(
    benches,
    bench_layout_100_items,
    bench_layout_1000_items,
    bench_layout_homogeneous_end_aligned,
    bench_layout_column_major,
    bench_measure_cached,
    bench_place,
);
criterion_main!(benches);
