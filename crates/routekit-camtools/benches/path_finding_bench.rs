//! Path finding and route ordering benchmarks
//!
//! Run with: cargo bench -p routekit-camtools

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use routekit_camtools::path_finding::{unlimited, PathFindingSurface, VisibilityCache};
use routekit_camtools::tsp::{reorder, OrderingStrategy};
use routekit_core::{MultiPolygon, Point, Polygon};

/// A board with a grid of square pads, like a row of IC footprints.
fn pad_grid(columns: usize, rows: usize) -> (MultiPolygon, MultiPolygon) {
    let width = columns as f64 * 10.0;
    let height = rows as f64 * 10.0;
    let keep_in: MultiPolygon =
        vec![Polygon::rectangle(Point::new(0.0, 0.0), Point::new(width, height))].into();
    let keep_out: MultiPolygon = (0..columns)
        .flat_map(|i| (0..rows).map(move |j| (i, j)))
        .map(|(i, j)| {
            let x = i as f64 * 10.0 + 3.0;
            let y = j as f64 * 10.0 + 3.0;
            Polygon::rectangle(Point::new(x, y), Point::new(x + 4.0, y + 4.0))
        })
        .collect();
    (keep_in, keep_out)
}

fn bench_surface(c: &mut Criterion) {
    let (keep_in, keep_out) = pad_grid(8, 8);
    c.bench_function("surface_new_8x8", |b| {
        b.iter(|| PathFindingSurface::new(Some(black_box(&keep_in)), black_box(&keep_out), 0.01))
    });
}

fn bench_find_path(c: &mut Criterion) {
    let (keep_in, keep_out) = pad_grid(8, 8);
    let surface = PathFindingSurface::new(Some(&keep_in), &keep_out, 0.01);
    let start = Point::new(1.0, 5.0);
    let goal = Point::new(79.0, 75.0);

    c.bench_function("find_path_8x8", |b| {
        b.iter(|| surface.find_path(black_box(start), black_box(goal), unlimited))
    });

    c.bench_function("find_path_8x8_warm_cache", |b| {
        let mut cache = VisibilityCache::new();
        b.iter(|| {
            surface.find_path_with_cache(black_box(start), black_box(goal), unlimited, &mut cache)
        })
    });
}

fn bench_reorder(c: &mut Criterion) {
    // Deterministic scatter without pulling in a random number generator.
    let points: Vec<Point> = (0..200u32)
        .map(|i| {
            let x = (i.wrapping_mul(7919) % 997) as f64;
            let y = (i.wrapping_mul(104_729) % 991) as f64;
            Point::new(x, y)
        })
        .collect();

    c.bench_function("reorder_greedy_200", |b| {
        b.iter(|| reorder(black_box(points.clone()), Point::default(), 0.0, OrderingStrategy::Greedy))
    });
    c.bench_function("reorder_2opt_200", |b| {
        b.iter(|| reorder(black_box(points.clone()), Point::default(), 0.0, OrderingStrategy::TwoOpt))
    });
}

criterion_group!(benches, bench_surface, bench_find_path, bench_reorder);
criterion_main!(benches);
