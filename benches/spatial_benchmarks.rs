use criterion::{Criterion, black_box, criterion_group, criterion_main};
use geo::Point;
use vicinity::{Listing, QuadTree, Rect, SearchHit, SpatialPoint, sort_by_distance};

fn scattered_point(i: u32) -> Point {
    // Deterministic pseudo-scatter across the valid domain.
    let lng = ((i.wrapping_mul(2_654_435_761) % 360_000) as f64 / 1000.0) - 180.0;
    let lat = ((i.wrapping_mul(40_503) % 180_000) as f64 / 1000.0) - 90.0;
    Point::new(lng, lat)
}

fn benchmark_quadtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");

    group.bench_function("bulk_insert_10k", |b| {
        b.iter(|| {
            let mut tree = QuadTree::new(Rect::WORLD, 4);
            for i in 0..10_000u32 {
                tree.insert(SpatialPoint::new(scattered_point(i), black_box(i)));
            }
            tree
        })
    });

    // Setup one tree for the query benchmarks.
    let mut tree = QuadTree::new(Rect::WORLD, 4);
    for i in 0..10_000u32 {
        tree.insert(SpatialPoint::new(scattered_point(i), i));
    }

    group.bench_function("query_small_box", |b| {
        let range = Rect::new(13.4, 52.5, 0.5, 0.5);
        b.iter(|| tree.query(black_box(&range)))
    });

    group.bench_function("query_full_domain", |b| {
        b.iter(|| tree.query(black_box(&Rect::WORLD)))
    });

    group.finish();
}

fn benchmark_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering");

    let hits: Vec<SearchHit> = (0..1_000u32)
        .map(|i| {
            let distance = ((i.wrapping_mul(48_271) % 100_000) as f64) / 100.0;
            SearchHit::ranked(Listing::new(format!("listing-{i}")), distance)
        })
        .collect();

    group.bench_function("sort_1k_hits", |b| {
        b.iter(|| {
            let mut batch = hits.clone();
            sort_by_distance(black_box(&mut batch));
            batch
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_quadtree, benchmark_ordering);
criterion_main!(benches);
