//! Criterion benchmarks for crossing recomputation.
//! Focus sizes: n in {11, 51, 101, 201} vertices of a star polygon.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use knodia::math::Point2;
use knodia::Diagram;

/// Star polygon `{n/k}`: every segment crosses many others.
#[allow(clippy::cast_precision_loss)]
fn star(n: usize, k: usize) -> Vec<Point2> {
    (0..n)
        .map(|i| {
            let theta = std::f64::consts::TAU * ((i * k) % n) as f64 / n as f64;
            Point2::new(theta.cos(), theta.sin())
        })
        .collect()
}

fn bench_crossings(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossings");
    for &n in &[11usize, 51, 101, 201] {
        group.bench_with_input(BenchmarkId::new("create", n), &n, |b, &n| {
            b.iter_batched(
                || star(n, 2),
                |pts| {
                    let _d = Diagram::new(pts);
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("drag_frame", n), &n, |b, &n| {
            b.iter_batched(
                || Diagram::new(star(n, 2)).ok(),
                |d| {
                    if let Some(mut d) = d {
                        let _ = d.move_vertex(0, Point2::new(1.001, 0.0));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_crossings);
criterion_main!(benches);
