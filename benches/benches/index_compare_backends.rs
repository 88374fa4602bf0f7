// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use pointpick_index::{Backend, FlatVec, PointIndex, PointIndexGeneric, QuadTreeConfig};

const NDC: Rect = Rect::new(-1.0, -1.0, 1.0, 1.0);

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
    fn next_ndc(&mut self) -> Point {
        Point::new(self.next_f64() * 2.0 - 1.0, self.next_f64() * 2.0 - 1.0)
    }
}

fn gen_uniform_points(count: usize) -> Vec<Point> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    (0..count).map(|_| rng.next_ndc()).collect()
}

// Dense blobs, as a scan of a few nearby objects projects to.
fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let centers: Vec<Point> = (0..n_clusters).map(|_| rng.next_ndc()).collect();
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for c in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Point::new(
                (c.x + dx).clamp(-1.0, 1.0),
                (c.y + dy).clamp(-1.0, 1.0),
            ));
        }
    }
    out
}

fn fill<B: Backend<usize>>(idx: &mut PointIndexGeneric<usize, B>, pts: &[Point]) {
    for (i, p) in pts.iter().copied().enumerate() {
        let _ = idx.insert(p, i);
    }
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[1_000usize, 10_000, 100_000] {
        let pts = gen_uniform_points(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("quadtree_n{}", n), |b| {
            b.iter_batched(
                || PointIndex::<usize>::new(NDC),
                |mut idx| {
                    fill(&mut idx, &pts);
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("flatvec_n{}", n), |b| {
            b.iter_batched(
                || PointIndexGeneric::<usize, FlatVec<usize>>::with_flat_vec(NDC),
                |mut idx| {
                    fill(&mut idx, &pts);
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_within");
    let pts = gen_uniform_points(100_000);
    let mut cursors = Rng::new(0xBADC_F00D_1234_5678);
    let cursors: Vec<Point> = (0..256).map(|_| cursors.next_ndc()).collect();
    group.throughput(Throughput::Elements(cursors.len() as u64));

    let mut qt = PointIndex::<usize>::new(NDC);
    fill(&mut qt, &pts);
    group.bench_function("quadtree_uniform", |b| {
        b.iter(|| {
            for &c in &cursors {
                black_box(qt.nearest_within(c, 0.05));
            }
        })
    });

    let mut flat = PointIndexGeneric::<usize, FlatVec<usize>>::with_flat_vec(NDC);
    fill(&mut flat, &pts);
    group.bench_function("flatvec_uniform", |b| {
        b.iter(|| {
            for &c in &cursors {
                black_box(flat.nearest_within(c, 0.05));
            }
        })
    });
    group.finish();
}

fn bench_capacity_clustered(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_capacity_clustered");
    let pts = gen_clustered_points(16, 4_000, 0.05);
    for &capacity in &[4usize, 16, 64] {
        let config = QuadTreeConfig {
            capacity,
            ..QuadTreeConfig::default()
        };
        group.bench_function(format!("build_then_query_cap{}", capacity), |b| {
            b.iter_batched(
                || PointIndex::<usize>::with_config(NDC, config),
                |mut idx| {
                    fill(&mut idx, &pts);
                    let hits = idx.query_circle(pts[0], 0.05).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_nearest, bench_capacity_clustered);
criterion_main!(benches);
