// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::{DVec3, Vec3};
use kurbo::Point;
use pointpick_scene::{
    Camera, PickConfig, PickSnapshot, PointCloudRenderable, PointSource, Renderable, Scene,
};

// A square terrain patch in front of the camera, sampled on a jittered grid.
fn gen_terrain(side: usize) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(side * side);
    for j in 0..side {
        for i in 0..side {
            let x = i as f32 / side as f32 * 20.0 - 10.0;
            let z = j as f32 / side as f32 * -20.0 - 2.0;
            let y = (x * 0.3).sin() * (z * 0.2).cos() - 1.5;
            out.push(Vec3::new(x, y, z));
        }
    }
    out
}

fn camera() -> Camera {
    Camera::perspective(60_f64.to_radians(), 16.0 / 9.0, 0.1, 1000.0).looking_at(
        DVec3::new(0.0, 2.0, 4.0),
        DVec3::new(0.0, -1.0, -8.0),
        DVec3::Y,
    )
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_rebuild");
    let cam = camera();
    for &side in &[100usize, 300, 1000] {
        let mut scene = Scene::new();
        scene.insert(Renderable::point_cloud(
            "terrain",
            PointCloudRenderable::from_points(&gen_terrain(side)),
        ));
        let config = PickConfig::default();
        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_function(format!("extract_and_index_{}x{}", side, side), |b| {
            b.iter(|| {
                let snap =
                    PickSnapshot::build(&cam, scene.extract_points(config.sample_rate), &config);
                black_box(snap.index().len());
            })
        });
    }
    group.finish();
}

fn bench_pick(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_pick");
    let mut scene = Scene::new();
    scene.insert(Renderable::point_cloud(
        "terrain",
        PointCloudRenderable::from_points(&gen_terrain(1000)),
    ));
    let config = PickConfig::default();
    let snap = PickSnapshot::build(&camera(), scene.extract_points(config.sample_rate), &config);
    let cursors: Vec<Point> = (0..64)
        .map(|i| {
            let t = i as f64 / 64.0;
            Point::new(t * 1.6 - 0.8, -0.2 - t * 0.5)
        })
        .collect();
    group.throughput(Throughput::Elements(cursors.len() as u64));
    group.bench_function("sweep_default_radius", |b| {
        b.iter(|| {
            for &c in &cursors {
                black_box(snap.pick(c, config.radius));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_rebuild, bench_pick);
criterion_main!(benches);
