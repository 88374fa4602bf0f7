// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a pick snapshot for a small scene and resolve a few cursors.
//!
//! The scene holds a right-handed Y-up grid and a Z-up survey strip, so the
//! second cloud exercises the coordinate-system transform.
//!
//! Run:
//! - `cargo run -p pointpick_demos --example pick_basics`
//! - `RUST_LOG=debug cargo run -p pointpick_demos --example pick_basics` to see build statistics.

use glam::{DVec3, Vec3};
use kurbo::{Point, Size};
use pointpick_scene::{
    Camera, CoordinateSystem, PickConfig, PickSnapshot, PointCloudRenderable, PointSource,
    Renderable, Scene, ViewProjection,
};
use pointpick_session::pixel_from_ndc;
use tracing::info;

fn grid(n: usize, z: f32) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            let x = i as f32 / (n - 1) as f32 * 4.0 - 2.0;
            let y = j as f32 / (n - 1) as f32 * 4.0 - 2.0;
            out.push(Vec3::new(x, y, z));
        }
    }
    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut scene = Scene::new();
    scene.insert(Renderable::point_cloud(
        "wall",
        PointCloudRenderable::from_points(&grid(60, -6.0)),
    ));
    // Z-up survey strip: its +Z becomes the renderer's +Y.
    let survey: Vec<Vec3> = (0..400)
        .map(|i| Vec3::new(i as f32 * 0.01 - 2.0, 4.0, -1.0))
        .collect();
    let z_up: CoordinateSystem = "RIGHT_HANDED_Z_UP".parse()?;
    scene.insert(
        Renderable::point_cloud("survey", PointCloudRenderable::from_points(&survey))
            .with_coordinate_system(z_up),
    );

    let camera = Camera::perspective(60_f64.to_radians(), 4.0 / 3.0, 0.1, 100.0).looking_at(
        DVec3::new(0.0, 0.0, 2.0),
        DVec3::new(0.0, 0.0, -6.0),
        DVec3::Y,
    );
    let config = PickConfig::default();
    let snapshot = PickSnapshot::build(&camera, scene.extract_points(config.sample_rate), &config);
    info!(stats = ?snapshot.index().stats(), "snapshot ready");

    let canvas = Size::new(800.0, 600.0);
    for cursor in [
        Point::new(0.0, 0.0),
        Point::new(0.3, -0.2),
        Point::new(-0.5, 0.5),
        Point::new(0.95, 0.95),
    ] {
        match snapshot.pick(cursor, config.radius) {
            Some(p) => {
                let ndc = camera.project(p);
                let anchor = pixel_from_ndc(Point::new(ndc.x, ndc.y), canvas);
                println!(
                    "cursor ({:+.2}, {:+.2}) -> world ({:+.3}, {:+.3}, {:+.3}), label at ({:.0}, {:.0}) px",
                    cursor.x, cursor.y, p.x, p.y, p.z, anchor.x, anchor.y
                );
            }
            None => println!("cursor ({:+.2}, {:+.2}) -> nothing", cursor.x, cursor.y),
        }
    }
    Ok(())
}
