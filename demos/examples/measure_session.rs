// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay a scripted pointer session and print every effect.
//!
//! The script measures one distance, lets it auto-reset, orbits the camera,
//! and then cancels a half-finished measurement with Escape.
//!
//! An optional JSON file overrides the session configuration, for example
//! `{ "pick": { "radius": 0.02 }, "auto_reset_delay": null }`.
//!
//! Run:
//! - `cargo run -p pointpick_demos --example measure_session`
//! - `cargo run -p pointpick_demos --example measure_session -- config.json`

use core::time::Duration;

use glam::{DMat4, DVec3, Vec3};
use kurbo::{Point, Rect};
use pointpick_scene::{Camera, PointCloudRenderable, Renderable, Scene};
use pointpick_session::{Effect, InputEvent, InteractionLoop, Key, PointerButton, SessionConfig};
use tracing::info;

enum Step {
    Frame,
    Input(InputEvent),
    Orbit(f64),
}

fn moved(x: f64, y: f64) -> Step {
    Step::Input(InputEvent::PointerMove {
        position: Point::new(x, y),
    })
}

fn click() -> Step {
    Step::Input(InputEvent::PointerDown {
        button: PointerButton::Primary,
    })
}

fn load_config() -> Result<SessionConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            let config: SessionConfig = serde_json::from_str(&text)?;
            info!(%path, "loaded session config");
            Ok(config)
        }
        None => Ok(SessionConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = load_config()?;
    config.pick.sample_rate = 1;

    // A ring of posts around the origin.
    let posts: Vec<Vec3> = (0..720)
        .map(|i| {
            let a = (i % 36) as f32 / 36.0 * core::f32::consts::TAU;
            let h = (i / 36) as f32 * 0.1;
            Vec3::new(a.cos() * 3.0, h - 1.0, a.sin() * 3.0)
        })
        .collect();
    let mut scene = Scene::new();
    scene.insert(Renderable::point_cloud(
        "posts",
        PointCloudRenderable::from_points(&posts),
    ));

    let base = Camera::perspective(50_f64.to_radians(), 1.0, 0.1, 100.0);
    let eye = DVec3::new(0.0, 1.0, 8.0);
    let mut camera = base.looking_at(eye, DVec3::ZERO, DVec3::Y);

    let canvas = Rect::new(0.0, 0.0, 512.0, 512.0);
    let mut session = InteractionLoop::mount(config, canvas, Duration::ZERO)?;
    session.set_measurement_listener(|pts| println!("  listener: {} committed", pts.len()));

    let script = [
        Step::Frame,
        moved(256.0, 300.0),
        click(),
        moved(330.0, 300.0),
        click(),
        Step::Frame,
        Step::Frame,
        Step::Orbit(0.4),
        Step::Frame,
        moved(200.0, 280.0),
        click(),
        Step::Input(InputEvent::KeyDown(Key::Escape)),
        Step::Frame,
    ];

    let mut now = Duration::ZERO;
    for step in script {
        now += Duration::from_millis(700);
        let effects = match step {
            Step::Frame => session.on_frame(&camera, &scene, now),
            Step::Input(ev) => {
                let r = session.handle_input(ev, now);
                println!("{:>6} ms {:?} -> {:?}", now.as_millis(), ev, r.outcome);
                r.effects
            }
            Step::Orbit(angle) => {
                let eye = DMat4::from_rotation_y(angle).transform_point3(eye);
                camera = base.looking_at(eye, DVec3::ZERO, DVec3::Y);
                println!("{:>6} ms orbit {angle:+.2} rad", now.as_millis());
                Vec::new()
            }
        };
        for effect in effects {
            match effect {
                Effect::MeasurementCompleted(s) => println!("  measured {:.3} m", s.length),
                other => println!("  {other:?}"),
            }
        }
    }

    info!(rebuilds = session.rebuild_count(), "done");
    session.dispose();
    Ok(())
}
