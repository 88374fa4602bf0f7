// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointpick Session: a deterministic picking loop and two-point measurement.
//!
//! ## Overview
//!
//! This crate drives [`pointpick_scene`] from a host's frame loop and input stream.
//! Every handler is a synchronous function of the current state, an event, and an
//! explicit timestamp. Timers are deadlines checked on each call, so the whole loop
//! can be replayed in tests without a clock or a window.
//!
//! ## Frames
//!
//! [`InteractionLoop::on_frame`] rebuilds the pick snapshot when the camera world
//! transform changes, on the first frame, once after the deferred initial delay, and
//! when a rebuild was requested. It also fires a due auto-reset.
//!
//! ## Input
//!
//! [`InteractionLoop::handle_input`] takes [`InputEvent`]s in client pixels:
//! - pointer move resolves the nearest point and updates the measurement head;
//! - primary button commits the live head;
//! - secondary button or Escape cancels.
//!
//! Each call returns a [`Response`] with an [`Outcome`] for propagation and the
//! [`Effect`]s it produced. A registered measurement listener sees the same
//! committed-point changes as [`Effect::MeasurementChanged`].
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use glam::DVec3;
//! use kurbo::{Point, Rect};
//! use pointpick_scene::Camera;
//! use pointpick_session::{Effect, InputEvent, InteractionLoop, PointerButton, SessionConfig};
//!
//! let points = vec![DVec3::new(0.0, 0.0, -5.0), DVec3::new(0.5, 0.0, -5.0)];
//! let camera = Camera::orthographic(-1.0, 1.0, -1.0, 1.0, 0.1, 100.0);
//! let mut config = SessionConfig::default();
//! config.pick.sample_rate = 1;
//!
//! let ms = Duration::from_millis;
//! let canvas = Rect::new(0.0, 0.0, 400.0, 400.0);
//! let mut session = InteractionLoop::mount(config, canvas, ms(0)).unwrap();
//! session.on_frame(&camera, &points, ms(0));
//!
//! let click = InputEvent::PointerDown { button: PointerButton::Primary };
//! session.handle_input(InputEvent::PointerMove { position: Point::new(200.0, 200.0) }, ms(10));
//! session.handle_input(click, ms(20));
//! session.handle_input(InputEvent::PointerMove { position: Point::new(300.0, 201.0) }, ms(30));
//! let response = session.handle_input(click, ms(40));
//!
//! let Some(Effect::MeasurementCompleted(segment)) = response.effects.last() else {
//!     panic!("expected a finished measurement");
//! };
//! assert_eq!(segment.length, 0.5);
//! session.dispose();
//! ```

pub mod interaction;
pub mod measurement;
pub mod pointer;
pub mod types;

pub use interaction::InteractionLoop;
pub use measurement::{Commit, MeasureState, MeasurementSession, Segment};
pub use pointer::{ndc_from_pixel, pixel_from_ndc};
pub use types::{Effect, InputEvent, Key, Outcome, PointerButton, Response, SessionConfig};
