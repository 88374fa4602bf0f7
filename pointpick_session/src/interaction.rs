// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame and pointer driven picking loop.
//!
//! [`InteractionLoop`] owns the current [`PickSnapshot`] and a
//! [`MeasurementSession`]. The host calls [`on_frame`](InteractionLoop::on_frame)
//! once per rendered frame and [`handle_input`](InteractionLoop::handle_input)
//! for each pointer or key event, passing a monotonic timestamp to both.
//!
//! ## Rebuilds
//!
//! A frame rebuilds the snapshot when any of these hold:
//! - it is the first frame after mount,
//! - the camera world transform differs from the one captured at the last rebuild,
//! - [`request_rebuild`](InteractionLoop::request_rebuild) was called,
//! - the deferred initial rebuild deadline has passed.
//!
//! A rebuild constructs the new snapshot completely, then replaces the old one.

use core::fmt;
use core::time::Duration;

use glam::{DMat4, DVec3};
use kurbo::{Point, Rect};
use pointpick_scene::{BuildStats, ConfigError, PickSnapshot, PointSource, ViewProjection};
use tracing::{debug, trace};

use crate::measurement::MeasurementSession;
use crate::pointer::ndc_from_pixel;
use crate::types::{Effect, InputEvent, Key, Outcome, PointerButton, Response, SessionConfig};

type Listener = Box<dyn FnMut(&[DVec3])>;

/// Picking loop bound to one canvas.
pub struct InteractionLoop {
    config: SessionConfig,
    canvas: Rect,
    snapshot: PickSnapshot,
    last_camera: Option<DMat4>,
    deferred_rebuild_at: Option<Duration>,
    rebuild_requested: bool,
    rebuilds: u64,
    measurement: MeasurementSession,
    listener: Option<Listener>,
}

impl fmt::Debug for InteractionLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionLoop")
            .field("config", &self.config)
            .field("canvas", &self.canvas)
            .field("points", &self.snapshot.points().len())
            .field("indexed", &self.snapshot.index().len())
            .field("rebuilds", &self.rebuilds)
            .field("measurement", &self.measurement)
            .field("listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl InteractionLoop {
    /// Validate `config` and attach to a canvas occupying `canvas` in client pixels.
    ///
    /// `now` anchors the deferred initial rebuild.
    pub fn mount(config: SessionConfig, canvas: Rect, now: Duration) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(?canvas, "mounted interaction loop");
        Ok(Self {
            snapshot: PickSnapshot::empty(&config.pick),
            measurement: MeasurementSession::new(config.auto_reset_delay),
            deferred_rebuild_at: config.initial_rebuild_delay.map(|d| now + d),
            config,
            canvas,
            last_camera: None,
            rebuild_requested: false,
            rebuilds: 0,
            listener: None,
        })
    }

    /// Detach, dropping the snapshot and any listener.
    pub fn dispose(self) {
        debug!(rebuilds = self.rebuilds, "disposed interaction loop");
    }

    /// The active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Canvas rectangle in client pixels.
    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    /// Update the canvas rectangle after a resize or layout change.
    pub fn set_canvas(&mut self, canvas: Rect) {
        self.canvas = canvas;
    }

    /// Register a callback fired with the committed points whenever they change.
    pub fn set_measurement_listener(&mut self, listener: impl FnMut(&[DVec3]) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Force a rebuild on the next frame.
    pub fn request_rebuild(&mut self) {
        self.rebuild_requested = true;
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &PickSnapshot {
        &self.snapshot
    }

    /// Number of rebuilds since mount.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// The measurement state.
    pub fn measurement(&self) -> &MeasurementSession {
        &self.measurement
    }

    /// Forward an externally edited point list to the measurement display.
    pub fn set_external_points(&mut self, points: Vec<DVec3>) {
        self.measurement.set_external_points(points);
    }

    /// Resolve a client-space pixel without touching the measurement.
    pub fn pick_pixel(&self, pixel: Point) -> Option<DVec3> {
        self.pick_ndc(ndc_from_pixel(pixel, self.canvas)?)
    }

    /// Resolve an NDC position without touching the measurement.
    pub fn pick_ndc(&self, ndc: Point) -> Option<DVec3> {
        self.snapshot.pick(ndc, self.config.pick.radius)
    }

    /// Per-frame tick: fire a due auto-reset, then rebuild if needed.
    pub fn on_frame<C, S>(&mut self, camera: &C, source: &S, now: Duration) -> Vec<Effect>
    where
        C: ViewProjection + ?Sized,
        S: PointSource + ?Sized,
    {
        let mut effects = Vec::new();
        self.fire_due_reset(now, &mut effects);

        let world = camera.world_transform();
        let moved = self.last_camera != Some(world);
        let deferred = self.deferred_rebuild_at.is_some_and(|at| now >= at);
        if moved || deferred || self.rebuild_requested {
            debug!(moved, deferred, requested = self.rebuild_requested, "rebuilding pick index");
            if deferred {
                self.deferred_rebuild_at = None;
            }
            self.rebuild_requested = false;
            let stats = self.rebuild(camera, source, world);
            effects.push(Effect::IndexRebuilt(stats));
        }
        effects
    }

    /// Handle one input event.
    pub fn handle_input(&mut self, event: InputEvent, now: Duration) -> Response {
        let mut response = Response::new(Outcome::Continue);
        self.fire_due_reset(now, &mut response.effects);
        match event {
            InputEvent::PointerMove { position } => {
                let resolved = self.pick_pixel(position);
                if resolved.is_none() {
                    trace!(?position, "no point under pointer");
                }
                if self.measurement.update_head(resolved) {
                    response
                        .effects
                        .extend(self.measurement.head().map(Effect::HeadMoved));
                }
            }
            InputEvent::PointerDown {
                button: PointerButton::Primary,
            } => {
                response.outcome = Outcome::StopAndConsume;
                if let Some(commit) = self.measurement.click(now) {
                    self.committed_changed(commit.points, &mut response.effects);
                    if let Some(segment) = commit.completed {
                        debug!(length = segment.length, "measurement completed");
                        response.effects.push(Effect::MeasurementCompleted(segment));
                    }
                }
            }
            InputEvent::PointerDown {
                button: PointerButton::Secondary,
            } => {
                response.outcome = Outcome::StopAndConsume;
                self.cancel(&mut response.effects);
            }
            InputEvent::KeyDown(Key::Escape) => self.cancel(&mut response.effects),
            InputEvent::PointerDown {
                button: PointerButton::Auxiliary,
            }
            | InputEvent::KeyDown(Key::Other) => {}
        }
        response
    }

    #[tracing::instrument(skip_all)]
    fn rebuild<C, S>(&mut self, camera: &C, source: &S, world: DMat4) -> BuildStats
    where
        C: ViewProjection + ?Sized,
        S: PointSource + ?Sized,
    {
        let points = source.extract_points(self.config.pick.sample_rate);
        let next = PickSnapshot::build(camera, points, &self.config.pick);
        self.snapshot = next;
        self.last_camera = Some(world);
        self.rebuilds += 1;
        self.snapshot.index().stats()
    }

    fn fire_due_reset(&mut self, now: Duration, effects: &mut Vec<Effect>) {
        if self.measurement.poll(now) {
            debug!("measurement auto-reset");
            self.committed_changed(Vec::new(), effects);
        }
    }

    fn cancel(&mut self, effects: &mut Vec<Effect>) {
        let had_head = self.measurement.head().is_some();
        let had_points = !self.measurement.committed().is_empty();
        if !self.measurement.cancel() {
            return;
        }
        if had_head {
            effects.push(Effect::HeadCleared);
        }
        if had_points {
            self.committed_changed(Vec::new(), effects);
        }
    }

    fn committed_changed(&mut self, points: Vec<DVec3>, effects: &mut Vec<Effect>) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&points);
        }
        effects.push(Effect::MeasurementChanged(points));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::{MeasureState, Segment};
    use pointpick_scene::Camera;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // Identity view, orthographic unit box: world (x, y, -5) lands on NDC (x, y).
    fn ortho() -> Camera {
        Camera::orthographic(-1.0, 1.0, -1.0, 1.0, 0.1, 100.0)
    }

    fn canvas() -> Rect {
        Rect::new(0.0, 0.0, 200.0, 200.0)
    }

    // Pixel on a 200×200 canvas for an NDC position.
    fn px(x: f64, y: f64) -> Point {
        Point::new((x + 1.0) * 100.0, (1.0 - y) * 100.0)
    }

    fn world(x: f64, y: f64) -> DVec3 {
        DVec3::new(x, y, -5.0)
    }

    fn eager() -> SessionConfig {
        let mut c = SessionConfig::default();
        c.pick.sample_rate = 1;
        c.initial_rebuild_delay = None;
        c
    }

    fn moved(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove { position: px(x, y) }
    }

    const CLICK: InputEvent = InputEvent::PointerDown {
        button: PointerButton::Primary,
    };

    fn mounted(points: &[DVec3]) -> InteractionLoop {
        let mut lp = InteractionLoop::mount(eager(), canvas(), ms(0)).unwrap();
        lp.on_frame(&ortho(), points, ms(0));
        lp
    }

    #[test]
    fn mount_rejects_invalid_config() {
        let mut c = eager();
        c.pick.sample_rate = 0;
        assert_eq!(
            InteractionLoop::mount(c, canvas(), ms(0)).unwrap_err(),
            ConfigError::ZeroSampleRate
        );
    }

    #[test]
    fn one_rebuild_per_camera_transition() {
        let pts = [world(0.5, 0.5)];
        let mut cam = ortho();
        let mut lp = InteractionLoop::mount(eager(), canvas(), ms(0)).unwrap();
        assert_eq!(lp.rebuild_count(), 0);

        assert_eq!(lp.on_frame(&cam, &pts[..], ms(0)).len(), 1);
        assert_eq!(lp.rebuild_count(), 1);
        for t in 1..5 {
            assert!(lp.on_frame(&cam, &pts[..], ms(t * 16)).is_empty());
        }
        assert_eq!(lp.rebuild_count(), 1);

        cam.set_world_transform(DMat4::from_translation(DVec3::new(0.25, 0.0, 0.0)));
        lp.on_frame(&cam, &pts[..], ms(100));
        lp.on_frame(&cam, &pts[..], ms(116));
        assert_eq!(lp.rebuild_count(), 2);

        // The rebuilt snapshot reflects the moved camera.
        assert_eq!(lp.pick_ndc(Point::new(0.25, 0.5)), Some(pts[0]));
        assert_eq!(lp.pick_ndc(Point::new(0.5, 0.5)), None);
    }

    #[test]
    fn deferred_initial_rebuild_picks_up_late_points() {
        let mut c = eager();
        c.initial_rebuild_delay = Some(ms(500));
        let cam = ortho();
        let mut lp = InteractionLoop::mount(c, canvas(), ms(1000)).unwrap();

        let mut pts: Vec<DVec3> = Vec::new();
        lp.on_frame(&cam, &pts, ms(1000));
        assert_eq!(lp.rebuild_count(), 1);
        assert!(lp.snapshot().points().is_empty());

        pts.push(world(0.0, 0.0));
        lp.on_frame(&cam, &pts, ms(1200));
        assert_eq!(lp.pick_ndc(Point::ZERO), None);

        let effects = lp.on_frame(&cam, &pts, ms(1500));
        assert!(matches!(effects[..], [Effect::IndexRebuilt(BuildStats { inserted: 1, .. })]));
        assert_eq!(lp.pick_ndc(Point::ZERO), Some(world(0.0, 0.0)));

        lp.on_frame(&cam, &pts, ms(1600));
        assert_eq!(lp.rebuild_count(), 2);
    }

    #[test]
    fn requested_rebuild_runs_once() {
        let cam = ortho();
        let mut pts = vec![world(0.1, 0.1)];
        let mut lp = mounted(&pts);
        pts.push(world(-0.6, 0.3));
        lp.request_rebuild();
        lp.on_frame(&cam, &pts, ms(16));
        lp.on_frame(&cam, &pts, ms(32));
        assert_eq!(lp.rebuild_count(), 2);
        assert_eq!(lp.pick_ndc(Point::new(-0.6, 0.3)), Some(pts[1]));
    }

    #[test]
    fn snapshot_is_replaced_as_a_unit() {
        let cam = ortho();
        let first: Vec<DVec3> = (0..50).map(|i| world(i as f64 / 60.0, 0.0)).collect();
        let second: Vec<DVec3> = (0..5).map(|i| world(0.0, i as f64 / 10.0)).collect();
        let mut lp = mounted(&first);
        lp.request_rebuild();
        lp.on_frame(&cam, &second, ms(16));

        let snap = lp.snapshot();
        assert_eq!(snap.points(), &second[..]);
        assert!(snap.index().entries().all(|e| e.payload < second.len()));
        assert_eq!(lp.pick_ndc(Point::new(0.0, 0.4)), Some(second[4]));
        assert_eq!(lp.pick_ndc(Point::new(0.8, 0.0)), None);
    }

    #[test]
    fn picks_are_stable_under_a_static_camera() {
        let cam = ortho();
        let mut pts: Vec<DVec3> = (0..1000)
            .map(|i| {
                let t = i as f64;
                world((t * 0.618_034).fract() * 1.8 - 0.9, (t * 0.414_214).fract() * 1.8 - 0.9)
            })
            .collect();
        pts[0] = world(0.2, -0.3);
        let mut lp = mounted(&pts);
        let cursor = px(0.2, -0.3);
        let first = lp.pick_pixel(cursor);
        assert!(first.is_some());
        for t in 1..20 {
            lp.on_frame(&cam, &pts, ms(t * 16));
            lp.handle_input(InputEvent::PointerMove { position: cursor }, ms(t * 16));
            assert_eq!(lp.pick_pixel(cursor), first);
            assert_eq!(lp.measurement().head(), first);
        }
        assert_eq!(lp.rebuild_count(), 1);
    }

    #[test]
    fn full_measurement_flow() {
        let a = world(0.5, 0.5);
        let b = world(-0.5, 0.5);
        let mut lp = mounted(&[a, b]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        lp.set_measurement_listener(move |pts| sink.borrow_mut().push(pts.len()));

        let r = lp.handle_input(moved(0.51, 0.5), ms(10));
        assert_eq!(r.outcome, Outcome::Continue);
        assert_eq!(r.effects, [Effect::HeadMoved(a)]);

        let r = lp.handle_input(CLICK, ms(20));
        assert_eq!(r.outcome, Outcome::StopAndConsume);
        assert_eq!(r.effects, [Effect::MeasurementChanged(vec![a])]);
        assert_eq!(lp.measurement().state(), MeasureState::OnePointPending);

        lp.handle_input(moved(-0.5, 0.49), ms(30));
        let r = lp.handle_input(CLICK, ms(40));
        assert_eq!(
            r.effects,
            [
                Effect::MeasurementChanged(vec![a, b]),
                Effect::MeasurementCompleted(Segment::new(a, b)),
            ]
        );
        assert_eq!(lp.measurement().segments()[0].length, 1.0);

        assert!(lp.on_frame(&ortho(), &[a, b][..], ms(2039)).is_empty());
        let effects = lp.on_frame(&ortho(), &[a, b][..], ms(2040));
        assert_eq!(effects, [Effect::MeasurementChanged(Vec::new())]);
        assert_eq!(lp.measurement().state(), MeasureState::Empty);
        assert_eq!(*seen.borrow(), [1, 2, 0]);
    }

    #[test]
    fn click_without_fresh_move_is_ignored() {
        let a = world(0.0, 0.0);
        let mut lp = mounted(&[a]);
        lp.handle_input(moved(0.0, 0.0), ms(0));
        lp.handle_input(CLICK, ms(1));
        let r = lp.handle_input(CLICK, ms(2));
        assert!(r.effects.is_empty());
        assert_eq!(lp.measurement().committed(), [a]);
    }

    #[test]
    fn miss_keeps_previous_head() {
        let a = world(0.0, 0.0);
        let mut lp = mounted(&[a]);
        lp.handle_input(moved(0.0, 0.0), ms(0));
        let r = lp.handle_input(moved(0.9, 0.9), ms(1));
        assert!(r.effects.is_empty());
        assert_eq!(lp.measurement().head(), Some(a));
        // The head stays live, so a click still commits it.
        lp.handle_input(CLICK, ms(2));
        assert_eq!(lp.measurement().committed(), [a]);
    }

    #[test]
    fn escape_and_secondary_button_cancel() {
        let a = world(0.0, 0.0);
        let mut lp = mounted(&[a]);
        lp.handle_input(moved(0.0, 0.0), ms(0));
        lp.handle_input(CLICK, ms(1));

        let r = lp.handle_input(InputEvent::KeyDown(Key::Escape), ms(2));
        assert_eq!(r.outcome, Outcome::Continue);
        assert_eq!(
            r.effects,
            [Effect::HeadCleared, Effect::MeasurementChanged(Vec::new())]
        );
        assert_eq!(lp.measurement().state(), MeasureState::Empty);

        lp.handle_input(moved(0.0, 0.0), ms(3));
        let r = lp.handle_input(
            InputEvent::PointerDown {
                button: PointerButton::Secondary,
            },
            ms(4),
        );
        assert_eq!(r.outcome, Outcome::StopAndConsume);
        assert_eq!(r.effects, [Effect::HeadCleared]);

        // Nothing left to cancel.
        let r = lp.handle_input(InputEvent::KeyDown(Key::Escape), ms(5));
        assert!(r.effects.is_empty());
    }

    #[test]
    fn other_inputs_pass_through() {
        let mut lp = mounted(&[world(0.0, 0.0)]);
        for ev in [
            InputEvent::KeyDown(Key::Other),
            InputEvent::PointerDown {
                button: PointerButton::Auxiliary,
            },
        ] {
            let r = lp.handle_input(ev, ms(0));
            assert_eq!(r.outcome, Outcome::Continue);
            assert!(r.effects.is_empty());
        }
    }

    #[test]
    fn degenerate_canvas_never_picks() {
        let mut lp = mounted(&[world(0.0, 0.0)]);
        lp.set_canvas(Rect::new(10.0, 10.0, 10.0, 10.0));
        assert_eq!(lp.pick_pixel(Point::new(10.0, 10.0)), None);
        assert!(lp.handle_input(moved(0.0, 0.0), ms(0)).effects.is_empty());
    }

    #[test]
    fn canvas_offset_is_respected() {
        let a = world(0.0, 0.0);
        let mut lp = mounted(&[a]);
        lp.set_canvas(Rect::new(100.0, 50.0, 300.0, 250.0));
        assert_eq!(lp.pick_pixel(Point::new(200.0, 150.0)), Some(a));
        assert_eq!(lp.pick_pixel(Point::new(100.0, 100.0)), None);
    }
}
