// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera handle used to project world points into normalized device coordinates.

use glam::{DMat4, DVec3};

/// Anything that can project world-space points into NDC.
///
/// Implement this for your engine's camera type; [`Camera`] is a plain data
/// implementation for tests, tools, and engines without their own camera.
pub trait ViewProjection {
    /// Camera-to-world transform. Compared for exact equality to detect motion.
    fn world_transform(&self) -> DMat4;

    /// Combined projection * view matrix.
    fn view_projection(&self) -> DMat4;

    /// Project a world point to NDC (with perspective divide).
    fn project(&self, point: DVec3) -> DVec3 {
        self.view_projection().project_point3(point)
    }
}

/// Passive camera: a world transform and a projection matrix.
///
/// Projections follow GL conventions (NDC cube `[-1, 1]³`, right-handed,
/// looking down `-Z` in view space).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    world_transform: DMat4,
    projection: DMat4,
}

impl Camera {
    /// Create a camera from a camera-to-world transform and a projection matrix.
    pub const fn new(world_transform: DMat4, projection: DMat4) -> Self {
        Self {
            world_transform,
            projection,
        }
    }

    /// Perspective camera at the origin looking down `-Z`.
    pub fn perspective(fov_y_radians: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self::new(
            DMat4::IDENTITY,
            DMat4::perspective_rh_gl(fov_y_radians, aspect, near, far),
        )
    }

    /// Orthographic camera at the origin looking down `-Z`.
    pub fn orthographic(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        Self::new(
            DMat4::IDENTITY,
            DMat4::orthographic_rh_gl(left, right, bottom, top, near, far),
        )
    }

    /// Place the camera at `eye` looking at `target`.
    pub fn looking_at(mut self, eye: DVec3, target: DVec3, up: DVec3) -> Self {
        self.world_transform = DMat4::look_at_rh(eye, target, up).inverse();
        self
    }

    /// Replace the camera-to-world transform.
    pub fn set_world_transform(&mut self, world_transform: DMat4) {
        self.world_transform = world_transform;
    }

    /// Replace the projection matrix.
    pub fn set_projection(&mut self, projection: DMat4) {
        self.projection = projection;
    }

    /// Projection matrix.
    pub fn projection(&self) -> DMat4 {
        self.projection
    }

    /// World-to-camera (view) matrix.
    pub fn view_matrix(&self) -> DMat4 {
        self.world_transform.inverse()
    }
}

impl ViewProjection for Camera {
    fn world_transform(&self) -> DMat4 {
        self.world_transform
    }

    fn view_projection(&self) -> DMat4 {
        self.projection * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthographic_projects_linearly() {
        let cam = Camera::orthographic(-2.0, 2.0, -1.0, 1.0, 0.1, 100.0);
        let ndc = cam.project(DVec3::new(1.0, 0.5, -10.0));
        assert!((ndc.x - 0.5).abs() < 1e-12);
        assert!((ndc.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn looking_at_centers_target() {
        let cam = Camera::perspective(1.0, 1.5, 0.1, 1000.0).looking_at(
            DVec3::new(10.0, 20.0, 30.0),
            DVec3::new(-5.0, 2.0, 1.0),
            DVec3::Y,
        );
        let ndc = cam.project(DVec3::new(-5.0, 2.0, 1.0));
        assert!(ndc.x.abs() < 1e-9);
        assert!(ndc.y.abs() < 1e-9);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn moving_camera_changes_world_transform() {
        let a = Camera::perspective(1.0, 1.0, 0.1, 10.0);
        let mut b = a;
        assert_eq!(a.world_transform(), b.world_transform());
        b.set_world_transform(DMat4::from_translation(DVec3::X));
        assert_ne!(a.world_transform(), b.world_transform());
    }
}
