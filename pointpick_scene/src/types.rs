// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: renderable identifiers, flags, and point-cloud geometry.

use glam::{DMat4, DVec3, Vec3};

use crate::coordinate_system::CoordinateSystem;
use crate::error::ExtractError;

/// Identifier for a renderable in a [`Scene`](crate::Scene).
///
/// Identifiers are slot indices and stay valid for the lifetime of the scene;
/// renderables are never removed, only hidden through their flags.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct RenderableId(pub(crate) u32);

impl RenderableId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Renderable flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u8 {
        /// Renderable is visible.
        const VISIBLE  = 0b0000_0001;
        /// Renderable contributes points to picking.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Point-cloud geometry: a flat `xyz` position buffer in local space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloudRenderable {
    positions: Option<Vec<f32>>,
}

impl PointCloudRenderable {
    /// Wrap a flat `[x0, y0, z0, x1, ...]` buffer.
    pub fn from_flat(positions: Vec<f32>) -> Self {
        Self {
            positions: Some(positions),
        }
    }

    /// Build a buffer from points.
    pub fn from_points(points: &[Vec3]) -> Self {
        Self::from_flat(points.iter().flat_map(|p| p.to_array()).collect())
    }

    /// Geometry that lost (or never had) its position attribute.
    pub fn without_positions() -> Self {
        Self { positions: None }
    }

    /// Typed view of the position buffer.
    pub fn positions(&self) -> Result<Positions<'_>, ExtractError> {
        let raw = self
            .positions
            .as_deref()
            .ok_or(ExtractError::MissingPositions)?;
        if raw.len() % 3 != 0 {
            return Err(ExtractError::RaggedPositions { len: raw.len() });
        }
        Ok(Positions { raw })
    }
}

/// Borrowed, validated position buffer.
#[derive(Copy, Clone, Debug)]
pub struct Positions<'a> {
    raw: &'a [f32],
}

impl Positions<'_> {
    /// Number of points.
    pub fn count(&self) -> usize {
        self.raw.len() / 3
    }

    /// The `i`th local-space position, widened to `f64`.
    pub fn get(&self, i: usize) -> Option<DVec3> {
        let p = self.raw.get(i * 3..i * 3 + 3)?;
        Some(Vec3::new(p[0], p[1], p[2]).as_dvec3())
    }

    /// Every `step`th position, starting with the first. A step of 0 is treated as 1.
    pub fn sampled(&self, step: usize) -> impl Iterator<Item = DVec3> + '_ {
        self.raw
            .chunks_exact(3)
            .step_by(step.max(1))
            .map(|p| Vec3::new(p[0], p[1], p[2]).as_dvec3())
    }
}

/// What a renderable draws.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderableKind {
    /// Discrete points; the only kind that contributes to picking.
    PointCloud(PointCloudRenderable),
    /// Anything else in the scene (meshes, helpers, overlays).
    Other,
}

/// A renderable object with its world transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Renderable {
    /// Human-readable label used in logs.
    pub label: String,
    /// What this renderable draws.
    pub kind: RenderableKind,
    /// Local-to-world transform.
    pub world_transform: DMat4,
    /// Visibility and picking flags.
    pub flags: RenderFlags,
}

impl Renderable {
    /// A point-cloud renderable with identity transform and default flags.
    pub fn point_cloud(label: impl Into<String>, cloud: PointCloudRenderable) -> Self {
        Self {
            label: label.into(),
            kind: RenderableKind::PointCloud(cloud),
            world_transform: DMat4::IDENTITY,
            flags: RenderFlags::default(),
        }
    }

    /// A renderable that never contributes points.
    pub fn other(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: RenderableKind::Other,
            world_transform: DMat4::IDENTITY,
            flags: RenderFlags::default(),
        }
    }

    /// Replace the world transform.
    pub fn with_world_transform(mut self, world_transform: DMat4) -> Self {
        self.world_transform = world_transform;
        self
    }

    /// Compose the source coordinate system's transform onto the world transform.
    pub fn with_coordinate_system(mut self, cs: CoordinateSystem) -> Self {
        self.world_transform *= cs.transform_matrix();
        self
    }

    /// Replace the flags.
    pub fn with_flags(mut self, flags: RenderFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Point-cloud geometry, if this renderable is a point cloud.
    pub fn as_point_cloud(&self) -> Option<&PointCloudRenderable> {
        match &self.kind {
            RenderableKind::PointCloud(cloud) => Some(cloud),
            RenderableKind::Other => None,
        }
    }

    /// Whether this renderable should contribute points to picking.
    pub fn is_pickable(&self) -> bool {
        self.flags
            .contains(RenderFlags::VISIBLE | RenderFlags::PICKABLE)
            && self.as_point_cloud().is_some()
    }
}
