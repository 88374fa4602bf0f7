// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene container and world-space point extraction.

use glam::DVec3;
use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::types::{RenderFlags, Renderable, RenderableId};

/// Source of world-space points for a pick snapshot.
///
/// Implementations must be pure with respect to the call: the returned
/// points are owned by the caller and may be empty.
pub trait PointSource {
    /// Extract every `sample_rate`th point in world space. A rate of 0 is treated as 1.
    fn extract_points(&self, sample_rate: usize) -> Vec<DVec3>;
}

impl PointSource for [DVec3] {
    fn extract_points(&self, sample_rate: usize) -> Vec<DVec3> {
        self.iter().step_by(sample_rate.max(1)).copied().collect()
    }
}

impl PointSource for Vec<DVec3> {
    fn extract_points(&self, sample_rate: usize) -> Vec<DVec3> {
        self.as_slice().extract_points(sample_rate)
    }
}

/// Flat list of renderables with precomputed world transforms.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    renderables: Vec<Renderable>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a renderable and return its identifier.
    pub fn insert(&mut self, renderable: Renderable) -> RenderableId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Renderable ids are 32-bit; scenes never approach that many objects."
        )]
        let id = RenderableId(self.renderables.len() as u32);
        self.renderables.push(renderable);
        id
    }

    /// Borrow a renderable.
    pub fn get(&self, id: RenderableId) -> Option<&Renderable> {
        self.renderables.get(id.idx())
    }

    /// Mutably borrow a renderable.
    pub fn get_mut(&mut self, id: RenderableId) -> Option<&mut Renderable> {
        self.renderables.get_mut(id.idx())
    }

    /// Replace a renderable's flags. Returns `false` for an unknown id.
    pub fn set_flags(&mut self, id: RenderableId, flags: RenderFlags) -> bool {
        match self.get_mut(id) {
            Some(r) => {
                r.flags = flags;
                true
            }
            None => false,
        }
    }

    /// Iterate renderables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RenderableId, &Renderable)> {
        self.renderables.iter().enumerate().map(|(i, r)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Ids were minted from the same 32-bit counter."
            )]
            let id = RenderableId(i as u32);
            (id, r)
        })
    }

    /// Number of renderables.
    pub fn len(&self) -> usize {
        self.renderables.len()
    }

    /// Whether the scene has no renderables.
    pub fn is_empty(&self) -> bool {
        self.renderables.is_empty()
    }
}

impl PointSource for Scene {
    fn extract_points(&self, sample_rate: usize) -> Vec<DVec3> {
        extract_points(self, sample_rate)
    }
}

/// Collect sampled world-space points from every pickable point cloud.
///
/// Malformed renderables are logged and skipped; they never prevent the rest
/// of the scene from being extracted.
pub fn extract_points(scene: &Scene, sample_rate: usize) -> Vec<DVec3> {
    let mut out = Vec::new();
    let mut clouds = 0_usize;
    for (id, r) in scene.iter() {
        if !r.is_pickable() {
            continue;
        }
        clouds += 1;
        if let Err(err) = append_world_points(r, sample_rate, &mut out) {
            warn!(?id, label = %r.label, %err, "skipping malformed point cloud");
        }
    }
    debug!(clouds, points = out.len(), sample_rate, "extracted scene points");
    out
}

fn append_world_points(
    r: &Renderable,
    sample_rate: usize,
    out: &mut Vec<DVec3>,
) -> Result<(), ExtractError> {
    let Some(cloud) = r.as_point_cloud() else {
        return Ok(());
    };
    if !r.world_transform.is_finite() {
        return Err(ExtractError::NonFiniteTransform);
    }
    let positions = cloud.positions()?;
    let m = r.world_transform;
    out.extend(positions.sampled(sample_rate).map(|p| m.transform_point3(p)));
    Ok(())
}
