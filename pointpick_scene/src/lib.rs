// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointpick Scene: point-cloud scenes, cameras, and screen-space picking.
//!
//! Pointpick Scene turns a live 3D point cloud into something a pointer can hit.
//!
//! - Represents a flat list of renderables with world transforms, flags, and typed point-cloud geometry.
//! - Extracts sampled world-space points from every visible, pickable point cloud.
//! - Projects a snapshot of those points through a camera into NDC and indexes them in a
//!   [`pointpick_index`] quadtree covering exactly `[-1, 1]²`.
//! - Resolves an NDC cursor to the nearest original world point within a radius.
//!
//! ## Where this fits
//!
//! - Index: 2D spatial queries ([`pointpick_index`]).
//! - Scene: projection, snapshots, picking (this crate).
//! - Session: frame/pointer driven rebuilds and measurement (`pointpick_session`).
//!
//! ## Not a renderer
//!
//! Nothing here draws. An engine supplies the camera (through [`ViewProjection`])
//! and the points (through [`PointSource`] or by filling a [`Scene`]).
//!
//! ## API overview
//!
//! - [`Scene`], [`Renderable`], [`RenderableKind`], [`PointCloudRenderable`], [`RenderFlags`].
//! - [`Camera`] and the [`ViewProjection`] trait.
//! - [`CoordinateSystem`]: source-data axis conventions as a transform.
//! - [`PickSnapshot`]: world points plus the [`ScreenIndex`] built from them, replaced as a unit.
//! - [`pick`]: nearest world point to an NDC cursor.
//!
//! ### Minimal usage
//!
//! ```
//! use glam::{DVec3, Vec3};
//! use kurbo::Point;
//! use pointpick_scene::{
//!     Camera, PickConfig, PickSnapshot, PointCloudRenderable, PointSource, Renderable, Scene,
//! };
//!
//! let mut scene = Scene::new();
//! scene.insert(Renderable::point_cloud(
//!     "tile-0",
//!     PointCloudRenderable::from_points(&[Vec3::new(0.5, 0.5, -5.0), Vec3::new(-0.5, 0.2, -5.0)]),
//! ));
//!
//! // Orthographic unit box: world (x, y) maps straight to NDC (x, y).
//! let camera = Camera::orthographic(-1.0, 1.0, -1.0, 1.0, 0.1, 100.0);
//! let config = PickConfig { sample_rate: 1, ..PickConfig::default() };
//!
//! let snapshot = PickSnapshot::build(&camera, scene.extract_points(config.sample_rate), &config);
//! assert_eq!(
//!     snapshot.pick(Point::new(0.51, 0.49), config.radius),
//!     Some(DVec3::new(0.5, 0.5, -5.0))
//! );
//! assert_eq!(snapshot.pick(Point::new(0.9, 0.9), config.radius), None);
//! ```

pub mod camera;
pub mod coordinate_system;
pub mod error;
pub mod picking;
mod scene;
mod types;

pub use camera::{Camera, ViewProjection};
pub use coordinate_system::{CoordinateSystem, Handedness, ParseCoordinateSystemError, UpAxis};
pub use error::{ConfigError, ExtractError};
pub use picking::{BuildStats, NDC_BOUNDS, PickConfig, PickSnapshot, ScreenIndex, pick, quantize};
pub use scene::{PointSource, Scene, extract_points};
pub use types::{
    PointCloudRenderable, Positions, RenderFlags, Renderable, RenderableId, RenderableKind,
};
