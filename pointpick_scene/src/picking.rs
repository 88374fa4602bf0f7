// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space index construction and nearest-point resolution.
//!
//! ## Build
//!
//! [`ScreenIndex::build`] projects every snapshot point through the camera's
//! view-projection, drops points whose NDC `x` or `y` falls outside `[-1, 1]`,
//! quantizes the rest to `1 / precision` and keeps the first point per
//! quantized key. Entries carry the point's position in the snapshot.
//!
//! ## Pick
//!
//! [`pick`] queries a closed disk around the cursor, selects the candidate
//! with the smallest squared NDC distance (first in query order on ties), and
//! returns the original full-precision world point.
//!
//! ## Snapshots
//!
//! [`PickSnapshot`] owns the world points and the index built from them. It is
//! the unit of replacement: a rebuild produces a whole new snapshot, so an
//! index can never be paired with points it was not built from.

use std::collections::HashSet;

use glam::DVec3;
use kurbo::{Point, Rect};
use pointpick_index::{Entry, Nearest, PointIndex, QuadTreeConfig};
use tracing::debug;

use crate::camera::ViewProjection;
use crate::error::ConfigError;

/// The visible NDC square covered by every screen index.
pub const NDC_BOUNDS: Rect = Rect::new(-1.0, -1.0, 1.0, 1.0);

/// Tunables for building and querying the screen index.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PickConfig {
    /// Keep every `sample_rate`th scene point when extracting a snapshot.
    pub sample_rate: usize,
    /// Query radius in NDC units.
    pub radius: f64,
    /// Quantization scale; NDC coordinates are rounded to `1 / precision`.
    pub precision: f64,
    /// Quadtree splitting policy.
    pub quadtree: QuadTreeConfig,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            sample_rate: 10,
            radius: 0.05,
            precision: 1e4,
            quadtree: QuadTreeConfig::default(),
        }
    }
}

impl PickConfig {
    /// Check every field for a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(ConfigError::InvalidPrecision(self.precision));
        }
        if self.quadtree.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Counters from one index build.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Points offered to the builder.
    pub input: usize,
    /// Points stored in the index.
    pub inserted: usize,
    /// Points projected outside the NDC square (or to NaN).
    pub out_of_bounds: usize,
    /// Points whose quantized key was already taken.
    pub duplicates: usize,
}

/// Round an NDC coordinate to the quantization grid, returning the integer key.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Inputs are within [-1, 1] so the scaled value fits easily in i64."
)]
pub fn quantize(v: f64, precision: f64) -> i64 {
    (v * precision).round() as i64
}

/// Quadtree of quantized NDC positions with snapshot indices as payloads.
#[derive(Debug)]
pub struct ScreenIndex {
    index: PointIndex<usize>,
    stats: BuildStats,
}

impl ScreenIndex {
    /// An index with no entries; every query misses.
    pub fn empty(config: &PickConfig) -> Self {
        Self {
            index: PointIndex::with_config(NDC_BOUNDS, config.quadtree),
            stats: BuildStats::default(),
        }
    }

    /// Project `points` through `camera` and index the unique on-screen positions.
    pub fn build<C: ViewProjection + ?Sized>(
        camera: &C,
        points: &[DVec3],
        config: &PickConfig,
    ) -> Self {
        let mut out = Self::empty(config);
        out.stats.input = points.len();
        let view_projection = camera.view_projection();
        let mut seen: HashSet<(i64, i64)> = HashSet::with_capacity(points.len());
        for (id, p) in points.iter().enumerate() {
            let ndc = view_projection.project_point3(*p);
            // NaN fails both range checks.
            if !((-1.0..=1.0).contains(&ndc.x) && (-1.0..=1.0).contains(&ndc.y)) {
                out.stats.out_of_bounds += 1;
                continue;
            }
            let key = (
                quantize(ndc.x, config.precision),
                quantize(ndc.y, config.precision),
            );
            if !seen.insert(key) {
                out.stats.duplicates += 1;
                continue;
            }
            #[allow(
                clippy::cast_precision_loss,
                reason = "Quantized keys are far below 2^52."
            )]
            let q = Point::new(
                key.0 as f64 / config.precision,
                key.1 as f64 / config.precision,
            );
            if out.index.insert(q, id) {
                out.stats.inserted += 1;
            } else {
                out.stats.out_of_bounds += 1;
            }
        }
        debug!(
            input = out.stats.input,
            inserted = out.stats.inserted,
            out_of_bounds = out.stats.out_of_bounds,
            duplicates = out.stats.duplicates,
            "built screen index"
        );
        out
    }

    /// Counters from the build that produced this index.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Number of indexed positions.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Every indexed entry whose quantized position lies within `radius` of `cursor`.
    pub fn query(&self, cursor: Point, radius: f64) -> impl Iterator<Item = Entry<usize>> + '_ {
        self.index.query_circle(cursor, radius)
    }

    /// Every indexed entry.
    pub fn entries(&self) -> impl Iterator<Item = Entry<usize>> + '_ {
        self.index.query_rect(NDC_BOUNDS)
    }

    /// Closest indexed entry within `radius` of `cursor`.
    pub fn nearest(&self, cursor: Point, radius: f64) -> Option<Nearest<usize>> {
        self.index.nearest_within(cursor, radius)
    }
}

/// Resolve `cursor` (NDC) to the closest original world point within `radius`.
///
/// `points` must be the snapshot `index` was built from.
pub fn pick(cursor: Point, index: &ScreenIndex, points: &[DVec3], radius: f64) -> Option<DVec3> {
    let hit = index.nearest(cursor, radius)?;
    points.get(hit.entry.payload).copied()
}

/// World points paired with the screen index built from them.
#[derive(Debug)]
pub struct PickSnapshot {
    points: Vec<DVec3>,
    index: ScreenIndex,
}

impl PickSnapshot {
    /// A snapshot with no points.
    pub fn empty(config: &PickConfig) -> Self {
        Self {
            points: Vec::new(),
            index: ScreenIndex::empty(config),
        }
    }

    /// Take ownership of `points` and index them for `camera`.
    pub fn build<C: ViewProjection + ?Sized>(
        camera: &C,
        points: Vec<DVec3>,
        config: &PickConfig,
    ) -> Self {
        let index = ScreenIndex::build(camera, &points, config);
        Self { points, index }
    }

    /// The world points this snapshot was built from.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// The screen index built from [`points`](Self::points).
    pub fn index(&self) -> &ScreenIndex {
        &self.index
    }

    /// Resolve `cursor` (NDC) against this snapshot.
    pub fn pick(&self, cursor: Point, radius: f64) -> Option<DVec3> {
        pick(cursor, &self.index, &self.points, radius)
    }
}
