// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `PointIndex` API and generic implementation over a pluggable backend.

use core::fmt::Debug;
use core::marker::PhantomData;

use kurbo::{Circle, Point, Rect};

use crate::backend::Backend;
use crate::backends::flatvec::FlatVec;
use crate::backends::quadtree::{QuadTree, QuadTreeConfig};
use crate::types::{Entry, contains_closed};

/// The closest entry found by a radius query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Nearest<P> {
    /// The winning entry.
    pub entry: Entry<P>,
    /// Squared Euclidean distance from the query center.
    pub distance_squared: f64,
}

/// Select the entry closest to `center` by squared Euclidean distance.
///
/// Ties keep the first candidate in iteration order. Returns `None` for an
/// empty candidate set.
pub fn closest<P: Copy>(
    center: Point,
    candidates: impl IntoIterator<Item = Entry<P>>,
) -> Option<Nearest<P>> {
    let mut best: Option<Nearest<P>> = None;
    for entry in candidates {
        let distance_squared = (entry.point - center).hypot2();
        match best {
            Some(b) if b.distance_squared <= distance_squared => {}
            _ => {
                best = Some(Nearest {
                    entry,
                    distance_squared,
                });
            }
        }
    }
    best
}

/// A point index over a fixed region, parameterized by a spatial backend.
#[derive(Debug)]
pub struct PointIndexGeneric<P: Copy + Debug, B: Backend<P>> {
    bounds: Rect,
    backend: B,
    _p: PhantomData<P>,
}

/// Default index using a region quadtree backend.
pub type PointIndex<P> = PointIndexGeneric<P, QuadTree<P>>;

impl<P: Copy + Debug> PointIndex<P> {
    /// Create an empty quadtree-backed index covering `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, QuadTreeConfig::default())
    }

    /// Create an empty quadtree-backed index with an explicit splitting policy.
    pub fn with_config(bounds: Rect, config: QuadTreeConfig) -> Self {
        Self::with_backend(bounds, QuadTree::new(bounds, config))
    }
}

impl<P: Copy + Debug> PointIndexGeneric<P, FlatVec<P>> {
    /// Create a linear-scan index covering `bounds`.
    pub fn with_flat_vec(bounds: Rect) -> Self {
        Self::with_backend(bounds, FlatVec::default())
    }
}

impl<P: Copy + Debug, B: Backend<P>> PointIndexGeneric<P, B> {
    /// Create an index over `bounds` using the given backend.
    pub fn with_backend(bounds: Rect, backend: B) -> Self {
        Self {
            bounds,
            backend,
            _p: PhantomData,
        }
    }

    /// Region accepted by [`insert`](Self::insert).
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Access the backend (for statistics).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Insert a point with payload.
    ///
    /// Returns `false` and stores nothing if the point lies outside the
    /// index region (edges included) or has a NaN coordinate.
    pub fn insert(&mut self, point: Point, payload: P) -> bool {
        if !contains_closed(&self.bounds, point) {
            return false;
        }
        self.backend.insert(Entry::new(point, payload))
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.backend.clear();
    }

    /// Query entries within the closed disk of `radius` around `center`.
    pub fn query_circle(&self, center: Point, radius: f64) -> impl Iterator<Item = Entry<P>> + '_ {
        self.backend.query_circle(Circle::new(center, radius))
    }

    /// Query entries inside the closed rectangle.
    pub fn query_rect(&self, rect: Rect) -> impl Iterator<Item = Entry<P>> + '_ {
        self.backend.query_rect(rect)
    }

    /// Closest entry within `radius` of `center`, if any.
    pub fn nearest_within(&self, center: Point, radius: f64) -> Option<Nearest<P>> {
        closest(center, self.query_circle(center, radius))
    }
}
