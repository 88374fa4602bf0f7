// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointpick Index: a Kurbo-native 2D point index over a fixed region.
//!
//! Pointpick Index is the spatial building block behind screen-space picking.
//!
//! - Insert points with user payloads into a fixed, closed region (for example NDC `[-1, 1]²`).
//! - Query by closed disk or closed rectangle.
//! - Resolve the nearest entry within a radius with [`PointIndexGeneric::nearest_within`].
//!
//! The index is write-once in spirit: callers that need fresh contents build a new
//! index and drop the old one rather than patching entries in place.
//!
//! Backends are pluggable via a simple trait so you can swap the spatial strategy without API churn.
//! The default backend is a region [`QuadTree`]; [`FlatVec`] is a linear scan that is useful for
//! tiny sets and as a reference in tests and benchmarks.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use pointpick_index::PointIndex;
//!
//! let mut idx: PointIndex<usize> = PointIndex::new(Rect::new(-1.0, -1.0, 1.0, 1.0));
//! assert!(idx.insert(Point::new(0.5, 0.5), 0));
//! assert!(idx.insert(Point::new(0.52, 0.5), 1));
//! // Outside the region: rejected.
//! assert!(!idx.insert(Point::new(1.5, 0.0), 2));
//!
//! let hit = idx.nearest_within(Point::new(0.505, 0.5), 0.05).unwrap();
//! assert_eq!(hit.entry.payload, 0);
//! assert!(idx.nearest_within(Point::new(-0.5, -0.5), 0.05).is_none());
//! ```
//!
//! ## Choosing a backend
//!
//! - `QuadTree` (default): region quadtree with configurable leaf capacity and depth limit.
//!   See the [`backends`] docs for the splitting rules.
//! - `FlatVec`: simplest and smallest, linear scans.
//!
//! ### Float semantics
//!
//! Points with NaN coordinates are never inside any region and are rejected on insert.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::quadtree::{QuadTree, QuadTreeConfig};
pub use index::{Nearest, PointIndex, PointIndexGeneric, closest};
pub use types::Entry;
