// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `quadtree`: region quadtree over a fixed rectangle (default).
//! - `flatvec`: flat vector with linear scans (small, simple; handy as a reference).
//!
//! Region quadtree note
//! --------------------
//! Each node covers a fixed quarter of its parent's region. Leaves hold up to
//! `capacity` entries; inserting past that splits the leaf into four children
//! and pushes its entries down, until `max_depth` is reached, after which the
//! leaf simply grows. Points on a split line go to the upper/right quadrant.
//! Queries prune every subtree whose region does not touch the query shape.

pub mod flatvec;
pub mod quadtree;

pub use quadtree::{QuadTree, QuadTreeConfig};
