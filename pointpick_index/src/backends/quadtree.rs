// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region quadtree backend over a fixed rectangle.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Circle, Point, Rect};

use crate::backend::Backend;
use crate::types::{Entry, circle_contains, circle_overlaps, contains_closed, overlaps_closed};

/// Splitting policy for [`QuadTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadTreeConfig {
    /// Maximum number of entries a leaf holds before it splits.
    pub capacity: usize,
    /// Depth at which leaves stop splitting and grow instead.
    pub max_depth: u16,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            capacity: 4,
            max_depth: 16,
        }
    }
}

#[derive(Clone, Debug)]
struct Node<P> {
    bounds: Rect,
    depth: u16,
    // Index of the first of four consecutive children.
    children: Option<usize>,
    items: Vec<Entry<P>>,
}

impl<P> Node<P> {
    fn leaf(bounds: Rect, depth: u16) -> Self {
        Self {
            bounds,
            depth,
            children: None,
            items: Vec::new(),
        }
    }
}

/// Region quadtree backend.
///
/// Covers a fixed rectangle given at construction; points outside it are
/// rejected by [`Backend::insert`]. Nodes live in a flat arena, children of a
/// node are stored contiguously in quadrant order (bottom-left, bottom-right,
/// top-left, top-right in y-up terms).
///
/// Query results are produced in depth-first quadrant order, then insertion
/// order within a leaf, which makes them deterministic for a given insertion
/// sequence.
pub struct QuadTree<P: Copy + Debug> {
    config: QuadTreeConfig,
    nodes: Vec<Node<P>>,
    len: usize,
}

impl<P: Copy + Debug> QuadTree<P> {
    /// Create an empty quadtree covering `bounds`.
    pub fn new(bounds: Rect, config: QuadTreeConfig) -> Self {
        debug_assert!(
            bounds.width() >= 0.0 && bounds.height() >= 0.0,
            "quadtree bounds must not be inverted"
        );
        Self {
            config,
            nodes: vec![Node::leaf(bounds, 0)],
            len: 0,
        }
    }

    /// Region covered by the tree.
    pub fn bounds(&self) -> Rect {
        self.nodes[0].bounds
    }

    /// Splitting policy in use.
    pub fn config(&self) -> QuadTreeConfig {
        self.config
    }

    /// Number of nodes (internal and leaf) currently allocated.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest level reached so far (root is 0).
    pub fn depth(&self) -> u16 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    fn quadrant(bounds: &Rect, pt: Point) -> usize {
        let c = bounds.center();
        (usize::from(pt.y >= c.y) << 1) | usize::from(pt.x >= c.x)
    }

    fn quadrant_bounds(bounds: &Rect, q: usize) -> Rect {
        let c = bounds.center();
        let (x0, x1) = if q & 1 == 0 {
            (bounds.x0, c.x)
        } else {
            (c.x, bounds.x1)
        };
        let (y0, y1) = if q & 2 == 0 {
            (bounds.y0, c.y)
        } else {
            (c.y, bounds.y1)
        };
        Rect::new(x0, y0, x1, y1)
    }

    fn split(&mut self, idx: usize) {
        let bounds = self.nodes[idx].bounds;
        let depth = self.nodes[idx].depth + 1;
        let first = self.nodes.len();
        for q in 0..4 {
            self.nodes
                .push(Node::leaf(Self::quadrant_bounds(&bounds, q), depth));
        }
        let items = core::mem::take(&mut self.nodes[idx].items);
        self.nodes[idx].children = Some(first);
        for e in items {
            let q = Self::quadrant(&bounds, e.point);
            self.nodes[first + q].items.push(e);
        }
    }

    fn collect(
        &self,
        overlaps: impl Fn(&Rect) -> bool,
        accept: impl Fn(Point) -> bool,
    ) -> Vec<Entry<P>> {
        let mut out = Vec::new();
        let mut stack = vec![0_usize];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if !overlaps(&node.bounds) {
                continue;
            }
            match node.children {
                // Reverse push so quadrant 0 is visited first.
                Some(first) => stack.extend((first..first + 4).rev()),
                None => out.extend(node.items.iter().filter(|e| accept(e.point)).copied()),
            }
        }
        out
    }
}

impl<P: Copy + Debug> Backend<P> for QuadTree<P> {
    fn insert(&mut self, entry: Entry<P>) -> bool {
        if !contains_closed(&self.nodes[0].bounds, entry.point) {
            return false;
        }
        let mut idx = 0;
        while let Some(first) = self.nodes[idx].children {
            idx = first + Self::quadrant(&self.nodes[idx].bounds, entry.point);
        }
        self.nodes[idx].items.push(entry);
        self.len += 1;
        let node = &self.nodes[idx];
        if node.items.len() > self.config.capacity && node.depth < self.config.max_depth {
            self.split(idx);
        }
        true
    }

    fn clear(&mut self) {
        let bounds = self.nodes[0].bounds;
        self.nodes.clear();
        self.nodes.push(Node::leaf(bounds, 0));
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn query_circle<'a>(&'a self, circle: Circle) -> Box<dyn Iterator<Item = Entry<P>> + 'a> {
        let out = self.collect(
            |r| circle_overlaps(&circle, r),
            |p| circle_contains(&circle, p),
        );
        Box::new(out.into_iter())
    }

    fn query_rect<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = Entry<P>> + 'a> {
        let out = self.collect(|r| overlaps_closed(&rect, r), |p| contains_closed(&rect, p));
        Box::new(out.into_iter())
    }
}

impl<P: Copy + Debug> Debug for QuadTree<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.bounds())
            .field("config", &self.config)
            .field("len", &self.len)
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
