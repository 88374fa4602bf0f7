// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for point indexing implementations.

use alloc::boxed::Box;

use core::fmt::Debug;
use kurbo::{Circle, Rect};

use crate::types::Entry;

/// Spatial backend abstraction used by `PointIndexGeneric`.
pub trait Backend<P: Copy + Debug> {
    /// Insert an entry. Returns `false` if the backend cannot hold the point
    /// (for example because it lies outside a bounded region).
    fn insert(&mut self, entry: Entry<P>) -> bool;

    /// Remove every entry.
    fn clear(&mut self);

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Whether the backend holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Query entries inside the closed disk.
    fn query_circle<'a>(&'a self, circle: Circle) -> Box<dyn Iterator<Item = Entry<P>> + 'a>;

    /// Query entries inside the closed rectangle.
    fn query_rect<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = Entry<P>> + 'a>;
}
