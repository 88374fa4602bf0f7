// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Circle, Rect};

use crate::backend::Backend;
use crate::types::{Entry, circle_contains, contains_closed};

/// Flat vector backend with linear scans.
///
/// Accepts any point; query order is insertion order.
pub struct FlatVec<P: Copy + Debug> {
    entries: Vec<Entry<P>>,
}

impl<P: Copy + Debug> Default for FlatVec<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P: Copy + Debug> Debug for FlatVec<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<P: Copy + Debug> Backend<P> for FlatVec<P> {
    fn insert(&mut self, entry: Entry<P>) -> bool {
        self.entries.push(entry);
        true
    }
    fn clear(&mut self) {
        self.entries.clear();
    }
    fn len(&self) -> usize {
        self.entries.len()
    }
    fn query_circle<'a>(&'a self, circle: Circle) -> Box<dyn Iterator<Item = Entry<P>> + 'a> {
        Box::new(
            self.entries
                .iter()
                .filter(move |e| circle_contains(&circle, e.point))
                .copied(),
        )
    }
    fn query_rect<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = Entry<P>> + 'a> {
        Box::new(
            self.entries
                .iter()
                .filter(move |e| contains_closed(&rect, e.point))
                .copied(),
        )
    }
}
