// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry type and closed-interval geometry helpers over Kurbo shapes.
//!
//! Kurbo's own [`Rect::contains`] is half-open. Index regions here are closed on
//! every edge so that a point sitting exactly on the far boundary (for example
//! `x == 1.0` in NDC) is still indexable.

use kurbo::{Circle, Point, Rect};

/// A stored point together with its user payload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Entry<P> {
    /// Position of the entry inside the index region.
    pub point: Point,
    /// User payload (typically an index into an external snapshot).
    pub payload: P,
}

impl<P> Entry<P> {
    /// Create a new entry.
    pub const fn new(point: Point, payload: P) -> Self {
        Self { point, payload }
    }
}

/// Whether `rect` contains `pt`, inclusive of all four edges. NaN is never contained.
#[inline]
pub fn contains_closed(rect: &Rect, pt: Point) -> bool {
    rect.x0 <= pt.x && pt.x <= rect.x1 && rect.y0 <= pt.y && pt.y <= rect.y1
}

/// Whether two rectangles overlap, treating touching edges as overlapping.
#[inline]
pub fn overlaps_closed(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Whether the closed disk contains `pt`.
#[inline]
pub fn circle_contains(circle: &Circle, pt: Point) -> bool {
    (pt - circle.center).hypot2() <= circle.radius * circle.radius
}

/// Whether the closed disk touches the closed rectangle.
#[inline]
pub fn circle_overlaps(circle: &Circle, rect: &Rect) -> bool {
    let nearest = Point::new(
        circle.center.x.clamp(rect.x0, rect.x1),
        circle.center.y.clamp(rect.y0, rect.y1),
    );
    circle_contains(circle, nearest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_rect_includes_far_edges() {
        let r = Rect::new(-1.0, -1.0, 1.0, 1.0);
        assert!(contains_closed(&r, Point::new(1.0, 1.0)));
        assert!(contains_closed(&r, Point::new(-1.0, 0.0)));
        assert!(!contains_closed(&r, Point::new(1.0001, 0.0)));
        assert!(!contains_closed(&r, Point::new(f64::NAN, 0.0)));
    }

    #[test]
    fn circle_rect_overlap_uses_nearest_point() {
        let r = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(circle_overlaps(&Circle::new((1.5, 0.5), 0.5), &r));
        assert!(!circle_overlaps(&Circle::new((1.5, 1.5), 0.5), &r));
        // Center inside the rectangle always overlaps.
        assert!(circle_overlaps(&Circle::new((0.5, 0.5), 0.0), &r));
    }

    #[test]
    fn touching_rects_overlap() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 2.0, 1.0);
        assert!(overlaps_closed(&a, &b));
        assert!(!overlaps_closed(&a, &Rect::new(1.1, 0.0, 2.0, 1.0)));
    }
}
