// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between client pixels and normalized device coordinates.
//!
//! Pixel space has its origin at the top-left with `y` growing downward;
//! NDC spans `[-1, 1]²` with `y` growing upward.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use pointpick_session::pointer::{ndc_from_pixel, pixel_from_ndc};
//!
//! let canvas = Rect::new(0.0, 0.0, 800.0, 600.0);
//! assert_eq!(ndc_from_pixel(Point::new(400.0, 300.0), canvas), Some(Point::ZERO));
//! assert_eq!(pixel_from_ndc(Point::new(-1.0, 1.0), Size::new(800.0, 600.0)), Point::ZERO);
//! ```

use kurbo::{Point, Rect, Size};

/// Map a client-space pixel to NDC relative to `canvas`.
///
/// Returns `None` when the canvas has zero (or non-finite) width or height.
/// Positions outside the canvas map outside `[-1, 1]` and simply miss.
pub fn ndc_from_pixel(pixel: Point, canvas: Rect) -> Option<Point> {
    let w = canvas.width();
    let h = canvas.height();
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return None;
    }
    Some(Point::new(
        (pixel.x - canvas.x0) / w * 2.0 - 1.0,
        -((pixel.y - canvas.y0) / h) * 2.0 + 1.0,
    ))
}

/// Map an NDC position to canvas-local pixels for a canvas of `size`.
pub fn pixel_from_ndc(ndc: Point, size: Size) -> Point {
    Point::new(
        (ndc.x + 1.0) / 2.0 * size.width,
        (1.0 - ndc.y) / 2.0 * size.height,
    )
}
