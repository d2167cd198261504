// SPDX-License-Identifier: MPL-2.0
//! Display-space / natural-space geometry.
//!
//! *Display space* is the coordinate system of the rendered preview element
//! (viewport pixels). *Natural space* is the intrinsic pixel grid of the raster
//! the preview shows. The mapping between them is a uniform scale plus a
//! translation by the display rectangle's origin; the image always preserves
//! its aspect ratio, so a single scale factor serves both axes.
//!
//! The functions here are rotation/flip agnostic. Callers must pass the
//! natural size of the raster that is actually on screen, which for the
//! editor is always the composited (rotated + flipped) preview.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::domain::error::GeometryError;

/// A point in either display or natural space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a raster, in natural pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the size with width and height exchanged.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Longest side.
    #[must_use]
    pub fn max_dimension(self) -> u32 {
        self.width.max(self.height)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An axis-aligned floating point rectangle.
///
/// Used for the measured display rectangle of the preview, for crop drags in
/// display space, and for crop rectangles in natural space before they are
/// snapped to the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanned by two corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// True when the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Clamps a point into the rectangle (edges inclusive).
    #[must_use]
    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.x, self.right().max(self.x)),
            point.y.clamp(self.y, self.bottom().max(self.y)),
        )
    }

    /// Intersection with `other`, or an empty rectangle at the clamped origin.
    #[must_use]
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }
}

/// A crop rectangle on the natural pixel grid.
///
/// Invariant kept by [`snap_to_pixels`]: `width > 0 && height > 0`, and the
/// rectangle lies inside the raster it was snapped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Whether this rectangle fits inside a raster of the given size.
    #[must_use]
    pub fn fits_within(&self, size: Size) -> bool {
        self.width > 0
            && self.height > 0
            && u64::from(self.x) + u64::from(self.width) <= u64::from(size.width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(size.height)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl From<PixelRect> for Rect {
    fn from(rect: PixelRect) -> Self {
        Rect::new(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        )
    }
}

// =============================================================================
// Mapping
// =============================================================================

/// Natural pixels per display pixel.
///
/// # Errors
///
/// Returns [`GeometryError::LayoutNotReady`] if the display rectangle has no
/// width yet (the preview has not been laid out).
pub fn scale_factor(display: &Rect, natural: Size) -> Result<f32, GeometryError> {
    if display.width <= 0.0 || !display.width.is_finite() {
        return Err(GeometryError::LayoutNotReady);
    }
    Ok(natural.width as f32 / display.width)
}

/// Maps a display-space point into natural space.
///
/// # Errors
///
/// Returns [`GeometryError::LayoutNotReady`] if `display.width <= 0`.
pub fn to_natural(point: Point, display: &Rect, natural: Size) -> Result<Point, GeometryError> {
    let scale = scale_factor(display, natural)?;
    Ok(Point::new(
        (point.x - display.x) * scale,
        (point.y - display.y) * scale,
    ))
}

/// Maps a natural-space point back into display space.
///
/// # Errors
///
/// Returns [`GeometryError::LayoutNotReady`] if `display.width <= 0`.
pub fn to_display(point: Point, display: &Rect, natural: Size) -> Result<Point, GeometryError> {
    let scale = scale_factor(display, natural)?;
    Ok(Point::new(
        point.x / scale + display.x,
        point.y / scale + display.y,
    ))
}

/// Maps a display-space rectangle into natural space.
///
/// # Errors
///
/// Returns [`GeometryError::LayoutNotReady`] if `display.width <= 0`.
pub fn rect_to_natural(rect: &Rect, display: &Rect, natural: Size) -> Result<Rect, GeometryError> {
    let scale = scale_factor(display, natural)?;
    let origin = to_natural(rect.origin(), display, natural)?;
    Ok(Rect::new(
        origin.x,
        origin.y,
        rect.width * scale,
        rect.height * scale,
    ))
}

/// Maps a natural-space rectangle into display space.
///
/// # Errors
///
/// Returns [`GeometryError::LayoutNotReady`] if `display.width <= 0`.
pub fn rect_to_display(rect: &Rect, display: &Rect, natural: Size) -> Result<Rect, GeometryError> {
    let scale = scale_factor(display, natural)?;
    let origin = to_display(rect.origin(), display, natural)?;
    Ok(Rect::new(
        origin.x,
        origin.y,
        rect.width / scale,
        rect.height / scale,
    ))
}

/// Snaps a natural-space rectangle onto the pixel grid of a raster of `bounds`.
///
/// Edges are rounded to the nearest pixel boundary and clamped into the
/// raster. Returns `None` when nothing of the rectangle survives.
#[must_use]
pub fn snap_to_pixels(rect: &Rect, bounds: Size) -> Option<PixelRect> {
    let max_x = bounds.width as f32;
    let max_y = bounds.height as f32;
    let left = rect.x.round().clamp(0.0, max_x);
    let top = rect.y.round().clamp(0.0, max_y);
    let right = rect.right().round().clamp(0.0, max_x);
    let bottom = rect.bottom().round().clamp(0.0, max_y);

    if right <= left || bottom <= top {
        return None;
    }

    Some(PixelRect::new(
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn display(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect::new(x, y, width, height)
    }

    #[test]
    fn scale_factor_is_natural_over_display_width() {
        let factor = scale_factor(&display(0.0, 0.0, 500.0, 400.0), Size::new(1000, 800))
            .expect("laid out");
        assert_relative_eq!(factor, 2.0);
    }

    #[test]
    fn zero_width_display_is_not_ready() {
        let err = to_natural(
            Point::new(1.0, 1.0),
            &display(0.0, 0.0, 0.0, 0.0),
            Size::new(10, 10),
        )
        .unwrap_err();
        assert_eq!(err, GeometryError::LayoutNotReady);
    }

    #[test]
    fn to_natural_subtracts_origin_then_scales() {
        let rect = display(20.0, 10.0, 250.0, 200.0);
        let point = to_natural(Point::new(70.0, 60.0), &rect, Size::new(1000, 800)).expect("map");
        assert_relative_eq!(point.x, 200.0);
        assert_relative_eq!(point.y, 200.0);
    }

    #[test]
    fn to_display_inverts_to_natural() {
        let rect = display(13.0, 7.0, 321.0, 123.0);
        let natural = Size::new(1284, 492);
        let original = Point::new(100.5, 44.25);
        let there = to_natural(original, &rect, natural).expect("map");
        let back = to_display(there, &rect, natural).expect("map");
        assert_relative_eq!(back.x, original.x, epsilon = 1e-3);
        assert_relative_eq!(back.y, original.y, epsilon = 1e-3);
    }

    #[test]
    fn rect_area_scales_with_square_of_factor() {
        let rect = display(0.0, 0.0, 400.0, 500.0);
        let natural = Size::new(800, 1000);
        let drag = Rect::new(100.0, 100.0, 200.0, 150.0);
        let mapped = rect_to_natural(&drag, &rect, natural).expect("map");
        assert_relative_eq!(mapped.area(), drag.area() * 4.0, epsilon = 1e-2);
        let back = rect_to_display(&mapped, &rect, natural).expect("map");
        assert_relative_eq!(back.width, drag.width, epsilon = 1e-3);
    }

    #[test]
    fn from_corners_normalizes_any_drag_direction() {
        let rect = Rect::from_corners(Point::new(300.0, 250.0), Point::new(100.0, 100.0));
        assert_eq!(rect, Rect::new(100.0, 100.0, 200.0, 150.0));
    }

    #[test]
    fn snap_rounds_and_clamps_into_bounds() {
        let snapped = snap_to_pixels(&Rect::new(-3.2, 10.4, 50.0, 1000.0), Size::new(40, 100))
            .expect("non-empty");
        assert_eq!(snapped, PixelRect::new(0, 10, 40, 90));
        assert!(snapped.fits_within(Size::new(40, 100)));
    }

    #[test]
    fn snap_of_sub_pixel_rect_is_none() {
        assert!(snap_to_pixels(&Rect::new(5.1, 5.1, 0.2, 0.2), Size::new(10, 10)).is_none());
        assert!(snap_to_pixels(&Rect::new(20.0, 0.0, 5.0, 5.0), Size::new(10, 10)).is_none());
    }

    #[test]
    fn clamp_point_keeps_point_inside() {
        let rect = display(10.0, 10.0, 100.0, 50.0);
        let clamped = rect.clamp_point(Point::new(500.0, -4.0));
        assert_eq!(clamped, Point::new(110.0, 10.0));
        assert!(rect.contains(clamped));
    }
}
