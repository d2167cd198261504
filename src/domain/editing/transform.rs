// SPDX-License-Identifier: MPL-2.0
//! Geometric transform state.
//!
//! [`TransformState`] describes the edits made since the last crop bake:
//! rotation, mirroring, preview zoom, and an optional crop rectangle on the
//! composited raster. Every operation returns a new value.

use super::newtypes::{rotation_bounds, RotationDegrees, ZoomFactor};
use crate::domain::geometry::PixelRect;

/// Quarter-turn rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    /// Signed quarter turn in degrees.
    #[must_use]
    pub fn degrees(self) -> f32 {
        match self {
            RotateDirection::Clockwise => rotation_bounds::QUARTER_TURN,
            RotateDirection::CounterClockwise => -rotation_bounds::QUARTER_TURN,
        }
    }
}

/// Mirroring axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipAxis {
    /// Mirror left-to-right.
    Horizontal,
    /// Mirror top-to-bottom.
    Vertical,
}

/// Rotation, mirroring, zoom, and pending crop for the working image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformState {
    rotation: RotationDegrees,
    flip_horizontal: bool,
    flip_vertical: bool,
    zoom: ZoomFactor,
    crop: Option<PixelRect>,
}

impl TransformState {
    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rotation(&self) -> RotationDegrees {
        self.rotation
    }

    #[must_use]
    pub fn flip_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    #[must_use]
    pub fn flip_vertical(&self) -> bool {
        self.flip_vertical
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomFactor {
        self.zoom
    }

    /// Crop rectangle in composited (post-rotation) natural space.
    #[must_use]
    pub fn crop(&self) -> Option<PixelRect> {
        self.crop
    }

    /// Rotates by `delta` degrees, wrapping into `[-180, 180)`.
    #[must_use]
    pub fn rotate(self, delta: f32) -> Self {
        Self {
            rotation: self.rotation.rotated_by(delta),
            ..self
        }
    }

    /// Rotates a quarter turn.
    #[must_use]
    pub fn rotate90(self, direction: RotateDirection) -> Self {
        self.rotate(direction.degrees())
    }

    /// Sets an absolute rotation.
    #[must_use]
    pub fn with_rotation(self, degrees: f32) -> Self {
        Self {
            rotation: RotationDegrees::new(degrees),
            ..self
        }
    }

    /// Toggles mirroring along `axis`.
    #[must_use]
    pub fn flip(self, axis: FlipAxis) -> Self {
        match axis {
            FlipAxis::Horizontal => Self {
                flip_horizontal: !self.flip_horizontal,
                ..self
            },
            FlipAxis::Vertical => Self {
                flip_vertical: !self.flip_vertical,
                ..self
            },
        }
    }

    /// Sets the preview zoom, clamped to `[0.1, 5.0]`.
    #[must_use]
    pub fn set_zoom(self, zoom: f32) -> Self {
        Self {
            zoom: ZoomFactor::new(zoom),
            ..self
        }
    }

    /// Attaches a crop rectangle. Zero-area rectangles are dropped.
    #[must_use]
    pub fn with_crop(self, crop: PixelRect) -> Self {
        Self {
            crop: (crop.width > 0 && crop.height > 0).then_some(crop),
            ..self
        }
    }

    /// True when rendering with this transform changes no pixels.
    ///
    /// Zoom is display-only and does not count.
    #[must_use]
    pub fn is_geometric_identity(&self) -> bool {
        !self.rotation.is_rotated()
            && !self.flip_horizontal
            && !self.flip_vertical
            && self.crop.is_none()
    }

    /// Geometry of this transform without the crop.
    #[must_use]
    pub fn without_crop(self) -> Self {
        Self { crop: None, ..self }
    }
}
