// SPDX-License-Identifier: MPL-2.0
//! Editing newtypes.
//!
//! This module provides type-safe wrappers for editing values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Rotation Bounds
// =============================================================================

/// Rotation bounds (-180° to 180°, wrapping).
pub mod rotation_bounds {
    /// Lower end of the wrapped range.
    pub const MIN: f32 = -180.0;
    /// Upper end of the wrapped range.
    pub const MAX: f32 = 180.0;
    /// Full turn.
    pub const FULL_TURN: f32 = 360.0;
    /// Quarter turn applied by the rotate buttons.
    pub const QUARTER_TURN: f32 = 90.0;
    /// Degrees covered by dragging across the full width of the rotation ruler.
    pub const RULER_DEGREES_PER_WIDTH: f32 = 60.0;
}

// =============================================================================
// RotationDegrees
// =============================================================================

/// Rotation angle in degrees, always wrapped into `[-180, 180)`.
///
/// Positive angles rotate clockwise as seen on screen.
///
/// # Example
///
/// ```
/// use dental_lens::domain::editing::RotationDegrees;
///
/// let angle = RotationDegrees::new(270.0);
/// assert_eq!(angle.value(), -90.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationDegrees(f32);

impl RotationDegrees {
    /// No rotation.
    pub const ZERO: Self = Self(0.0);

    /// Creates a rotation, wrapping any finite angle into range.
    ///
    /// Non-finite input is treated as no rotation.
    #[must_use]
    pub fn new(degrees: f32) -> Self {
        if !degrees.is_finite() {
            return Self::ZERO;
        }
        let wrapped = (degrees - rotation_bounds::MIN).rem_euclid(rotation_bounds::FULL_TURN)
            + rotation_bounds::MIN;
        // `-0.0` would break bit-identical snapshot comparisons
        Self(if wrapped == 0.0 { 0.0 } else { wrapped })
    }

    /// Returns the angle in degrees.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the angle in radians.
    #[must_use]
    pub fn radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Adds `delta` degrees, wrapping the result.
    #[must_use]
    pub fn rotated_by(self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }

    /// Whether the angle is an exact multiple of 90°.
    #[must_use]
    pub fn is_quarter_turn(self) -> bool {
        self.0.rem_euclid(rotation_bounds::QUARTER_TURN) == 0.0
    }

    /// Number of clockwise quarter turns (0..=3) for quarter-turn angles.
    #[must_use]
    pub fn quarter_turns(self) -> Option<u8> {
        if !self.is_quarter_turn() {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let turns = (self.0.rem_euclid(rotation_bounds::FULL_TURN) / rotation_bounds::QUARTER_TURN)
            as u8;
        Some(turns % 4)
    }

    /// Returns true if the angle is not zero.
    #[must_use]
    pub fn is_rotated(self) -> bool {
        self.0 != 0.0
    }
}

/// Converts a horizontal drag on the rotation ruler into an absolute angle.
///
/// Dragging across the full ruler width covers 60°. The result is clamped to
/// `[-180, 180]` rather than wrapped, so the ruler stops at its ends.
#[must_use]
pub fn rotation_from_ruler(start_degrees: f32, delta_x: f32, ruler_width: f32) -> f32 {
    if ruler_width <= 0.0 || !ruler_width.is_finite() {
        return start_degrees.clamp(rotation_bounds::MIN, rotation_bounds::MAX);
    }
    let degrees = start_degrees + (delta_x / ruler_width) * rotation_bounds::RULER_DEGREES_PER_WIDTH;
    degrees.clamp(rotation_bounds::MIN, rotation_bounds::MAX)
}

// =============================================================================
// Zoom Bounds
// =============================================================================

/// Zoom factor bounds (0.1x to 5x).
pub mod zoom_bounds {
    /// Minimum zoom factor.
    pub const MIN: f32 = 0.1;
    /// Maximum zoom factor.
    pub const MAX: f32 = 5.0;
    /// Default zoom factor.
    pub const DEFAULT: f32 = 1.0;
}

// =============================================================================
// ZoomFactor
// =============================================================================

/// Preview zoom multiplier, guaranteed to be within valid range (0.1–5.0).
///
/// Zoom only affects how large the preview is displayed; it never changes
/// the rendered raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// Creates a new zoom factor, clamping the value to the valid range.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        if factor.is_nan() {
            return Self::default();
        }
        Self(factor.clamp(zoom_bounds::MIN, zoom_bounds::MAX))
    }

    /// Returns the raw multiplier.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether the zoom is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= zoom_bounds::MIN
    }

    /// Returns whether the zoom is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= zoom_bounds::MAX
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(zoom_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================
