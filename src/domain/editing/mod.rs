// SPDX-License-Identifier: MPL-2.0
//! Editing domain types.
//!
//! This module provides pure domain types for image editing operations:
//! - [`TransformState`]: Rotation, mirroring, zoom, and pending crop
//! - [`FilterState`]: The six color adjustments
//! - [`RotationDegrees`] / [`ZoomFactor`]: Range-checked scalars

pub mod filter;
pub mod newtypes;
pub mod transform;

pub use filter::{FilterKey, FilterState};
pub use newtypes::{rotation_from_ruler, RotationDegrees, ZoomFactor};
pub use transform::{FlipAxis, RotateDirection, TransformState};
