// SPDX-License-Identifier: MPL-2.0
//! Editor intent/event types re-exported by the facade.

use crate::domain::editing::{FilterKey, FlipAxis, RotateDirection};
use crate::domain::geometry::{Point, Rect};
use crate::editor::crop::{CropRatio, ReleaseOutcome};
use crate::media::Preview;

/// User intents the host UI forwards to the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Rotate90(RotateDirection),
    /// Absolute rotation in degrees.
    SetRotation(f32),
    /// Relative rotation in degrees.
    RotateBy(f32),
    /// Rotation ruler drag: `start_degrees` plus 60° per ruler width.
    RotationRuler {
        start_degrees: f32,
        delta_x: f32,
        ruler_width: f32,
    },
    ToggleFlip(FlipAxis),
    SetZoom(f32),
    SetFilter(FilterKey, f32),
    ResetFilters,
    Reset,
    /// The preview was (re)laid out at this display rectangle.
    PreviewLayout(Rect),
    SetCropRatio(CropRatio),
    SuggestCrop(CropRatio),
    StartCrop(Point),
    UpdateCrop(Point),
    ReleaseCrop,
    ConfirmCrop,
    CancelCrop,
    AbortCrop,
    Undo,
    Redo,
}

/// What the host should do after an intent was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Show this preview.
    Rendered(Preview),
    /// Redraw the crop overlay (display space).
    CropRect(Option<Rect>),
    CropReleased(ReleaseOutcome),
}
