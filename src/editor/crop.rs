// SPDX-License-Identifier: MPL-2.0
//! Crop tool interaction state.
//!
//! A [`CropSession`] reads pointer positions in display space and only
//! converts to natural space on confirm, against the composited raster that
//! the preview actually shows.

use crate::domain::geometry::{self, PixelRect, Point, Rect, Size};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Share of the preview covered by a suggested crop.
const SUGGESTED_COVERAGE: f32 = 0.8;

/// Crop aspect ratio constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropRatio {
    #[default]
    Free,
    Square,        // 1:1
    Landscape,     // 16:9
    Portrait,      // 9:16
    Photo,         // 4:3
    PhotoPortrait, // 3:4
}

impl CropRatio {
    /// Width divided by height, or `None` when unconstrained.
    #[must_use]
    pub fn aspect(self) -> Option<f32> {
        match self {
            CropRatio::Free => None,
            CropRatio::Square => Some(1.0),
            CropRatio::Landscape => Some(16.0 / 9.0),
            CropRatio::Portrait => Some(9.0 / 16.0),
            CropRatio::Photo => Some(4.0 / 3.0),
            CropRatio::PhotoPortrait => Some(3.0 / 4.0),
        }
    }

    #[must_use]
    pub fn all() -> &'static [CropRatio] {
        &[
            CropRatio::Free,
            CropRatio::Square,
            CropRatio::Landscape,
            CropRatio::Portrait,
            CropRatio::Photo,
            CropRatio::PhotoPortrait,
        ]
    }
}

/// Where the crop interaction currently is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CropPhase {
    #[default]
    Idle,
    /// Pointer is down. Both points are in display space.
    Dragging { anchor: Point, current: Point },
    /// A non-empty rectangle waits for confirm or cancel.
    PendingConfirm { rect: Rect },
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    Pending(Rect),
    /// Zero-area drag; the session went back to idle.
    Discarded,
    /// No drag was in progress.
    Ignored,
}

/// Result of resolving a pending rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropOutcome {
    /// Natural-space rectangle on the composited raster.
    Committed(PixelRect),
    Cancelled,
    /// Nothing was pending.
    Ignored,
}

/// Crop interaction state machine:
/// `Idle -> Dragging -> PendingConfirm -> (Committed | Cancelled) -> Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CropSession {
    phase: CropPhase,
    ratio: CropRatio,
    /// Display rectangle of the rendered preview, once laid out.
    bounds: Option<Rect>,
}

impl CropSession {
    #[must_use]
    pub fn new(ratio: CropRatio) -> Self {
        Self {
            ratio,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn phase(&self) -> CropPhase {
        self.phase
    }

    #[must_use]
    pub fn ratio(&self) -> CropRatio {
        self.ratio
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == CropPhase::Idle
    }

    /// Rectangle currently drawn, if any, in display space.
    #[must_use]
    pub fn display_rect(&self) -> Option<Rect> {
        match self.phase {
            CropPhase::Idle => None,
            CropPhase::Dragging { anchor, current } => Some(self.constrain(anchor, current)),
            CropPhase::PendingConfirm { rect } => Some(rect),
        }
    }

    /// Records the measured display rectangle of the preview.
    ///
    /// An empty rectangle means the preview is not laid out.
    pub fn set_layout(&mut self, bounds: Rect) {
        self.bounds = (!bounds.is_empty()).then_some(bounds);
    }

    /// Changes the aspect constraint. A pending rectangle is re-fitted.
    pub fn set_ratio(&mut self, ratio: CropRatio) {
        self.ratio = ratio;
        if let CropPhase::PendingConfirm { rect } = self.phase {
            let anchor = rect.origin();
            let corner = Point::new(rect.right(), rect.bottom());
            let rect = self.constrain(anchor, corner);
            self.phase = if rect.is_empty() {
                CropPhase::Idle
            } else {
                CropPhase::PendingConfirm { rect }
            };
        }
    }

    /// Forgets the preview rectangle, e.g. after the composited size changed.
    pub fn clear_layout(&mut self) {
        self.bounds = None;
    }

    fn layout(&self) -> Result<Rect> {
        self.bounds.ok_or(Error::LayoutNotReady)
    }

    /// Starts a new drag at `point`, discarding any stale rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutNotReady`] before [`set_layout`](Self::set_layout)
    /// has recorded a non-empty preview rectangle.
    pub fn start_drag(&mut self, point: Point) -> Result<()> {
        let bounds = self.layout()?;
        let anchor = bounds.clamp_point(point);
        self.phase = CropPhase::Dragging {
            anchor,
            current: anchor,
        };
        Ok(())
    }

    /// Moves the free corner of the drag. Returns the constrained rectangle,
    /// or `None` when no drag is in progress.
    pub fn update_drag(&mut self, point: Point) -> Option<Rect> {
        let CropPhase::Dragging { anchor, .. } = self.phase else {
            return None;
        };
        self.phase = CropPhase::Dragging {
            anchor,
            current: point,
        };
        Some(self.constrain(anchor, point))
    }

    /// Ends the drag. A zero-area rectangle is a no-op that returns to idle.
    pub fn release(&mut self) -> ReleaseOutcome {
        let CropPhase::Dragging { anchor, current } = self.phase else {
            return ReleaseOutcome::Ignored;
        };
        let rect = self.constrain(anchor, current);
        if rect.is_empty() {
            self.phase = CropPhase::Idle;
            ReleaseOutcome::Discarded
        } else {
            self.phase = CropPhase::PendingConfirm { rect };
            ReleaseOutcome::Pending(rect)
        }
    }

    /// Places a centered rectangle covering most of the preview and goes
    /// straight to `PendingConfirm`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutNotReady`] without a measured preview.
    pub fn suggest(&mut self, ratio: CropRatio) -> Result<Rect> {
        let bounds = self.layout()?;
        self.ratio = ratio;

        let mut width = bounds.width * SUGGESTED_COVERAGE;
        let mut height = match ratio.aspect() {
            Some(aspect) => width / aspect,
            None => bounds.height * SUGGESTED_COVERAGE,
        };
        if height > bounds.height {
            height = bounds.height * SUGGESTED_COVERAGE;
            if let Some(aspect) = ratio.aspect() {
                width = height * aspect;
            }
        }

        let rect = Rect::new(
            bounds.x + (bounds.width - width) / 2.0,
            bounds.y + (bounds.height - height) / 2.0,
            width,
            height,
        );
        self.phase = CropPhase::PendingConfirm { rect };
        Ok(rect)
    }

    /// Converts the pending rectangle into natural space on a composited
    /// raster of `natural` size and returns to idle.
    ///
    /// # Errors
    ///
    /// - [`Error::LayoutNotReady`] without a measured preview (state is kept).
    /// - [`Error::EmptyCrop`] if the rectangle snaps to zero pixels (the
    ///   session still returns to idle).
    pub fn confirm(&mut self, natural: Size) -> Result<CropOutcome> {
        let CropPhase::PendingConfirm { rect } = self.phase else {
            return Ok(CropOutcome::Ignored);
        };
        let bounds = self.layout()?;
        self.phase = CropPhase::Idle;

        let mapped = geometry::rect_to_natural(&rect, &bounds, natural)?;
        let pixels = geometry::snap_to_pixels(&mapped, natural).ok_or(Error::EmptyCrop)?;
        tracing::debug!(
            x = pixels.x,
            y = pixels.y,
            width = pixels.width,
            height = pixels.height,
            "crop confirmed"
        );
        Ok(CropOutcome::Committed(pixels))
    }

    /// Discards a pending or in-progress rectangle.
    pub fn cancel(&mut self) -> CropOutcome {
        if self.is_idle() {
            return CropOutcome::Ignored;
        }
        self.phase = CropPhase::Idle;
        CropOutcome::Cancelled
    }

    /// Returns to idle from any state without side effects.
    pub fn abort(&mut self) {
        self.phase = CropPhase::Idle;
    }

    /// Rectangle spanned by `anchor` and `current`, clamped to the preview and
    /// shrunk to the aspect constraint while staying pinned to the anchor.
    fn constrain(&self, anchor: Point, current: Point) -> Rect {
        let current = match self.bounds {
            Some(bounds) => bounds.clamp_point(current),
            None => current,
        };
        let rect = Rect::from_corners(anchor, current);
        let Some(aspect) = self.ratio.aspect() else {
            return rect;
        };
        if rect.is_empty() {
            return rect;
        }

        let (width, height) = if rect.width / rect.height > aspect {
            (rect.height * aspect, rect.height)
        } else {
            (rect.width, rect.width / aspect)
        };
        let x = if current.x < anchor.x {
            anchor.x - width
        } else {
            anchor.x
        };
        let y = if current.y < anchor.y {
            anchor.y - height
        } else {
            anchor.y
        };
        Rect::new(x, y, width, height)
    }
}
