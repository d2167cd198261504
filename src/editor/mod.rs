// SPDX-License-Identifier: MPL-2.0
//! Image editor with rotate, flip, color filters, and crop.
//!
//! This module follows a "state down, intents up" pattern. The editor works on
//! an immutable [`SourceImage`] plus the current `(TransformState,
//! FilterState)` pair and never touches the loaded image; a confirmed crop
//! replaces the working source with a baked copy. Nothing is persisted until
//! the host explicitly calls [`EditorController::save`].

mod crop;
mod history;
mod messages;

pub use crop::{CropOutcome, CropPhase, CropRatio, CropSession, ReleaseOutcome};
pub use history::HistoryStack;
pub use messages::{Event, Intent};

use crate::application::port::{Ack, ExportMetadata, Exporter};
use crate::config::EditorConfig;
use crate::domain::editing::{
    rotation_from_ruler, FilterKey, FilterState, FlipAxis, RotateDirection, TransformState,
};
use crate::domain::geometry::{Point, Rect, Size};
use crate::error::{Error, Result};
use crate::media::{ExportFormat, Preview, Raster, RenderPipeline, SourceImage};

/// One history entry: the edit state and the source it applies to.
///
/// The source is a shared handle, so undoing a crop restores the pixels it
/// replaced without copying them.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub transform: TransformState,
    pub filters: FilterState,
    pub source: SourceImage,
}

impl Snapshot {
    fn initial(source: SourceImage) -> Self {
        Self {
            transform: TransformState::identity(),
            filters: FilterState::identity(),
            source,
        }
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.transform == other.transform
            && self.filters == other.filters
            && self.source.ptr_eq(&other.source)
    }
}

/// State of one editing session.
///
/// Created once the source image is loaded; discarded on close. There is no
/// autosave.
#[derive(Debug, Clone)]
pub struct EditSession {
    identifier: String,
    /// Image as loaded, for [`EditorController::reset`].
    original: SourceImage,
    history: HistoryStack<Snapshot>,
    /// Snapshot at load or at the last successful save.
    saved: Snapshot,
}

impl EditSession {
    #[must_use]
    pub fn new(source: SourceImage, identifier: impl Into<String>, history_depth: Option<usize>) -> Self {
        let initial = Snapshot::initial(source.clone());
        Self {
            identifier: identifier.into(),
            original: source,
            history: HistoryStack::with_depth(initial.clone(), history_depth),
            saved: initial,
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn original(&self) -> &SourceImage {
        &self.original
    }

    #[must_use]
    pub fn current(&self) -> &Snapshot {
        self.history.current()
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStack<Snapshot> {
        &self.history
    }
}

/// Coordinates history, crop interaction, and rendering for one session.
///
/// Every mutating operation computes the next snapshot, records it in
/// history and returns a fresh preview.
#[derive(Debug, Clone)]
pub struct EditorController {
    session: EditSession,
    crop: CropSession,
    pipeline: RenderPipeline,
    preview_max_dimension: u32,
    /// Full-resolution source the cached preview source was derived from.
    preview_base: SourceImage,
    preview_source: SourceImage,
    export_format: ExportFormat,
    jpeg_quality: u8,
}

impl EditorController {
    /// Opens an editor on an already decoded image.
    #[must_use]
    pub fn new(source: SourceImage, identifier: impl Into<String>, config: &EditorConfig) -> Self {
        let config = config.clone().sanitized();
        let identifier = identifier.into();
        tracing::info!(
            identifier = %identifier,
            width = source.natural_width(),
            height = source.natural_height(),
            "opened edit session"
        );
        let preview_source = source.downscaled(config.preview_max_dimension);
        Self {
            session: EditSession::new(source.clone(), identifier, config.history_depth),
            crop: CropSession::new(config.default_crop_ratio),
            pipeline: RenderPipeline::new(config.rotation_sampling),
            preview_max_dimension: config.preview_max_dimension,
            preview_base: source,
            preview_source,
            export_format: config.export_format,
            jpeg_quality: config.jpeg_quality,
        }
    }

    /// Routes a host intent to the matching operation.
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation the intent maps to.
    pub fn update(&mut self, intent: Intent) -> Result<Event> {
        let event = match intent {
            Intent::Rotate90(direction) => Event::Rendered(self.rotate90(direction)?),
            Intent::SetRotation(degrees) => Event::Rendered(self.set_rotation(degrees)?),
            Intent::RotateBy(delta) => Event::Rendered(self.rotate_by(delta)?),
            Intent::RotationRuler {
                start_degrees,
                delta_x,
                ruler_width,
            } => Event::Rendered(self.set_rotation(rotation_from_ruler(
                start_degrees,
                delta_x,
                ruler_width,
            ))?),
            Intent::ToggleFlip(axis) => Event::Rendered(self.toggle_flip(axis)?),
            Intent::SetZoom(zoom) => Event::Rendered(self.set_zoom(zoom)?),
            Intent::SetFilter(key, value) => Event::Rendered(self.set_filter(key, value)?),
            Intent::ResetFilters => Event::Rendered(self.reset_filters()?),
            Intent::Reset => Event::Rendered(self.reset()?),
            Intent::PreviewLayout(rect) => {
                self.set_preview_layout(rect);
                Event::None
            }
            Intent::SetCropRatio(ratio) => {
                self.crop.set_ratio(ratio);
                Event::CropRect(self.crop.display_rect())
            }
            Intent::SuggestCrop(ratio) => Event::CropRect(Some(self.suggest_crop(ratio)?)),
            Intent::StartCrop(point) => {
                self.start_crop(point)?;
                Event::CropRect(self.crop.display_rect())
            }
            Intent::UpdateCrop(point) => Event::CropRect(self.update_crop(point)),
            Intent::ReleaseCrop => Event::CropReleased(self.release_crop()),
            Intent::ConfirmCrop => Event::Rendered(self.confirm_crop()?),
            Intent::CancelCrop => {
                self.cancel_crop();
                Event::CropRect(None)
            }
            Intent::AbortCrop => {
                self.abort_crop();
                Event::CropRect(None)
            }
            Intent::Undo => Event::Rendered(self.undo()?),
            Intent::Redo => Event::Rendered(self.redo()?),
        };
        Ok(event)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    #[must_use]
    pub fn transform(&self) -> &TransformState {
        &self.session.current().transform
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.session.current().filters
    }

    /// Working source (the loaded image, or the last baked crop).
    #[must_use]
    pub fn source(&self) -> &SourceImage {
        &self.session.current().source
    }

    #[must_use]
    pub fn crop_session(&self) -> &CropSession {
        &self.crop
    }

    #[must_use]
    pub fn pipeline(&self) -> RenderPipeline {
        self.pipeline
    }

    /// Whether an undo operation is currently possible.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.session.history.can_undo()
    }

    /// Whether a redo operation is currently possible.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.session.history.can_redo()
    }

    /// Returns true when the current state differs from the last save (or load).
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        *self.session.current() != self.session.saved
    }

    /// Natural size of the current render; crop rectangles live on this grid.
    #[must_use]
    pub fn output_dimensions(&self) -> Size {
        RenderPipeline::output_dimensions(self.source().size(), self.transform())
    }

    // =========================================================================
    // Geometry and filters
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the preview cannot be rendered.
    pub fn rotate90(&mut self, direction: RotateDirection) -> Result<Preview> {
        self.edit_transform(|t| t.rotate90(direction))
    }

    /// Sets an absolute rotation in degrees (wrapped into `[-180, 180)`).
    ///
    /// # Errors
    ///
    /// Returns an error if the preview cannot be rendered.
    pub fn set_rotation(&mut self, degrees: f32) -> Result<Preview> {
        self.edit_transform(|t| t.with_rotation(degrees))
    }

    /// # Errors
    ///
    /// Returns an error if the preview cannot be rendered.
    pub fn rotate_by(&mut self, delta: f32) -> Result<Preview> {
        self.edit_transform(|t| t.rotate(delta))
    }

    /// # Errors
    ///
    /// Returns an error if the preview cannot be rendered.
    pub fn toggle_flip(&mut self, axis: FlipAxis) -> Result<Preview> {
        self.edit_transform(|t| t.flip(axis))
    }

    /// Zoom is display-only: it is recorded in history but never changes
    /// rendered pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the preview cannot be rendered.
    pub fn set_zoom(&mut self, zoom: f32) -> Result<Preview> {
        self.edit_transform(|t| t.set_zoom(zoom))
    }

    /// Sets one filter, clamped to its range.
    ///
    /// # Errors
    ///
    /// Returns an error if the preview cannot be rendered.
    pub fn set_filter(&mut self, key: FilterKey, value: f32) -> Result<Preview> {
        let mut next = self.session.current().clone();
        next.filters = next.filters.set(key, value);
        self.commit(next)
    }

    /// Returns all six filters to identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the preview cannot be rendered.
    pub fn reset_filters(&mut self) -> Result<Preview> {
        let mut next = self.session.current().clone();
        next.filters = FilterState::identity();
        self.commit(next)
    }

    /// Restores the image as loaded with identity edits. Undoable.
    ///
    /// # Errors
    ///
    /// Returns an error if the preview cannot be rendered.
    pub fn reset(&mut self) -> Result<Preview> {
        self.commit(Snapshot::initial(self.session.original.clone()))
    }

    fn edit_transform(&mut self, f: impl FnOnce(TransformState) -> TransformState) -> Result<Preview> {
        let mut next = self.session.current().clone();
        next.transform = f(next.transform);
        self.commit(next)
    }

    fn commit(&mut self, next: Snapshot) -> Result<Preview> {
        let current = self.session.current();
        if next == *current {
            return self.preview();
        }

        let geometry_changed = !next.source.ptr_eq(&current.source)
            || next.transform.without_crop().set_zoom(1.0)
                != current.transform.without_crop().set_zoom(1.0);
        let dimensions_before = self.output_dimensions();

        self.session.history.push(next);
        tracing::debug!(
            undo_steps = self.session.history.undo_len(),
            "recorded edit"
        );
        self.after_state_change(geometry_changed, dimensions_before);
        self.preview()
    }

    /// Keeps crop interaction and the preview cache consistent with a new
    /// current snapshot.
    fn after_state_change(&mut self, geometry_changed: bool, dimensions_before: Size) {
        if geometry_changed && !self.crop.is_idle() {
            tracing::debug!("geometry changed, aborting crop interaction");
            self.crop.abort();
        }
        if self.output_dimensions() != dimensions_before {
            self.crop.clear_layout();
        }
        if !self.preview_base.ptr_eq(self.source()) {
            self.preview_base = self.source().clone();
            self.preview_source = self.preview_base.downscaled(self.preview_max_dimension);
        }
    }

    // =========================================================================
    // History
    // =========================================================================

    /// # Errors
    ///
    /// Returns [`Error::HistoryEmpty`] when there is nothing to undo; the
    /// current state is unchanged.
    pub fn undo(&mut self) -> Result<Preview> {
        self.step_history(HistoryStack::undo)
    }

    /// # Errors
    ///
    /// Returns [`Error::HistoryEmpty`] when there is nothing to redo; the
    /// current state is unchanged.
    pub fn redo(&mut self) -> Result<Preview> {
        self.step_history(HistoryStack::redo)
    }

    fn step_history(
        &mut self,
        step: fn(&mut HistoryStack<Snapshot>) -> Result<&Snapshot>,
    ) -> Result<Preview> {
        let before = self.session.current().clone();
        let dimensions_before = self.output_dimensions();
        step(&mut self.session.history)?;

        let current = self.session.current();
        let geometry_changed =
            !before.source.ptr_eq(&current.source) || before.transform != current.transform;
        tracing::debug!(
            undo_steps = self.session.history.undo_len(),
            redo_steps = self.session.history.redo_len(),
            "moved through history"
        );
        self.after_state_change(geometry_changed, dimensions_before);
        self.preview()
    }

    // =========================================================================
    // Crop
    // =========================================================================

    /// Records where the preview is laid out, in display space.
    pub fn set_preview_layout(&mut self, display: Rect) {
        self.crop.set_layout(display);
    }

    pub fn set_crop_ratio(&mut self, ratio: CropRatio) {
        self.crop.set_ratio(ratio);
    }

    /// # Errors
    ///
    /// Returns [`Error::LayoutNotReady`] before the preview is laid out.
    pub fn suggest_crop(&mut self, ratio: CropRatio) -> Result<Rect> {
        self.crop.suggest(ratio)
    }

    /// # Errors
    ///
    /// Returns [`Error::LayoutNotReady`] before the preview is laid out.
    pub fn start_crop(&mut self, point: Point) -> Result<()> {
        self.crop.start_drag(point)
    }

    pub fn update_crop(&mut self, point: Point) -> Option<Rect> {
        self.crop.update_drag(point)
    }

    pub fn release_crop(&mut self) -> ReleaseOutcome {
        self.crop.release()
    }

    /// Bakes the pending crop into a new source and resets geometry.
    ///
    /// Filters are kept as live state. An empty or missing crop is a no-op
    /// that returns the unchanged preview.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutNotReady`] before the preview is laid out, or a
    /// render error.
    pub fn confirm_crop(&mut self) -> Result<Preview> {
        let natural = self.output_dimensions();
        let rect = match self.crop.confirm(natural) {
            Ok(CropOutcome::Committed(rect)) => rect,
            Ok(_) => return self.preview(),
            Err(Error::EmptyCrop) => {
                tracing::debug!("ignoring empty crop");
                return self.preview();
            }
            Err(err) => return Err(err),
        };

        let current = self.session.current();
        let baked = self
            .pipeline
            .bake_crop(&current.source, &current.transform, rect)?;
        let next = Snapshot {
            transform: TransformState::identity(),
            filters: current.filters,
            source: baked,
        };
        self.commit(next)
    }

    pub fn cancel_crop(&mut self) -> CropOutcome {
        self.crop.cancel()
    }

    /// Drops any crop interaction without side effects.
    pub fn abort_crop(&mut self) {
        self.crop.abort();
    }

    // =========================================================================
    // Rendering and export
    // =========================================================================

    /// Renders the current state from the downscaled preview source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCrop`] if the transform carries a crop that
    /// covers nothing.
    pub fn preview(&self) -> Result<Preview> {
        let current = self.session.current();
        self.pipeline.render_preview(
            &current.source,
            &self.preview_source,
            &current.transform,
            &current.filters,
        )
    }

    /// Renders the current state at natural resolution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCrop`] if the transform carries a crop that
    /// covers nothing.
    pub fn export_final(&self) -> Result<Raster> {
        let current = self.session.current();
        self.pipeline
            .render(&current.source, &current.transform, &current.filters)
    }

    /// Human-readable list of the edits in the current state.
    #[must_use]
    pub fn operations(&self) -> Vec<String> {
        let current = self.session.current();
        let mut operations = Vec::new();
        if !current.source.ptr_eq(&self.session.original) {
            operations.push("crop".to_string());
        }
        let rotation = current.transform.rotation();
        if rotation.is_rotated() {
            operations.push(format!("rotate({}deg)", rotation.value()));
        }
        if current.transform.flip_horizontal() {
            operations.push("flip-horizontal".to_string());
        }
        if current.transform.flip_vertical() {
            operations.push("flip-vertical".to_string());
        }
        for key in FilterKey::ALL {
            if current.filters.is_identity_for(key) {
                continue;
            }
            let value = current.filters.get(key);
            operations.push(match key {
                FilterKey::Blur => format!("blur({value}px)"),
                _ => format!("{key}({value}%)"),
            });
        }
        operations
    }

    #[must_use]
    pub fn export_metadata(&self) -> ExportMetadata {
        ExportMetadata::new(
            self.session.identifier.clone(),
            self.export_format,
            self.jpeg_quality,
        )
        .with_operations(self.operations())
    }

    /// Renders at natural resolution and hands the raster to `exporter`.
    ///
    /// Clears [`has_unsaved_changes`](Self::has_unsaved_changes) on success.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Save`] if the exporter rejects the raster, or a render
    /// error.
    pub fn save(&mut self, exporter: &dyn Exporter) -> Result<Ack> {
        let raster = self.export_final()?;
        let metadata = self.export_metadata();
        let ack = exporter
            .save(&raster, &metadata)
            .inspect_err(|err| tracing::warn!(%err, "saving edited image failed"))?;
        self.session.saved = self.session.current().clone();
        tracing::info!(
            location = %ack.location,
            bytes = ack.bytes_written,
            "saved edited image"
        );
        Ok(ack)
    }
}

#[cfg(test)]
mod tests;
