// SPDX-License-Identifier: MPL-2.0
//! Stateless render pipeline.
//!
//! `render(source, transform, filters)` always runs the same composition:
//!
//! 1. color filters on a copy of the source pixels,
//! 2. rotation about the center onto a canvas grown to the rotated bounds,
//! 3. mirroring of the rotated canvas,
//! 4. a direct-sample crop of the composited raster, if one is set.
//!
//! The output is at natural resolution. Crop rectangles are always expressed
//! against the composited (post-rotation, post-flip) raster, which is also
//! what the user sees in the preview.
#![allow(clippy::cast_precision_loss)]

use crate::domain::editing::{FilterState, TransformState};
use crate::domain::geometry::{self, PixelRect, Rect, Size};
use crate::error::{Error, Result};
use crate::media::color_filter;
use crate::media::image_transform::{self, Sampling};
use crate::media::source::{Raster, SourceImage};

/// A preview raster and how it relates to the natural-resolution output.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    /// Rendered pixels, possibly smaller than natural resolution.
    pub raster: Raster,
    /// Size of the same render at natural resolution.
    pub natural: Size,
}

impl Preview {
    /// Preview pixels per natural pixel (1.0 when rendered at full size).
    #[must_use]
    pub fn scale(&self) -> f32 {
        if self.natural.width == 0 {
            return 1.0;
        }
        self.raster.width() as f32 / self.natural.width as f32
    }
}

/// Renders edit state into pixels. Holds configuration only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderPipeline {
    sampling: Sampling,
}

impl RenderPipeline {
    #[must_use]
    pub fn new(sampling: Sampling) -> Self {
        Self { sampling }
    }

    #[must_use]
    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Size of the composited raster (filters, rotation, flip; no crop).
    #[must_use]
    pub fn composited_dimensions(source: Size, transform: &TransformState) -> Size {
        image_transform::rotated_bounds(source, transform.rotation())
    }

    /// Size of the final render, including the crop.
    #[must_use]
    pub fn output_dimensions(source: Size, transform: &TransformState) -> Size {
        let composited = Self::composited_dimensions(source, transform);
        match transform.crop() {
            Some(crop) => geometry::snap_to_pixels(&Rect::from(crop), composited)
                .map_or(composited, |rect| rect.size()),
            None => composited,
        }
    }

    /// Composited raster: filters, then rotation, then mirroring.
    #[must_use]
    pub fn composite(
        &self,
        source: &SourceImage,
        transform: &TransformState,
        filters: &FilterState,
    ) -> Raster {
        let filtered = color_filter::apply(source.pixels(), filters);
        self.geometry(filtered, transform)
    }

    fn geometry(&self, image: Raster, transform: &TransformState) -> Raster {
        let mut out = if transform.rotation().is_rotated() {
            image_transform::rotate(&image, transform.rotation(), self.sampling)
        } else {
            image
        };
        if transform.flip_horizontal() {
            out = image_transform::flip_horizontal(&out);
        }
        if transform.flip_vertical() {
            out = image_transform::flip_vertical(&out);
        }
        out
    }

    /// Full render at natural resolution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCrop`] if the crop rectangle lies entirely
    /// outside the composited raster.
    pub fn render(
        &self,
        source: &SourceImage,
        transform: &TransformState,
        filters: &FilterState,
    ) -> Result<Raster> {
        let composited = self.composite(source, transform, filters);
        let out = match transform.crop() {
            Some(rect) => Self::crop_composited(&composited, rect)?,
            None => composited,
        };
        tracing::debug!(
            width = out.width(),
            height = out.height(),
            rotation = transform.rotation().value(),
            "rendered natural-resolution raster"
        );
        Ok(out)
    }

    fn crop_composited(composited: &Raster, rect: PixelRect) -> Result<Raster> {
        let bounds = Size::new(composited.width(), composited.height());
        let rect = geometry::snap_to_pixels(&Rect::from(rect), bounds).ok_or(Error::EmptyCrop)?;
        image_transform::crop(composited, rect).ok_or(Error::EmptyCrop)
    }

    /// Bakes `crop` into a new source image.
    ///
    /// Only geometry (rotation, flip, crop) is baked. Filters stay live edit
    /// state and are applied once, at render time, to the baked pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCrop`] if the crop does not cover any composited
    /// pixel.
    pub fn bake_crop(
        &self,
        source: &SourceImage,
        transform: &TransformState,
        crop: PixelRect,
    ) -> Result<SourceImage> {
        let composited = self.geometry(source.pixels().clone(), transform);
        let baked = Self::crop_composited(&composited, crop)?;
        tracing::info!(
            from_width = source.natural_width(),
            from_height = source.natural_height(),
            to_width = baked.width(),
            to_height = baked.height(),
            "baked crop into new source"
        );
        SourceImage::new(baked)
    }

    /// Renders a preview from a downscaled copy of the source.
    ///
    /// `preview_source` is normally `source.downscaled(max)`; the returned
    /// [`Preview::natural`] always describes the full-resolution render, so
    /// display-to-natural mapping stays exact regardless of preview size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCrop`] if the crop does not cover any pixel.
    pub fn render_preview(
        &self,
        source: &SourceImage,
        preview_source: &SourceImage,
        transform: &TransformState,
        filters: &FilterState,
    ) -> Result<Preview> {
        let natural = Self::output_dimensions(source.size(), transform);
        if preview_source.ptr_eq(source) {
            let raster = self.render(source, transform, filters)?;
            return Ok(Preview { raster, natural });
        }

        let factor = preview_source.natural_width() as f32 / source.natural_width() as f32;
        let mut scaled = transform.without_crop();
        if let Some(crop) = transform.crop() {
            let rect = Rect::from(crop);
            let rect = Rect::new(
                rect.x * factor,
                rect.y * factor,
                rect.width * factor,
                rect.height * factor,
            );
            let bounds = Self::composited_dimensions(preview_source.size(), transform);
            let snapped = geometry::snap_to_pixels(&rect, bounds).ok_or(Error::EmptyCrop)?;
            scaled = scaled.with_crop(snapped);
        }

        // Blur radius is in natural pixels
        let filters = filters.set(
            crate::domain::editing::FilterKey::Blur,
            filters.blur() * factor,
        );
        let raster = self.render(preview_source, &scaled, &filters)?;
        Ok(Preview { raster, natural })
    }
}
