// SPDX-License-Identifier: MPL-2.0
//! The decoded source image of an editing session.

use crate::domain::geometry::Size;
use crate::error::{Error, Result};
use image_rs::{imageops::FilterType, DynamicImage, RgbaImage};
use std::sync::Arc;

/// An RGBA pixel buffer produced by the render pipeline.
pub type Raster = RgbaImage;

/// Immutable decoded image.
///
/// Pixels are shared behind an [`Arc`], so cloning a `SourceImage` (as every
/// history snapshot does) never copies pixel data. A crop bake replaces the
/// session's source wholesale; the buffer itself is never mutated.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: Arc<RgbaImage>,
}

impl SourceImage {
    /// Wraps an already decoded buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the buffer has a zero dimension.
    pub fn new(pixels: RgbaImage) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(Error::Decode(format!(
                "Invalid dimensions: {}x{}",
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self {
            pixels: Arc::new(pixels),
        })
    }

    /// Decodes encoded image bytes (PNG, JPEG, WebP, ...).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the bytes are not a supported image.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let dynamic =
            image_rs::load_from_memory(bytes).map_err(|err| Error::Decode(err.to_string()))?;
        Self::from_dynamic(&dynamic)
    }

    /// Converts any decoded image to the RGBA working format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the image has a zero dimension.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self> {
        Self::new(image.to_rgba8())
    }

    #[must_use]
    pub fn natural_width(&self) -> u32 {
        self.pixels.width()
    }

    #[must_use]
    pub fn natural_height(&self) -> u32 {
        self.pixels.height()
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.natural_width(), self.natural_height())
    }

    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Whether both handles point at the same pixel buffer.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// A copy whose longest side is at most `max_dimension`.
    ///
    /// Returns a cheap clone when the image already fits.
    #[must_use]
    pub fn downscaled(&self, max_dimension: u32) -> Self {
        let size = self.size();
        let max_dimension = max_dimension.max(1);
        if size.max_dimension() <= max_dimension {
            return self.clone();
        }

        let factor = f64::from(max_dimension) / f64::from(size.max_dimension());
        // Both values are bounded by the original dimensions, so the casts cannot overflow
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let width = (f64::from(size.width) * factor).round().max(1.0) as u32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let height = (f64::from(size.height) * factor).round().max(1.0) as u32;

        let resized = image_rs::imageops::resize(&*self.pixels, width, height, FilterType::Triangle);
        Self {
            pixels: Arc::new(resized),
        }
    }
}

impl PartialEq for SourceImage {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.size() == other.size() && self.pixels.as_raw() == other.pixels.as_raw())
    }
}

impl Eq for SourceImage {}
