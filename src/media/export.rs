// SPDX-License-Identifier: MPL-2.0
//! Encoding of final rasters.
//!
//! The editor never writes files itself; it encodes the natural-resolution
//! render into bytes and hands them to an [`Exporter`](crate::application::port::Exporter).

use crate::error::{Error, Result};
use crate::media::source::Raster;
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

/// JPEG quality bounds (percent).
pub mod quality_bounds {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG format (lossless).
    Png,
    /// JPEG format (lossy, no alpha).
    #[default]
    Jpeg,
    /// WebP format (lossless encoder).
    #[serde(rename = "webp")]
    WebP,
}

impl ExportFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::WebP => "webp",
        }
    }

    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::WebP => "image/webp",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
            ExportFormat::WebP => ImageFormat::WebP,
        }
    }

    /// Whether the encoder discards data.
    #[must_use]
    pub fn is_lossy(&self) -> bool {
        matches!(self, ExportFormat::Jpeg)
    }

    /// Returns all supported formats.
    #[must_use]
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::WebP]
    }

    /// Detects format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<ExportFormat> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "webp" => Some(ExportFormat::WebP),
            _ => None,
        }
    }

    /// Detects format from file path extension.
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Clamps a JPEG quality into `1..=100`.
#[must_use]
pub fn clamp_quality(quality: u8) -> u8 {
    quality.clamp(quality_bounds::MIN, quality_bounds::MAX)
}

/// Encodes `raster` into `format`.
///
/// `quality` only affects JPEG. JPEG has no alpha channel, so the raster is
/// flattened to RGB first.
///
/// # Errors
///
/// Returns [`Error::Save`] if the encoder fails.
pub fn encode(raster: &Raster, format: ExportFormat, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    let result = match format {
        ExportFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(raster.clone()).to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut bytes, clamp_quality(quality));
            encoder.encode_image(&rgb)
        }
        ExportFormat::Png | ExportFormat::WebP => raster.write_to(&mut bytes, format.image_format()),
    };
    result.map_err(|e| Error::Save(format!("Failed to encode {}: {e}", format.extension())))?;
    Ok(bytes.into_inner())
}

/// Generates a default filename for an edited image.
///
/// Format: `{stem}_edited.{ext}`
#[must_use]
pub fn generate_default_filename(identifier: &str, format: ExportFormat) -> String {
    let stem = Path::new(identifier)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("image");
    format!("{stem}_edited.{}", format.extension())
}
