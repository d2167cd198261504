// SPDX-License-Identifier: MPL-2.0
//! Pixel work for the editor.
//!
//! Everything here operates on decoded RGBA buffers from the `image` crate.
//! None of it knows about history, crop interaction, or where images come from.

pub mod color_filter;
pub mod export;
pub mod image_transform;
pub mod pipeline;
pub mod source;

pub use export::{encode, ExportFormat};
pub use image_transform::Sampling;
pub use pipeline::{Preview, RenderPipeline};
pub use source::{Raster, SourceImage};

/// Image extensions the editor can open.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "tiff", "tif"];

/// Checks if a file path has an extension the editor can open.
#[must_use]
pub fn is_supported_image<P: AsRef<std::path::Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_supported_image_formats() {
        assert!(is_supported_image("bitewing.jpg"));
        assert!(is_supported_image("panoramic.PNG"));
        assert!(is_supported_image(PathBuf::from("/records/7/intraoral.tif")));
    }

    #[test]
    fn test_unsupported_formats() {
        assert!(!is_supported_image("jaw.stl"));
        assert!(!is_supported_image("scan.ply"));
        assert!(!is_supported_image("no_extension"));
    }
}
