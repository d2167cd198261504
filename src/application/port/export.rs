// SPDX-License-Identifier: MPL-2.0
//! Export port definition.
//!
//! The editor calls [`Exporter::save`] with the natural-resolution render
//! produced by `export_final`. How and where it is persisted is up to the
//! adapter.

use crate::error::Result;
use crate::media::{ExportFormat, Raster};
use chrono::{DateTime, Utc};
use std::fmt;

// =============================================================================
// ExportMetadata
// =============================================================================

/// Describes a raster handed to an [`Exporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMetadata {
    /// Identifier the source image was loaded from.
    pub identifier: String,
    pub format: ExportFormat,
    /// Encoder quality in percent; only JPEG uses it.
    pub quality: u8,
    pub edited_at: DateTime<Utc>,
    /// Human-readable edits, e.g. `crop`, `rotate(90deg)`, `contrast(120%)`.
    pub operations: Vec<String>,
}

impl ExportMetadata {
    #[must_use]
    pub fn new(identifier: impl Into<String>, format: ExportFormat, quality: u8) -> Self {
        Self {
            identifier: identifier.into(),
            format,
            quality,
            edited_at: Utc::now(),
            operations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_operations(mut self, operations: Vec<String>) -> Self {
        self.operations = operations;
        self
    }
}

// =============================================================================
// Ack
// =============================================================================

/// Acknowledgement of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    /// Where the exporter stored the image (path, key, URL).
    pub location: String,
    pub bytes_written: usize,
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.location, self.bytes_written)
    }
}

// =============================================================================
// Exporter Trait
// =============================================================================

/// Persists final rasters.
pub trait Exporter: Send + Sync {
    /// Encodes and stores `raster`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Save`](crate::error::Error::Save) when the raster
    /// cannot be encoded or stored.
    fn save(&self, raster: &Raster, metadata: &ExportMetadata) -> Result<Ack>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_builder_sets_operations() {
        let metadata = ExportMetadata::new("scan.png", ExportFormat::Png, 90)
            .with_operations(vec!["crop".to_string()]);
        assert_eq!(metadata.identifier, "scan.png");
        assert_eq!(metadata.operations, vec!["crop".to_string()]);
        assert!(metadata.edited_at <= Utc::now());
    }

    #[test]
    fn ack_display_includes_size() {
        let ack = Ack {
            location: "out/scan_edited.jpg".to_string(),
            bytes_written: 1234,
        };
        assert_eq!(ack.to_string(), "out/scan_edited.jpg (1234 bytes)");
    }
}
