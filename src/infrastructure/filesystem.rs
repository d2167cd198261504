// SPDX-License-Identifier: MPL-2.0
//! Filesystem adapters for the [`ImageSource`] and [`Exporter`] ports.
//!
//! Identifiers are paths relative to a root directory. Absolute paths and
//! `..` components are rejected so an identifier can never escape the root.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::application::port::{Ack, ExportMetadata, Exporter, ImageSource};
use crate::error::{Error, Result};
use crate::media::{export, Raster, SourceImage};

fn resolve(root: &Path, identifier: &str) -> Result<PathBuf> {
    let relative = Path::new(identifier);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if identifier.is_empty() || escapes {
        return Err(Error::Io(format!("Invalid image identifier: {identifier}")));
    }
    Ok(root.join(relative))
}

// =============================================================================
// FsImageSource
// =============================================================================

/// Loads images from files below a root directory.
#[derive(Debug, Clone)]
pub struct FsImageSource {
    root: PathBuf,
}

impl FsImageSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageSource for FsImageSource {
    fn load(&self, identifier: &str) -> Result<SourceImage> {
        let path = resolve(&self.root, identifier)?;
        let bytes = fs::read(&path)?;
        let image = SourceImage::decode(&bytes)?;
        tracing::info!(
            path = %path.display(),
            width = image.natural_width(),
            height = image.natural_height(),
            "loaded source image"
        );
        Ok(image)
    }

    fn contains(&self, identifier: &str) -> bool {
        resolve(&self.root, identifier).is_ok_and(|path| path.is_file())
    }
}

// =============================================================================
// FsExporter
// =============================================================================

/// Writes encoded rasters as `<dir>/<stem>_edited.<ext>`.
#[derive(Debug, Clone)]
pub struct FsExporter {
    dir: PathBuf,
}

impl FsExporter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path a save with `metadata` would write to.
    #[must_use]
    pub fn target_path(&self, metadata: &ExportMetadata) -> PathBuf {
        self.dir.join(export::generate_default_filename(
            &metadata.identifier,
            metadata.format,
        ))
    }
}

impl Exporter for FsExporter {
    fn save(&self, raster: &Raster, metadata: &ExportMetadata) -> Result<Ack> {
        let bytes = export::encode(raster, metadata.format, metadata.quality)?;
        let path = self.target_path(metadata);
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(&path, &bytes))
            .map_err(|e| Error::Save(format!("Failed to write {}: {e}", path.display())))?;
        Ok(Ack {
            location: path.display().to_string(),
            bytes_written: bytes.len(),
        })
    }
}
