// SPDX-License-Identifier: MPL-2.0
//! In-memory adapters for hosts that already hold image bytes, and for tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::application::port::{Ack, ExportMetadata, Exporter, ImageSource};
use crate::error::{Error, Result};
use crate::media::{export, Raster, SourceImage};

/// Serves encoded images from a map of identifier to bytes.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageSource {
    images: HashMap<String, Vec<u8>>,
}

impl MemoryImageSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identifier: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(identifier.into(), bytes);
    }

    #[must_use]
    pub fn with_image(mut self, identifier: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(identifier, bytes);
        self
    }
}

impl ImageSource for MemoryImageSource {
    fn load(&self, identifier: &str) -> Result<SourceImage> {
        let bytes = self
            .images
            .get(identifier)
            .ok_or_else(|| Error::Io(format!("Unknown image identifier: {identifier}")))?;
        SourceImage::decode(bytes)
    }

    fn contains(&self, identifier: &str) -> bool {
        self.images.contains_key(identifier)
    }
}

/// A save recorded by [`MemoryExporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedExport {
    pub location: String,
    pub bytes: Vec<u8>,
    pub dimensions: (u32, u32),
    pub metadata: ExportMetadata,
}

/// Encodes and keeps every save in memory.
#[derive(Debug, Default)]
pub struct MemoryExporter {
    saves: Mutex<Vec<SavedExport>>,
    failure: Option<String>,
}

impl MemoryExporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An exporter that rejects every save with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            saves: Mutex::default(),
            failure: Some(reason.into()),
        }
    }

    /// Saves recorded so far, oldest first.
    #[must_use]
    pub fn saved(&self) -> Vec<SavedExport> {
        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Exporter for MemoryExporter {
    fn save(&self, raster: &Raster, metadata: &ExportMetadata) -> Result<Ack> {
        if let Some(reason) = &self.failure {
            return Err(Error::Save(reason.clone()));
        }
        let bytes = export::encode(raster, metadata.format, metadata.quality)?;
        let mut saves = self.saves.lock().unwrap_or_else(PoisonError::into_inner);
        let location = format!(
            "memory://{}/{}",
            saves.len(),
            export::generate_default_filename(&metadata.identifier, metadata.format)
        );
        let ack = Ack {
            location: location.clone(),
            bytes_written: bytes.len(),
        };
        saves.push(SavedExport {
            location,
            bytes,
            dimensions: raster.dimensions(),
            metadata: metadata.clone(),
        });
        Ok(ack)
    }
}
