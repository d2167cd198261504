// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines the collaborator interfaces the editor consumes.
//! Infrastructure adapters implement them; the editor core depends only on
//! these traits and its own types.
//!
//! # Available Ports
//!
//! - [`image_source`]: Resolving identifiers to decoded source images
//! - [`export`]: Persisting final rasters
//!
//! # Design Notes
//!
//! - Traits are `Send + Sync` so adapters can be shared with worker threads
//! - Methods are synchronous; async callers wrap them in `spawn_blocking`
//!
//! # Example
//!
//! ```
//! use dental_lens::application::port::ImageSource;
//! use dental_lens::error::Result;
//!
//! fn natural_size(source: &impl ImageSource, id: &str) -> Result<(u32, u32)> {
//!     let image = source.load(id)?;
//!     Ok((image.natural_width(), image.natural_height()))
//! }
//! ```

pub mod export;
pub mod image_source;

// Re-export main types for convenience
pub use export::{Ack, ExportMetadata, Exporter};
pub use image_source::ImageSource;
