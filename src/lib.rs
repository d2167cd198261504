// SPDX-License-Identifier: MPL-2.0
//! `dental_lens` is the non-destructive image editor core of a dental imaging
//! application.
//!
//! It composes rotation, mirroring, zoom, color filters, and interactive
//! cropping over an immutable source image, keeps display-space pointer input
//! and the image's natural pixel grid exactly aligned, and records every edit
//! in an undo/redo history. Final exports are always rendered at natural
//! resolution.
//!
//! # Layers
//!
//! - [`domain`]: Pure value types (geometry, transform and filter state)
//! - [`media`]: Pixel work (filters, rotation, crop, render pipeline, encoding)
//! - [`editor`]: Crop interaction, history, and the editor controller
//! - [`application`]: Collaborator ports and the async session loader
//! - [`infrastructure`]: Filesystem and in-memory adapters
//! - [`config`]: User preferences
//!
//! # Example
//!
//! ```
//! use dental_lens::config::EditorConfig;
//! use dental_lens::domain::editing::{FilterKey, RotateDirection};
//! use dental_lens::editor::EditorController;
//! use dental_lens::media::SourceImage;
//! use image_rs::RgbaImage;
//!
//! let source = SourceImage::new(RgbaImage::new(1000, 800)).expect("non-empty image");
//! let mut editor = EditorController::new(source, "bitewing.png", &EditorConfig::default());
//!
//! editor.rotate90(RotateDirection::Clockwise).expect("render");
//! editor.set_filter(FilterKey::Contrast, 500.0).expect("render");
//!
//! assert_eq!(editor.filters().contrast(), 200.0);
//! let raster = editor.export_final().expect("render");
//! assert_eq!(raster.dimensions(), (800, 1000));
//! ```

#![doc(html_root_url = "https://docs.rs/dental_lens/0.3.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod infrastructure;
pub mod media;
