// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`filesystem`]: Files below a root directory (implements [`ImageSource`] and [`Exporter`])
//! - [`memory`]: In-memory bytes and recorded saves (implements [`ImageSource`] and [`Exporter`])
//!
//! [`ImageSource`]: crate::application::port::ImageSource
//! [`Exporter`]: crate::application::port::Exporter

pub mod filesystem;
pub mod memory;

// Re-export main types for convenience
pub use filesystem::{FsExporter, FsImageSource};
pub use memory::{MemoryExporter, MemoryImageSource, SavedExport};
