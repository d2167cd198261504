// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for editor configuration.
//!
//! # Categories
//!
//! - **Preview**: Downscaled preview rendering bounds
//! - **History**: Undo depth
//! - **Export**: Encoder quality

// ==========================================================================
// Preview Defaults
// ==========================================================================

/// Default longest side of the preview raster, in pixels.
pub const DEFAULT_PREVIEW_MAX_DIMENSION: u32 = 1600;

/// Minimum preview size. Smaller previews make crop handles imprecise.
pub const MIN_PREVIEW_MAX_DIMENSION: u32 = 256;

/// Maximum preview size.
pub const MAX_PREVIEW_MAX_DIMENSION: u32 = 8192;

// ==========================================================================
// History Defaults
// ==========================================================================

/// Default undo depth (`None` = unbounded).
pub const DEFAULT_HISTORY_DEPTH: Option<usize> = None;

// ==========================================================================
// Export Defaults
// ==========================================================================

/// Default JPEG quality (percent).
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Minimum JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;
