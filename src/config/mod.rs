// SPDX-License-Identifier: MPL-2.0
//! This module handles the editor's configuration, including loading and saving
//! user preferences to an `editor.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use dental_lens::config::{self, EditorConfig};
//! use dental_lens::media::ExportFormat;
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.export_format = ExportFormat::Png;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_file = PathBuf::from("./temp_config_dir/editor.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded.export_format, ExportFormat::Png);
//! ```

pub mod defaults;

use crate::editor::CropRatio;
use crate::error::Result;
use crate::media::{ExportFormat, Sampling};
use defaults::{
    DEFAULT_HISTORY_DEPTH, DEFAULT_JPEG_QUALITY, DEFAULT_PREVIEW_MAX_DIMENSION, MAX_JPEG_QUALITY,
    MAX_PREVIEW_MAX_DIMENSION, MIN_JPEG_QUALITY, MIN_PREVIEW_MAX_DIMENSION,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "editor.toml";
const APP_NAME: &str = "DentalLens";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum undo steps kept; unbounded when absent.
    pub history_depth: Option<usize>,
    pub preview_max_dimension: u32,
    pub rotation_sampling: Sampling,
    pub default_crop_ratio: CropRatio,
    pub export_format: ExportFormat,
    pub jpeg_quality: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            preview_max_dimension: DEFAULT_PREVIEW_MAX_DIMENSION,
            rotation_sampling: Sampling::default(),
            default_crop_ratio: CropRatio::default(),
            export_format: ExportFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl EditorConfig {
    /// Returns a copy with out-of-range values clamped.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.preview_max_dimension = self
            .preview_max_dimension
            .clamp(MIN_PREVIEW_MAX_DIMENSION, MAX_PREVIEW_MAX_DIMENSION);
        self.jpeg_quality = self.jpeg_quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY);
        self
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the user configuration, or defaults when none exists.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load() -> Result<EditorConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(EditorConfig::default())
}

/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &EditorConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads a configuration file. Invalid TOML falls back to defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_from_path(path: &Path) -> Result<EditorConfig> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str::<EditorConfig>(&content).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "invalid editor config, using defaults");
        EditorConfig::default()
    });
    Ok(config.sanitized())
}

/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_to_path(config: &EditorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_fields() {
        let config = EditorConfig {
            history_depth: Some(25),
            preview_max_dimension: 1024,
            rotation_sampling: Sampling::Nearest,
            default_crop_ratio: CropRatio::Photo,
            export_format: ExportFormat::WebP,
            jpeg_quality: 80,
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("editor.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("editor.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, EditorConfig::default());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("editor.toml");
        fs::write(&config_path, "export_format = \"png\"\n").expect("write");

        let loaded = load_from_path(&config_path).expect("load");
        assert_eq!(loaded.export_format, ExportFormat::Png);
        assert_eq!(loaded.jpeg_quality, DEFAULT_JPEG_QUALITY);
        assert_eq!(loaded.history_depth, None);
        assert_eq!(loaded.rotation_sampling, Sampling::Bilinear);
    }

    #[test]
    fn out_of_range_values_are_clamped_on_load() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("editor.toml");
        fs::write(
            &config_path,
            "preview_max_dimension = 12\njpeg_quality = 0\n",
        )
        .expect("write");

        let loaded = load_from_path(&config_path).expect("load");
        assert_eq!(loaded.preview_max_dimension, MIN_PREVIEW_MAX_DIMENSION);
        assert_eq!(loaded.jpeg_quality, MIN_JPEG_QUALITY);
    }

    #[test]
    fn load_from_missing_path_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let err = load_from_path(&temp_dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("editor.toml");

        save_to_path(&EditorConfig::default(), &config_path)
            .expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn default_config_matches_documented_values() {
        let config = EditorConfig::default();
        assert_eq!(config.preview_max_dimension, 1600);
        assert_eq!(config.jpeg_quality, 95);
        assert_eq!(config.export_format, ExportFormat::Jpeg);
        assert_eq!(config.default_crop_ratio, CropRatio::Free);
    }
}
