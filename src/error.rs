// SPDX-License-Identifier: MPL-2.0
use crate::domain::error::GeometryError;
use std::fmt;

/// Direction of a history move, for [`Error::HistoryEmpty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source image could not be read or decoded. Fatal to the session.
    Decode(String),
    /// A crop was attempted before the preview had a measured display rectangle.
    LayoutNotReady,
    /// A crop covered no pixels.
    EmptyCrop,
    /// Undo or redo with nothing available.
    HistoryEmpty(HistoryDirection),
    /// The export collaborator rejected the raster.
    Save(String),
    /// Image loading was abandoned before it completed.
    Cancelled,
    Io(String),
    Config(String),
}

impl Error {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Decode(_) => "error-decode",
            Error::LayoutNotReady => "error-layout-not-ready",
            Error::EmptyCrop => "error-empty-crop",
            Error::HistoryEmpty(HistoryDirection::Undo) => "error-nothing-to-undo",
            Error::HistoryEmpty(HistoryDirection::Redo) => "error-nothing-to-redo",
            Error::Save(_) => "error-save",
            Error::Cancelled => "error-load-cancelled",
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
        }
    }

    /// Whether the host should show this error to the user.
    ///
    /// Everything else is recoverable or represented by a disabled control.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Error::Decode(_) | Error::Save(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::LayoutNotReady => write!(f, "Preview layout is not ready"),
            Error::EmptyCrop => write!(f, "Crop area is empty"),
            Error::HistoryEmpty(HistoryDirection::Undo) => write!(f, "Nothing to undo"),
            Error::HistoryEmpty(HistoryDirection::Redo) => write!(f, "Nothing to redo"),
            Error::Save(e) => write!(f, "Save Error: {}", e),
            Error::Cancelled => write!(f, "Image loading was cancelled"),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<GeometryError> for Error {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::LayoutNotReady => Error::LayoutNotReady,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        match err {
            image_rs::ImageError::IoError(io) => Error::Io(io.to_string()),
            other => Error::Decode(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
