// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! This module provides pure domain error types that are independent
//! of external crates and infrastructure concerns.

use std::fmt;

/// Failure to map between display and natural space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// The preview has no measured display rectangle yet.
    LayoutNotReady,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::LayoutNotReady => write!(f, "Preview layout is not ready"),
        }
    }
}

impl std::error::Error for GeometryError {}
