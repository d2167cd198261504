// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core editing logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`editing`]: Edit state ([`TransformState`](editing::TransformState),
//!   [`FilterState`](editing::FilterState))
//! - [`error`]: Domain error types ([`GeometryError`](error::GeometryError))
//! - [`geometry`]: Display/natural space mapping

pub mod editing;
pub mod error;
pub mod geometry;
