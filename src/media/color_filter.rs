// SPDX-License-Identifier: MPL-2.0
//! Color filters with CSS filter-function semantics.
//!
//! Applied in a fixed order: contrast, brightness, grayscale, saturate,
//! sepia, blur. Each color stage works on normalized sRGB channel values and
//! clamps to `[0, 1]` before the next stage, as browsers do when chaining
//! filter functions. Alpha is never touched by the color stages.
//!
//! Matrices follow the Filter Effects Module Level 1 definitions.

use crate::domain::editing::{FilterKey, FilterState};
use crate::media::source::Raster;

type Matrix3 = [[f32; 3]; 3];

/// One per-pixel color operation.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ColorStage {
    /// `(c - 0.5) * amount + 0.5`
    Contrast(f32),
    /// `c * amount`
    Brightness(f32),
    Matrix(Matrix3),
}

impl ColorStage {
    fn apply(self, rgb: [f32; 3]) -> [f32; 3] {
        let out = match self {
            ColorStage::Contrast(amount) => rgb.map(|c| (c - 0.5) * amount + 0.5),
            ColorStage::Brightness(amount) => rgb.map(|c| c * amount),
            ColorStage::Matrix(m) => [
                m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2],
                m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2],
                m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2],
            ],
        };
        out.map(|c| c.clamp(0.0, 1.0))
    }
}

/// `grayscale(amount)` color matrix, `amount` in `[0, 1]`.
#[must_use]
pub fn grayscale_matrix(amount: f32) -> Matrix3 {
    let inv = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.2126 + 0.7874 * inv, 0.7152 - 0.7152 * inv, 0.0722 - 0.0722 * inv],
        [0.2126 - 0.2126 * inv, 0.7152 + 0.2848 * inv, 0.0722 - 0.0722 * inv],
        [0.2126 - 0.2126 * inv, 0.7152 - 0.7152 * inv, 0.0722 + 0.9278 * inv],
    ]
}

/// `saturate(amount)` color matrix, `amount` in `[0, 2]`.
#[must_use]
pub fn saturate_matrix(amount: f32) -> Matrix3 {
    let s = amount.max(0.0);
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

/// `sepia(amount)` color matrix, `amount` in `[0, 1]`.
#[must_use]
pub fn sepia_matrix(amount: f32) -> Matrix3 {
    let inv = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.393 + 0.607 * inv, 0.769 - 0.769 * inv, 0.189 - 0.189 * inv],
        [0.349 - 0.349 * inv, 0.686 + 0.314 * inv, 0.168 - 0.168 * inv],
        [0.272 - 0.272 * inv, 0.534 - 0.534 * inv, 0.131 + 0.869 * inv],
    ]
}

fn color_stages(filters: &FilterState) -> Vec<ColorStage> {
    FilterKey::ALL
        .iter()
        .filter(|key| !filters.is_identity_for(**key))
        .filter_map(|key| {
            let fraction = filters.get(*key) / 100.0;
            match key {
                FilterKey::Contrast => Some(ColorStage::Contrast(fraction)),
                FilterKey::Brightness => Some(ColorStage::Brightness(fraction)),
                FilterKey::Grayscale => Some(ColorStage::Matrix(grayscale_matrix(fraction))),
                FilterKey::Saturate => Some(ColorStage::Matrix(saturate_matrix(fraction))),
                FilterKey::Sepia => Some(ColorStage::Matrix(sepia_matrix(fraction))),
                FilterKey::Blur => None,
            }
        })
        .collect()
}

/// Applies every non-identity filter to a copy of `image`.
///
/// An identity [`FilterState`] returns an exact copy.
#[must_use]
pub fn apply(image: &Raster, filters: &FilterState) -> Raster {
    let mut out = image.clone();
    if filters.is_identity() {
        return out;
    }

    let stages = color_stages(filters);
    if !stages.is_empty() {
        for pixel in out.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            let mut rgb = [r, g, b].map(|c| f32::from(c) / 255.0);
            for stage in &stages {
                rgb = stage.apply(rgb);
            }
            let [r, g, b] = rgb.map(to_channel);
            pixel.0 = [r, g, b, a];
        }
    }

    if !filters.is_identity_for(FilterKey::Blur) {
        out = image_rs::imageops::blur(&out, filters.blur());
    }

    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
