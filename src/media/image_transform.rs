// SPDX-License-Identifier: MPL-2.0
//! Image transformation functions for rotate, flip, and crop operations.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::domain::editing::RotationDegrees;
use crate::domain::geometry::{PixelRect, Size};
use crate::media::source::Raster;
use image_rs::{imageops, Rgba};
use serde::{Deserialize, Serialize};

/// Resampling used for rotations that are not a multiple of 90°.
///
/// Quarter turns are always lossless pixel moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    Nearest,
    #[default]
    Bilinear,
}

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

// ==========================================================================
// Canvas Geometry
// ==========================================================================

/// Side of the square canvas that can hold the image at any rotation.
///
/// `ceil(maxDim * sqrt(2))`; every rotated bounding box fits inside it.
#[must_use]
pub fn safe_area(size: Size) -> u32 {
    (f64::from(size.max_dimension()) * std::f64::consts::SQRT_2).ceil() as u32
}

/// Size of the canvas holding `size` rotated by `rotation` without clipping.
///
/// Quarter turns swap or keep the dimensions exactly; other angles grow the
/// canvas to the bounding box of the rotated rectangle.
#[must_use]
pub fn rotated_bounds(size: Size, rotation: RotationDegrees) -> Size {
    match rotation.quarter_turns() {
        Some(0 | 2) => size,
        Some(_) => size.transposed(),
        None => {
            let radians = f64::from(rotation.value()).to_radians();
            let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
            let w = f64::from(size.width);
            let h = f64::from(size.height);
            // Tolerance keeps float noise from adding a spurious row or column
            let width = (w * cos + h * sin - 1e-6).ceil().max(1.0) as u32;
            let height = (w * sin + h * cos - 1e-6).ceil().max(1.0) as u32;
            Size::new(width, height)
        }
    }
}

// ==========================================================================
// Image Transformation Functions
// ==========================================================================

/// Rotate an image 90 degrees counter-clockwise (left).
#[must_use]
pub fn rotate_left(image: &Raster) -> Raster {
    imageops::rotate270(image)
}

/// Rotate an image 90 degrees clockwise (right).
#[must_use]
pub fn rotate_right(image: &Raster) -> Raster {
    imageops::rotate90(image)
}

/// Flip an image horizontally (mirror left-to-right).
#[must_use]
pub fn flip_horizontal(image: &Raster) -> Raster {
    imageops::flip_horizontal(image)
}

/// Flip an image vertically (mirror top-to-bottom).
#[must_use]
pub fn flip_vertical(image: &Raster) -> Raster {
    imageops::flip_vertical(image)
}

/// Rotate an image clockwise about its center.
///
/// The output canvas is [`rotated_bounds`] of the input; uncovered corners
/// are transparent. Quarter turns take the lossless path.
#[must_use]
pub fn rotate(image: &Raster, rotation: RotationDegrees, sampling: Sampling) -> Raster {
    match rotation.quarter_turns() {
        Some(0) => return image.clone(),
        Some(1) => return rotate_right(image),
        Some(2) => return imageops::rotate180(image),
        Some(3) => return rotate_left(image),
        _ => {}
    }

    let src_size = Size::new(image.width(), image.height());
    let dst_size = rotated_bounds(src_size, rotation);
    let radians = f64::from(rotation.value()).to_radians();
    let (sin, cos) = radians.sin_cos();

    let src_cx = f64::from(src_size.width) / 2.0;
    let src_cy = f64::from(src_size.height) / 2.0;
    let dst_cx = f64::from(dst_size.width) / 2.0;
    let dst_cy = f64::from(dst_size.height) / 2.0;

    Raster::from_fn(dst_size.width, dst_size.height, |x, y| {
        // Inverse-map the destination pixel center into the source
        let dx = f64::from(x) + 0.5 - dst_cx;
        let dy = f64::from(y) + 0.5 - dst_cy;
        let sx = dx * cos + dy * sin + src_cx;
        let sy = -dx * sin + dy * cos + src_cy;

        match sampling {
            Sampling::Nearest => sample_nearest(image, sx, sy),
            Sampling::Bilinear => sample_bilinear(image, sx - 0.5, sy - 0.5),
        }
    })
}

fn pixel_or_transparent(image: &Raster, x: i64, y: i64) -> Rgba<u8> {
    if x < 0 || y < 0 || x >= i64::from(image.width()) || y >= i64::from(image.height()) {
        return TRANSPARENT;
    }
    *image.get_pixel(x as u32, y as u32)
}

fn sample_nearest(image: &Raster, x: f64, y: f64) -> Rgba<u8> {
    pixel_or_transparent(image, x.floor() as i64, y.floor() as i64)
}

fn sample_bilinear(image: &Raster, x: f64, y: f64) -> Rgba<u8> {
    let x0 = x.floor();
    let y0 = y.floor();
    let tx = x - x0;
    let ty = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let corners = [
        (pixel_or_transparent(image, x0, y0), (1.0 - tx) * (1.0 - ty)),
        (pixel_or_transparent(image, x0 + 1, y0), tx * (1.0 - ty)),
        (pixel_or_transparent(image, x0, y0 + 1), (1.0 - tx) * ty),
        (pixel_or_transparent(image, x0 + 1, y0 + 1), tx * ty),
    ];

    // Weight color by alpha so transparent padding does not darken edges
    let mut alpha = 0.0;
    let mut rgb = [0.0f64; 3];
    for (pixel, weight) in corners {
        let a = f64::from(pixel.0[3]) * weight;
        alpha += a;
        for (acc, channel) in rgb.iter_mut().zip(&pixel.0[..3]) {
            *acc += f64::from(*channel) * a;
        }
    }

    if alpha <= f64::EPSILON {
        return TRANSPARENT;
    }
    let [r, g, b] = rgb.map(|c| (c / alpha).round().clamp(0.0, 255.0) as u8);
    Rgba([r, g, b, alpha.round().clamp(0.0, 255.0) as u8])
}

/// Crop the image to the specified rectangle.
///
/// The rectangle is clamped to the image boundaries. Returns `None` if
/// nothing of it lies inside the image.
#[must_use]
pub fn crop(image: &Raster, rect: PixelRect) -> Option<Raster> {
    let img_width = image.width();
    let img_height = image.height();

    if rect.x >= img_width || rect.y >= img_height {
        return None;
    }

    // Calculate available width and height from the crop start point
    let width = rect.width.min(img_width - rect.x);
    let height = rect.height.min(img_height - rect.y);

    if width == 0 || height == 0 {
        return None;
    }

    Some(imageops::crop_imm(image, rect.x, rect.y, width, height).to_image())
}
