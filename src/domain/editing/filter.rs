// SPDX-License-Identifier: MPL-2.0
//! Color filter adjustments.
//!
//! Six independent adjustments with the numeric semantics of the CSS filter
//! functions of the same name. Values outside a key's range are clamped,
//! never rejected.

use std::fmt;

/// Bounds for the percentage filters that pivot around 100%.
pub mod percent_bounds {
    /// Minimum (fully removed).
    pub const MIN: f32 = 0.0;
    /// Maximum (doubled).
    pub const MAX: f32 = 200.0;
    /// Identity.
    pub const IDENTITY: f32 = 100.0;
}

/// Bounds for the blend-amount filters (grayscale, sepia).
pub mod amount_bounds {
    /// Identity.
    pub const MIN: f32 = 0.0;
    /// Fully applied.
    pub const MAX: f32 = 100.0;
}

/// Bounds for the blur radius, in pixels.
pub mod blur_bounds {
    /// No blur.
    pub const MIN: f32 = 0.0;
    /// Maximum radius.
    pub const MAX: f32 = 10.0;
}

/// One of the six color adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Contrast,
    Brightness,
    Grayscale,
    Saturate,
    Sepia,
    Blur,
}

impl FilterKey {
    /// All keys, in pipeline application order.
    pub const ALL: [FilterKey; 6] = [
        FilterKey::Contrast,
        FilterKey::Brightness,
        FilterKey::Grayscale,
        FilterKey::Saturate,
        FilterKey::Sepia,
        FilterKey::Blur,
    ];

    /// Inclusive `(min, max)` range of the key.
    #[must_use]
    pub fn range(self) -> (f32, f32) {
        match self {
            FilterKey::Contrast | FilterKey::Brightness | FilterKey::Saturate => {
                (percent_bounds::MIN, percent_bounds::MAX)
            }
            FilterKey::Grayscale | FilterKey::Sepia => (amount_bounds::MIN, amount_bounds::MAX),
            FilterKey::Blur => (blur_bounds::MIN, blur_bounds::MAX),
        }
    }

    /// Value at which the filter leaves pixels unchanged.
    #[must_use]
    pub fn identity(self) -> f32 {
        match self {
            FilterKey::Contrast | FilterKey::Brightness | FilterKey::Saturate => {
                percent_bounds::IDENTITY
            }
            FilterKey::Grayscale | FilterKey::Sepia | FilterKey::Blur => 0.0,
        }
    }

    /// Clamps `value` into the key's range. NaN maps to identity.
    #[must_use]
    pub fn clamp(self, value: f32) -> f32 {
        if value.is_nan() {
            return self.identity();
        }
        let (min, max) = self.range();
        value.clamp(min, max)
    }

    /// CSS function name.
    #[must_use]
    pub fn css_name(self) -> &'static str {
        match self {
            FilterKey::Contrast => "contrast",
            FilterKey::Brightness => "brightness",
            FilterKey::Grayscale => "grayscale",
            FilterKey::Saturate => "saturate",
            FilterKey::Sepia => "sepia",
            FilterKey::Blur => "blur",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// The six color adjustments. Defaults to identity (100/100/100/0/0/0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterState {
    contrast: f32,
    brightness: f32,
    saturate: f32,
    grayscale: f32,
    sepia: f32,
    blur: f32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            contrast: percent_bounds::IDENTITY,
            brightness: percent_bounds::IDENTITY,
            saturate: percent_bounds::IDENTITY,
            grayscale: 0.0,
            sepia: 0.0,
            blur: 0.0,
        }
    }
}

impl FilterState {
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Contrast percent, 0–200.
    #[must_use]
    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    /// Brightness percent, 0–200.
    #[must_use]
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Saturation percent, 0–200.
    #[must_use]
    pub fn saturate(&self) -> f32 {
        self.saturate
    }

    /// Grayscale amount percent, 0–100.
    #[must_use]
    pub fn grayscale(&self) -> f32 {
        self.grayscale
    }

    /// Sepia amount percent, 0–100.
    #[must_use]
    pub fn sepia(&self) -> f32 {
        self.sepia
    }

    /// Gaussian blur radius in pixels, 0–10.
    #[must_use]
    pub fn blur(&self) -> f32 {
        self.blur
    }

    #[must_use]
    pub fn get(&self, key: FilterKey) -> f32 {
        match key {
            FilterKey::Contrast => self.contrast,
            FilterKey::Brightness => self.brightness,
            FilterKey::Grayscale => self.grayscale,
            FilterKey::Saturate => self.saturate,
            FilterKey::Sepia => self.sepia,
            FilterKey::Blur => self.blur,
        }
    }

    /// Returns a copy with `key` set to `value`, clamped to the key's range.
    #[must_use]
    pub fn set(self, key: FilterKey, value: f32) -> Self {
        let value = key.clamp(value);
        let mut next = self;
        match key {
            FilterKey::Contrast => next.contrast = value,
            FilterKey::Brightness => next.brightness = value,
            FilterKey::Grayscale => next.grayscale = value,
            FilterKey::Saturate => next.saturate = value,
            FilterKey::Sepia => next.sepia = value,
            FilterKey::Blur => next.blur = value,
        }
        next
    }

    /// Whether `key` is at its identity value.
    #[must_use]
    pub fn is_identity_for(&self, key: FilterKey) -> bool {
        (self.get(key) - key.identity()).abs() < f32::EPSILON
    }

    /// True when no filter changes any pixel.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        FilterKey::ALL.iter().all(|key| self.is_identity_for(*key))
    }

    /// Equivalent CSS `filter` property value, for hosts that preview with CSS.
    #[must_use]
    pub fn to_css(&self) -> String {
        FilterKey::ALL
            .iter()
            .map(|key| match key {
                FilterKey::Blur => format!("blur({}px)", self.get(*key)),
                _ => format!("{}({}%)", key.css_name(), self.get(*key)),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
