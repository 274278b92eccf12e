//! Normalized bounding boxes and the reference canvas used to size widgets.
//!
//! Detections arrive with coordinates normalized to `[0, 1]`, origin top-left.
//! Upstream classifiers do not strictly enforce that range, so every helper
//! here tolerates out-of-range and non-finite values and never panics.

// Pixel sizes are rounded, clamped, non-negative values on a phone-sized canvas
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box with normalized coordinates (0-1), origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedRect {
    /// X coordinate of top-left corner (normalized 0-1)
    pub x: f32,
    /// Y coordinate of top-left corner (normalized 0-1)
    pub y: f32,
    /// Width of box (normalized 0-1)
    pub width: f32,
    /// Height of box (normalized 0-1)
    pub height: f32,
}

impl NormalizedRect {
    /// Create a new bounding box
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convert a box whose origin is bottom-left (Vision framework convention)
    /// into the top-left convention used by the pipeline.
    #[inline]
    #[must_use]
    pub fn from_bottom_left(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, 1.0 - y - height, width, height)
    }

    /// Right edge (`x + width`)
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`)
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get center coordinates
    #[inline]
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get area of bounding box (zero for negative extents)
    #[inline]
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// True when the box has no usable extent (zero, negative or non-finite size).
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// True when every coordinate lies in `[0, 1]` and the box fits on the canvas.
    #[must_use]
    pub fn is_within_unit_square(&self) -> bool {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        in_unit(self.x)
            && in_unit(self.y)
            && in_unit(self.width)
            && in_unit(self.height)
            && self.right() <= 1.0
            && self.bottom() <= 1.0
    }

    /// Calculate Intersection over Union (`IoU`) with another box
    #[must_use]
    pub fn iou(&self, other: &Self) -> f32 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
        let union = self.area() + other.area() - intersection;

        if union > 0.0 && union.is_finite() {
            intersection / union
        } else {
            0.0
        }
    }
}

/// Fixed logical canvas that normalized boxes are projected onto when
/// computing widget sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCanvas {
    /// Logical width in device-independent units
    pub width: f32,
    /// Logical height in device-independent units
    pub height: f32,
}

impl ReferenceCanvas {
    /// 375x812 logical points, a notched phone portrait screen.
    pub const PHONE: Self = Self {
        width: 375.0,
        height: 812.0,
    };

    /// Create a canvas of the given logical size
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixel width of a box on this canvas: `round(width * canvas.width)`.
    #[inline]
    #[must_use]
    pub fn pixel_width(&self, rect: &NormalizedRect) -> u32 {
        to_pixels(rect.width, self.width)
    }

    /// Pixel height of a box on this canvas: `round(height * canvas.height)`.
    #[inline]
    #[must_use]
    pub fn pixel_height(&self, rect: &NormalizedRect) -> u32 {
        to_pixels(rect.height, self.height)
    }
}

impl Default for ReferenceCanvas {
    #[inline]
    fn default() -> Self {
        Self::PHONE
    }
}

/// Project a normalized extent onto a reference length.
///
/// Negative and non-finite inputs clamp to zero; huge values saturate.
fn to_pixels(normalized: f32, reference: f32) -> u32 {
    let scaled = (f64::from(normalized) * f64::from(reference)).round();
    if scaled.is_finite() && scaled > 0.0 {
        scaled as u32
    } else {
        0
    }
}
