//! Geometric types for submission regions and coordinates
//!
//! Pixel-space types describe what the pointer did on the rendered surface.
//! Percentage-space types are what gets stored: they stay valid when the
//! submission is later displayed at a different size.

use serde::{Deserialize, Serialize};

/// A point in pixel coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rendered size of the reference container, in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True until the container has a positive size in both dimensions
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Pull a point back inside the container bounds
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(0.0, self.width.max(0.0)),
            point.y.clamp(0.0, self.height.max(0.0)),
        )
    }
}

/// Rectangle in pixel coordinates (top-left origin, non-negative size)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by a drag origin and the current pointer position
    pub fn from_corners(origin: Point, current: Point) -> Self {
        Self {
            x: origin.x.min(current.x),
            y: origin.y.min(current.y),
            width: (current.x - origin.x).abs(),
            height: (current.y - origin.y).abs(),
        }
    }

    /// True when both sides are strictly larger than `min`
    pub fn exceeds(&self, min: f32) -> bool {
        self.width > min && self.height > min
    }

    /// Bottom-center point, where a popup is anchored below a selection
    pub fn bottom_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height)
    }
}

/// Rectangle in percentage-space, each component in `[0, 100]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Convert a pixel rectangle into percentages of the container
///
/// The container must have a non-zero size, and the rectangle should lie
/// inside it for the result to stay within `[0, 100]`.
pub fn to_percent(rect: PixelRect, container: ContainerSize) -> PercentRect {
    PercentRect {
        x: 100.0 * rect.x / container.width,
        y: 100.0 * rect.y / container.height,
        width: 100.0 * rect.width / container.width,
        height: 100.0 * rect.height / container.height,
    }
}

/// Convert a percentage rectangle back into pixels for a given container
pub fn to_pixels(rect: PercentRect, container: ContainerSize) -> PixelRect {
    PixelRect {
        x: rect.x * container.width / 100.0,
        y: rect.y * container.height / 100.0,
        width: rect.width * container.width / 100.0,
        height: rect.height * container.height / 100.0,
    }
}
