//! Core value types for the selection engine.
//!
//! Everything here is a plain value: the engine passes copies between the
//! sessions, the store and the renderer instead of reading geometry back out
//! of a rendered tree.

use crate::constants::{
    AFFORDANCE_AREA_FACTOR, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, MIN_AFFORDANCE_SIZE,
    MIN_STROKE_WIDTH, STROKE_AREA_FACTOR,
};
use serde::{Deserialize, Serialize};

/// A pointer position in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The fixed drawing area every rectangle is clamped to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
        }
    }
}

impl Surface {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp a point into `[0, width] x [0, height]`.
    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            point.x.max(0.0).min(self.width),
            point.y.max(0.0).min(self.height),
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Side of the square confirm/remove affordance drawn on a rectangle.
    pub fn affordance_size(&self) -> f32 {
        (self.width * self.height * AFFORDANCE_AREA_FACTOR).max(MIN_AFFORDANCE_SIZE)
    }

    /// Stroke width for committed rectangles.
    pub fn stroke_width(&self) -> f32 {
        (self.width * self.height * STROKE_AREA_FACTOR).max(MIN_STROKE_WIDTH)
    }
}

/// Rectangle geometry without an id: a draft or a candidate for commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SelectionGeometry {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive containment, edges count as inside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// True when the rectangle has no area (or carries non-finite values).
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || !(self.x.is_finite() && self.y.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Where the confirm/remove affordance sits: top-right corner, inside.
    pub fn affordance(&self, surface: &Surface) -> SelectionGeometry {
        let side = surface.affordance_size();
        SelectionGeometry::new(self.right() - side, self.y, side, side)
    }

    pub fn with_id(self, id: u64) -> Rectangle {
        Rectangle {
            id,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            color: None,
        }
    }
}

/// A committed selection owned by the [`SelectionStore`](crate::selection::SelectionStore).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Rectangle {
    pub fn geometry(&self) -> SelectionGeometry {
        SelectionGeometry::new(self.x, self.y, self.width, self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.geometry().contains(point)
    }

    /// Stroke colour, falling back to the given default.
    pub fn stroke_color<'a>(&'a self, default: &'a str) -> &'a str {
        self.color.as_deref().unwrap_or(default)
    }
}

/// Externally supplied highlight rectangle; all zeros means "no highlight".
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightCoords {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl HighlightCoords {
    pub const NONE: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.width != 0.0 && self.height != 0.0
    }
}
