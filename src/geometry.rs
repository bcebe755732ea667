//! Hit testing and clamped rectangle arithmetic.
//!
//! Pure functions only. The sessions and the controller build on these; none
//! of them keep state here.

use crate::constants::HIT_THRESHOLD;
use crate::profile_scope;
use crate::types::{Point, SelectionGeometry, Surface};
use serde::{Deserialize, Serialize};

/// Which part of a rectangle's perimeter the pointer is over.
///
/// Corners are the conjunction of one horizontal and one vertical edge; a
/// hit never combines top with bottom or left with right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorHit {
    #[default]
    None,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Platform cursor shown for a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorGlyph {
    /// Vertical resize (top/bottom edges)
    NsResize,
    /// Horizontal resize (left/right edges)
    EwResize,
    /// Diagonal resize, top-left to bottom-right
    NwseResize,
    /// Diagonal resize, top-right to bottom-left
    NeswResize,
    /// Rectangle body, ready to move
    Grab,
}

impl CursorGlyph {
    /// CSS cursor keyword for web-based hosts.
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::NsResize => "ns-resize",
            Self::EwResize => "ew-resize",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
            Self::Grab => "grab",
        }
    }
}

impl CursorHit {
    fn from_edges(top: bool, bottom: bool, left: bool, right: bool) -> Self {
        match (top, bottom, left, right) {
            (true, _, true, _) => Self::TopLeft,
            (true, _, _, true) => Self::TopRight,
            (_, true, true, _) => Self::BottomLeft,
            (_, true, _, true) => Self::BottomRight,
            (true, _, _, _) => Self::Top,
            (_, true, _, _) => Self::Bottom,
            (_, _, true, _) => Self::Left,
            (_, _, _, true) => Self::Right,
            _ => Self::None,
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn has_top(&self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn has_bottom(&self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    pub fn has_left(&self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    pub fn has_right(&self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    /// Resize cursor for this hit, `None` when the pointer is off the perimeter.
    pub fn glyph(&self) -> Option<CursorGlyph> {
        match self {
            Self::None => None,
            Self::Top | Self::Bottom => Some(CursorGlyph::NsResize),
            Self::Left | Self::Right => Some(CursorGlyph::EwResize),
            Self::TopLeft | Self::BottomRight => Some(CursorGlyph::NwseResize),
            Self::TopRight | Self::BottomLeft => Some(CursorGlyph::NeswResize),
        }
    }
}

/// Hit test with the default threshold.
pub fn hit_test(point: Point, rect: &SelectionGeometry) -> CursorHit {
    hit_test_with(point, rect, HIT_THRESHOLD)
}

/// Classify `point` against the perimeter of `rect`.
///
/// An edge is near when the pointer is strictly closer than `threshold` to it
/// and inside the rectangle's span on the other axis (inclusive). When a thin
/// rectangle puts the pointer near both opposite edges the nearer one wins,
/// ties going to top/left.
pub fn hit_test_with(point: Point, rect: &SelectionGeometry, threshold: f32) -> CursorHit {
    profile_scope!("hit_test");

    let in_x_span = point.x >= rect.x && point.x <= rect.right();
    let in_y_span = point.y >= rect.y && point.y <= rect.bottom();

    let d_top = (point.y - rect.y).abs();
    let d_bottom = (point.y - rect.bottom()).abs();
    let d_left = (point.x - rect.x).abs();
    let d_right = (point.x - rect.right()).abs();

    let mut top = in_x_span && d_top < threshold;
    let mut bottom = in_x_span && d_bottom < threshold;
    let mut left = in_y_span && d_left < threshold;
    let mut right = in_y_span && d_right < threshold;

    if top && bottom {
        top = d_top <= d_bottom;
        bottom = !top;
    }
    if left && right {
        left = d_left <= d_right;
        right = !left;
    }

    CursorHit::from_edges(top, bottom, left, right)
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics on inverted bounds: when `min > max`
/// the result is `max`. Callers that care must order the bounds first.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Flip a rectangle dragged in the negative direction so width and height
/// are non-negative and the origin is the top-left corner.
pub fn normalize_rect(rect: SelectionGeometry) -> SelectionGeometry {
    let (x, width) = if rect.width < 0.0 {
        (rect.x + rect.width, -rect.width)
    } else {
        (rect.x, rect.width)
    };
    let (y, height) = if rect.height < 0.0 {
        (rect.y + rect.height, -rect.height)
    } else {
        (rect.y, rect.height)
    };
    SelectionGeometry::new(x, y, width, height)
}

/// Rectangle spanned by two corners, both clamped into the surface first.
pub fn rect_from_corners(a: Point, b: Point, surface: &Surface) -> SelectionGeometry {
    let a = surface.clamp_point(a);
    let b = surface.clamp_point(b);
    normalize_rect(SelectionGeometry::new(a.x, a.y, b.x - a.x, b.y - a.y))
}
