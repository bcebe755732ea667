//! Coordinate conversion between the rendered viewport and the surface.
//!
//! Hosts usually draw the surface scaled into some box on screen (an SVG
//! `viewBox`, a canvas widget). Pointer events arrive in screen units and
//! must be mapped into surface units before they reach the controller.

use crate::types::{Point, Surface};
use serde::{Deserialize, Serialize};

/// Where the surface is drawn on screen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// A viewport drawing the surface 1:1 at the origin.
    pub fn identity(surface: &Surface) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: surface.width,
            height: surface.height,
        }
    }
}

/// Context needed for coordinate conversions
pub struct CoordinateContext<'a> {
    pub viewport: &'a Viewport,
    pub surface: &'a Surface,
}

impl<'a> CoordinateContext<'a> {
    #[inline]
    pub fn new(viewport: &'a Viewport, surface: &'a Surface) -> Self {
        Self { viewport, surface }
    }

    #[inline]
    fn scale(&self) -> (f32, f32) {
        (
            self.surface.width / self.viewport.width,
            self.surface.height / self.viewport.height,
        )
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert a screen position to surface units
    #[inline]
    pub fn screen_to_surface(screen_pos: Point, ctx: &CoordinateContext<'_>) -> Point {
        let (sx, sy) = ctx.scale();
        Point::new(
            (screen_pos.x - ctx.viewport.x) * sx,
            (screen_pos.y - ctx.viewport.y) * sy,
        )
    }

    /// Convert a surface position to screen units
    #[inline]
    pub fn surface_to_screen(surface_pos: Point, ctx: &CoordinateContext<'_>) -> Point {
        let (sx, sy) = ctx.scale();
        Point::new(
            surface_pos.x / sx + ctx.viewport.x,
            surface_pos.y / sy + ctx.viewport.y,
        )
    }
}
