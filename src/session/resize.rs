//! Resize session - turns a handle drag into new rectangle dimensions.
//!
//! ```text
//! Idle -> Active(anchor, original, pointer_origin, bounds)   start() on an edge or corner
//! Active -> Active                                           update()
//! Active -> Idle                                             end()
//! ```
//!
//! The anchor fixes which edges move. Each moving edge is limited so the
//! rectangle never shrinks below the minimum size and never leaves the
//! surface.

use crate::constants::{HIT_THRESHOLD, MIN_SELECTION_SIZE};
use crate::error::{SelectionError, SelectionResult};
use crate::geometry::{CursorHit, clamp, hit_test_with};
use crate::types::{Point, SelectionGeometry, Surface};
use tracing::debug;

/// Thresholds shared by hit testing and resizing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeLimits {
    /// Pointer distance that counts as "on an edge"
    pub threshold: f32,
    /// Smallest width/height a resize may produce
    pub min_size: f32,
}

impl Default for ResizeLimits {
    fn default() -> Self {
        Self {
            threshold: HIT_THRESHOLD,
            min_size: MIN_SELECTION_SIZE,
        }
    }
}

/// Range the pointer (and the drawn handle) may take on each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl AxisBounds {
    fn for_anchor(
        anchor: CursorHit,
        original: &SelectionGeometry,
        surface: &Surface,
        min_size: f32,
    ) -> Self {
        let mut bounds = Self {
            min_x: 0.0,
            max_x: surface.width,
            min_y: 0.0,
            max_y: surface.height,
        };

        if anchor.has_top() {
            bounds.max_y = (original.bottom() - min_size).max(0.0);
        }
        if anchor.has_bottom() {
            bounds.min_y = (original.y + min_size).min(surface.height);
        }
        if anchor.has_left() {
            bounds.max_x = (original.right() - min_size).max(0.0);
        }
        if anchor.has_right() {
            bounds.min_x = (original.x + min_size).min(surface.width);
        }

        bounds
    }

    #[inline]
    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            clamp(point.x, self.min_x, self.max_x),
            clamp(point.y, self.min_y, self.max_y),
        )
    }
}

#[derive(Debug, Clone)]
struct ActiveResize {
    anchor: CursorHit,
    original: SelectionGeometry,
    pointer_origin: Point,
    bounds: AxisBounds,
    surface: Surface,
    handle: Point,
    last: SelectionGeometry,
}

/// Stateful handle-drag transform.
#[derive(Debug, Clone, Default)]
pub struct ResizeSession {
    limits: ResizeLimits,
    active: Option<ActiveResize>,
}

impl ResizeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ResizeLimits) -> Self {
        Self {
            limits,
            active: None,
        }
    }

    /// Begin a resize if `point` is on an edge or corner of `rect`.
    ///
    /// Returns the anchor when the session started, `None` when the pointer
    /// was off the perimeter (the session stays idle).
    pub fn start(
        &mut self,
        point: Point,
        rect: &SelectionGeometry,
        surface: &Surface,
    ) -> SelectionResult<Option<CursorHit>> {
        if self.active.is_some() {
            return Err(SelectionError::InvalidState("resize session already active"));
        }

        let anchor = hit_test_with(point, rect, self.limits.threshold);
        if anchor.is_none() {
            return Ok(None);
        }

        let bounds = AxisBounds::for_anchor(anchor, rect, surface, self.limits.min_size);
        debug!(?anchor, ?bounds, "resize started");

        self.active = Some(ActiveResize {
            anchor,
            original: *rect,
            pointer_origin: point,
            bounds,
            surface: *surface,
            handle: bounds.clamp_point(point),
            last: *rect,
        });
        Ok(Some(anchor))
    }

    /// Recompute the rectangle for the current pointer position.
    pub fn update(&mut self, point: Point) -> SelectionResult<SelectionGeometry> {
        let min_size = self.limits.min_size;
        let session = self
            .active
            .as_mut()
            .ok_or(SelectionError::InvalidState("resize update without start"))?;

        let edge = session.bounds.clamp_point(point);
        let original = session.original;
        let mut next = original;

        if session.anchor.has_top() {
            next.y = edge.y;
            next.height = original.bottom() - edge.y;
        }
        if session.anchor.has_bottom() {
            next.height = edge.y - original.y;
        }
        if session.anchor.has_left() {
            next.x = edge.x;
            next.width = original.right() - edge.x;
        }
        if session.anchor.has_right() {
            next.width = edge.x - original.x;
        }

        session.handle = edge;
        session.last = fit_to_surface(next, &session.surface, min_size);
        Ok(session.last)
    }

    /// Finish the gesture and return the last computed rectangle.
    pub fn end(&mut self) -> SelectionResult<SelectionGeometry> {
        let session = self
            .active
            .take()
            .ok_or(SelectionError::InvalidState("resize end without start"))?;
        debug!(
            anchor = ?session.anchor,
            from = ?session.pointer_origin,
            "resize finished"
        );
        Ok(session.last)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn anchor(&self) -> Option<CursorHit> {
        self.active.as_ref().map(|s| s.anchor)
    }

    pub fn bounds(&self) -> Option<AxisBounds> {
        self.active.as_ref().map(|s| s.bounds)
    }

    /// Where the drag handle is drawn: the pointer clamped to the axis bounds.
    pub fn handle_position(&self) -> Option<Point> {
        self.active.as_ref().map(|s| s.handle)
    }

    pub fn pointer_origin(&self) -> Option<Point> {
        self.active.as_ref().map(|s| s.pointer_origin)
    }

    pub fn limits(&self) -> ResizeLimits {
        self.limits
    }
}

/// Enforce the minimum size and keep the rectangle inside the surface.
///
/// Holds whenever the surface is at least `min_size` on each axis.
fn fit_to_surface(rect: SelectionGeometry, surface: &Surface, min_size: f32) -> SelectionGeometry {
    let x = clamp(rect.x, 0.0, (surface.width - min_size).max(0.0));
    let y = clamp(rect.y, 0.0, (surface.height - min_size).max(0.0));
    let width = clamp(rect.width.max(min_size), min_size, surface.width - x);
    let height = clamp(rect.height.max(min_size), min_size, surface.height - y);
    SelectionGeometry::new(x, y, width, height)
}
