//! Drag session - moves a rectangle body, size unchanged.

use crate::error::{SelectionError, SelectionResult};
use crate::geometry::clamp;
use crate::types::{Point, SelectionGeometry, Surface};
use tracing::debug;

#[derive(Debug, Clone)]
struct ActiveDrag {
    origin: Point,
    original: SelectionGeometry,
    last: Point,
}

/// Stateful move-drag transform.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    active: Option<ActiveDrag>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the pointer origin and the rectangle's original geometry.
    pub fn start(&mut self, point: Point, rect: &SelectionGeometry) -> SelectionResult<()> {
        if self.active.is_some() {
            return Err(SelectionError::InvalidState("drag session already active"));
        }
        debug!(?point, "move started");
        self.active = Some(ActiveDrag {
            origin: point,
            original: *rect,
            last: Point::new(rect.x, rect.y),
        });
        Ok(())
    }

    /// New top-left position for the pointer, clamped into the surface.
    ///
    /// A rectangle wider than the surface is pinned at 0 on that axis.
    pub fn update(&mut self, point: Point, surface: &Surface) -> SelectionResult<Point> {
        let drag = self
            .active
            .as_mut()
            .ok_or(SelectionError::InvalidState("drag update without start"))?;

        let original = drag.original;
        let x = clamp(
            original.x + (point.x - drag.origin.x),
            0.0,
            (surface.width - original.width).max(0.0),
        );
        let y = clamp(
            original.y + (point.y - drag.origin.y),
            0.0,
            (surface.height - original.height).max(0.0),
        );

        drag.last = Point::new(x, y);
        Ok(drag.last)
    }

    /// Finish the move and return the final position.
    pub fn end(&mut self) -> SelectionResult<Point> {
        let drag = self
            .active
            .take()
            .ok_or(SelectionError::InvalidState("drag end without start"))?;
        Ok(drag.last)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Geometry at the last update, with the original size.
    pub fn current(&self) -> Option<SelectionGeometry> {
        self.active.as_ref().map(|d| {
            SelectionGeometry::new(d.last.x, d.last.y, d.original.width, d.original.height)
        })
    }
}
