//! Pointer up/leave handling - finalize gestures, hand drawings to the store.

use super::{HoverChange, InteractionController, InteractionMode, StagedSelection};
use crate::error::SelectionResult;
use crate::geometry::rect_from_corners;
use crate::selection::AddRequest;
use crate::types::{Point, SelectionGeometry};
use tracing::debug;

impl InteractionController {
    /// Finish the active gesture.
    ///
    /// A finished drawing is submitted right away: the returned request must
    /// be answered through [`resolve_add`](Self::resolve_add). Move and resize
    /// only stage their geometry; committing those takes a confirm gesture.
    pub fn pointer_up(&mut self, point: Point) -> SelectionResult<Option<AddRequest>> {
        self.finish_gesture(Some(point))
    }

    /// Pointer left the surface: drawings are dropped, edits are staged.
    pub fn pointer_leave(&mut self) -> SelectionResult<Option<HoverChange>> {
        self.interrupt_gesture()?;

        let left = self.hovered.take().and_then(|id| self.store.get(id).cloned());
        Ok(left.map(|rect| HoverChange {
            left: Some(rect),
            entered: None,
        }))
    }

    /// End the gesture without a release point; never submits a drawing.
    pub(super) fn interrupt_gesture(&mut self) -> SelectionResult<()> {
        if self.mode.is_drawing() {
            debug!("drawing abandoned");
            self.mode.reset();
            return Ok(());
        }
        self.finish_gesture(None).map(drop)
    }

    fn finish_gesture(
        &mut self,
        point: Option<Point>,
    ) -> SelectionResult<Option<AddRequest>> {
        let surface = self.settings.surface;

        match std::mem::take(&mut self.mode) {
            InteractionMode::Idle => Ok(None),
            InteractionMode::Drawing { origin, current } => {
                let candidate = rect_from_corners(origin, point.unwrap_or(current), &surface);
                Ok(self.submit_drawing(candidate))
            }
            InteractionMode::Moving {
                mut session,
                target_id,
            } => {
                if let Some(point) = point {
                    session.update(point, &surface)?;
                }
                let geometry = session.current();
                session.end()?;
                if let Some(geometry) = geometry {
                    self.stage(geometry, target_id);
                }
                Ok(None)
            }
            InteractionMode::Resizing {
                mut session,
                target_id,
            } => {
                if let Some(point) = point {
                    session.update(point)?;
                }
                let geometry = session.end()?;
                self.stage(geometry, target_id);
                Ok(None)
            }
        }
    }

    fn submit_drawing(&mut self, candidate: SelectionGeometry) -> Option<AddRequest> {
        match self.store.begin_add(candidate, None) {
            Ok(request) => {
                self.staged = Some(StagedSelection {
                    geometry: candidate,
                    target_id: None,
                });
                Some(request)
            }
            Err(err) => {
                debug!("drawing discarded: {}", err);
                None
            }
        }
    }

    fn stage(&mut self, geometry: SelectionGeometry, target_id: Option<u64>) {
        debug!(?geometry, ?target_id, "draft staged");
        self.staged = Some(StagedSelection {
            geometry,
            target_id,
        });
    }
}
