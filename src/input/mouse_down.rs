//! Pointer down handling - draw, move and resize initiation, remove targets.
//!
//! Precedence, first match wins:
//! 1. remove tool: the rectangle under the pointer becomes the remove target
//! 2. the staged draft: edge starts a resize, body starts a move
//! 3. a committed rectangle under or at the edge of the pointer: copied into
//!    the draft for editing, then as 2.
//! 4. add tool on empty surface: start drawing (not while a commit is pending)
//! 5. anything else clears the staged draft

use super::{InteractionController, InteractionMode, Mode, StagedSelection, Tool};
use crate::error::SelectionResult;
use crate::geometry::hit_test_with;
use crate::profile_scope;
use crate::session::{DragSession, ResizeSession};
use crate::types::Point;
use tracing::{debug, warn};

impl InteractionController {
    pub fn pointer_down(&mut self, point: Point) -> SelectionResult<Mode> {
        profile_scope!("pointer_down");

        if !self.mode.is_idle() {
            warn!(mode = ?self.mode.kind(), "pointer down during an active gesture, interrupting it");
            self.interrupt_gesture()?;
        }

        if self.tool == Tool::Remove {
            self.pick_remove_target(point);
            return Ok(self.mode());
        }

        if let Some(staged) = self.staged {
            if self.begin_edit(point, staged)? {
                return Ok(self.mode());
            }
        }

        let threshold = self.settings.hit_threshold;
        let under = self.store.topmost_grabbable(point, threshold).map(|rect| StagedSelection {
            geometry: rect.geometry(),
            target_id: Some(rect.id),
        });
        if let Some(staged) = under {
            debug!(id = ?staged.target_id, "editing committed selection");
            if self.begin_edit(point, staged)? {
                self.staged = Some(staged);
                return Ok(self.mode());
            }
        }

        if self.tool == Tool::Add {
            if let Some(kind) = self.store.confirmation_state().kind {
                debug!(%kind, "draw ignored while a confirmation is pending");
                return Ok(self.mode());
            }
            let origin = self.surface().clamp_point(point);
            self.staged = None;
            self.mode = InteractionMode::Drawing {
                origin,
                current: origin,
            };
            debug!(?origin, "drawing started");
            return Ok(self.mode());
        }

        if self.staged.take().is_some() {
            debug!("staged draft cleared");
        }
        Ok(self.mode())
    }

    /// Start a resize or move of `staged` if the pointer is on it.
    fn begin_edit(&mut self, point: Point, staged: StagedSelection) -> SelectionResult<bool> {
        let limits = self.resize_limits();
        let geometry = staged.geometry;

        if !hit_test_with(point, &geometry, limits.threshold).is_none() {
            let mut session = ResizeSession::with_limits(limits);
            if session.start(point, &geometry, &self.settings.surface)?.is_some() {
                self.mode = InteractionMode::Resizing {
                    session,
                    target_id: staged.target_id,
                };
                return Ok(true);
            }
        }

        if geometry.contains(point) {
            let mut session = DragSession::new();
            session.start(point, &geometry)?;
            self.mode = InteractionMode::Moving {
                session,
                target_id: staged.target_id,
            };
            return Ok(true);
        }

        Ok(false)
    }

    fn pick_remove_target(&mut self, point: Point) {
        if self.store.is_pending() {
            debug!("remove target frozen while a confirmation is pending");
            return;
        }
        self.remove_target = self.store.topmost_at(point).map(|r| r.id);
        debug!(target = ?self.remove_target, "remove target picked");
    }
}
