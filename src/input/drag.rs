//! Pointer move handling - gesture previews, hover tracking, cursor feedback.
//!
//! ## Performance Notes
//!
//! Pointer move fires on every mouse event. Key points:
//! - Early dispatch on the active mode
//! - Hover lookup through the R-tree spatial index
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use super::{InteractionController, InteractionMode, Tool};
use crate::error::SelectionResult;
use crate::geometry::{CursorGlyph, CursorHit, hit_test_with};
use crate::profile_scope;
use crate::selection::SelectionHost;
use crate::types::{Point, Rectangle};
use tracing::trace;

/// Pointer crossed from one committed rectangle to another (or to nothing).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HoverChange {
    pub left: Option<Rectangle>,
    pub entered: Option<Rectangle>,
}

impl HoverChange {
    /// Deliver the transition to the host, leave before enter.
    pub fn notify<H: SelectionHost>(&self, host: &H) {
        if let Some(rect) = &self.left {
            host.rect_hover_out(rect);
        }
        if let Some(rect) = &self.entered {
            host.rect_hover(rect);
        }
    }
}

/// What the renderer needs after a pointer move.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerFeedback {
    /// Perimeter part under the pointer (or the active resize anchor)
    pub hit: CursorHit,
    pub cursor: Option<CursorGlyph>,
    pub hover: Option<HoverChange>,
}

impl InteractionController {
    pub fn pointer_move(&mut self, point: Point) -> SelectionResult<PointerFeedback> {
        profile_scope!("pointer_move");

        let surface = self.settings.surface;
        match &mut self.mode {
            InteractionMode::Drawing { current, .. } => {
                *current = point;
                trace!(?point, "drawing");
                Ok(PointerFeedback::default())
            }
            InteractionMode::Moving { session, .. } => {
                let position = session.update(point, &surface)?;
                trace!(?position, "moving");
                Ok(PointerFeedback {
                    cursor: Some(CursorGlyph::Grab),
                    ..Default::default()
                })
            }
            InteractionMode::Resizing { session, .. } => {
                let geometry = session.update(point)?;
                if let Some(staged) = self.staged.as_mut() {
                    staged.geometry = geometry;
                }
                let hit = session.anchor().unwrap_or_default();
                trace!(?geometry, "resizing");
                Ok(PointerFeedback {
                    hit,
                    cursor: hit.glyph(),
                    hover: None,
                })
            }
            InteractionMode::Idle => Ok(self.hover(point)),
        }
    }

    /// Idle pointer: cursor shape and hover transitions.
    fn hover(&mut self, point: Point) -> PointerFeedback {
        let threshold = self.settings.hit_threshold;
        let under = self.store.topmost_at(point).cloned();
        let hover = self.track_hover(under.as_ref());

        if self.tool == Tool::Remove {
            return PointerFeedback {
                hover,
                ..Default::default()
            };
        }

        let target = self
            .staged
            .map(|s| s.geometry)
            .filter(|g| g.contains(point) || !hit_test_with(point, g, threshold).is_none())
            .or_else(|| {
                self.store
                    .topmost_grabbable(point, threshold)
                    .map(|r| r.geometry())
            });

        let (hit, cursor) = match target {
            Some(geometry) => {
                let hit = hit_test_with(point, &geometry, threshold);
                let cursor = hit
                    .glyph()
                    .or_else(|| geometry.contains(point).then_some(CursorGlyph::Grab));
                (hit, cursor)
            }
            None => (CursorHit::None, None),
        };

        PointerFeedback { hit, cursor, hover }
    }

    fn track_hover(&mut self, under: Option<&Rectangle>) -> Option<HoverChange> {
        let under_id = under.map(|r| r.id);
        if under_id == self.hovered {
            return None;
        }

        let left = self.hovered.and_then(|id| self.store.get(id).cloned());
        self.hovered = under_id;

        if self.tool == Tool::Remove && !self.store.is_pending() {
            if under_id.is_some() {
                self.remove_target = under_id;
            } else if left.is_some() {
                self.remove_target = None;
            }
        }

        Some(HoverChange {
            left,
            entered: under.cloned(),
        })
    }
}
