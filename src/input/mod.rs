//! Pointer input handling for the selection surface.
//!
//! This module turns raw pointer events into drawing, moving, resizing and
//! removing rectangles. Committed rectangles are owned by the
//! [`SelectionStore`]; the controller only stages drafts and submits them.
//!
//! ## Architecture
//!
//! The controller uses an explicit state machine ([`InteractionMode`]) to
//! track the current gesture. Session objects carry the per-gesture state
//! from pointer-down to pointer-up.
//!
//! ## Modules
//!
//! - `state` - Interaction mode enum, tools and staged drafts
//! - `mouse_down` - Pointer down handling (draw/move/resize start, remove target)
//! - `drag` - Pointer move handling (previews, hover, cursor feedback)
//! - `mouse_up` - Pointer up/leave handling (finalize gestures)
//! - `confirm` - Commit and remove gestures, host round trips
//! - `coords` - Screen to surface coordinate conversion

pub mod coords;
mod confirm;
mod drag;
mod mouse_down;
mod mouse_up;
mod state;

pub use drag::{HoverChange, PointerFeedback};
pub use state::{InteractionMode, Mode, StagedSelection, Tool};

use crate::highlight::{HighlightMask, HighlightProjector};
use crate::selection::{ConfirmationState, SelectionStore};
use crate::session::ResizeLimits;
use crate::settings::EngineSettings;
use crate::types::{HighlightCoords, Point, Rectangle, SelectionGeometry, Surface};
use tracing::debug;

/// Drives one selection surface: gestures, staged drafts and commits.
pub struct InteractionController {
    settings: EngineSettings,
    store: SelectionStore,
    highlight: HighlightProjector,
    tool: Tool,
    mode: InteractionMode,
    /// Draft waiting for the confirm gesture
    staged: Option<StagedSelection>,
    /// Rectangle offered for removal while the remove tool is active
    remove_target: Option<u64>,
    /// Committed rectangle currently under the pointer
    hovered: Option<u64>,
}

impl InteractionController {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_rectangles(settings, Vec::new())
    }

    pub fn with_rectangles(settings: EngineSettings, rectangles: Vec<Rectangle>) -> Self {
        let highlight = HighlightProjector::new(settings.surface);
        Self {
            settings,
            store: SelectionStore::from_rectangles(rectangles),
            highlight,
            tool: Tool::default(),
            mode: InteractionMode::default(),
            staged: None,
            remove_target: None,
            hovered: None,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn surface(&self) -> Surface {
        self.settings.surface
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// Snapshot of the committed list.
    pub fn rectangles(&self) -> &[Rectangle] {
        self.store.rectangles()
    }

    pub fn confirmation_state(&self) -> ConfirmationState {
        self.store.confirmation_state()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn mode(&self) -> Mode {
        self.mode.kind()
    }

    pub fn interaction(&self) -> &InteractionMode {
        &self.mode
    }

    pub fn staged(&self) -> Option<StagedSelection> {
        self.staged
    }

    pub fn remove_target(&self) -> Option<u64> {
        self.remove_target
    }

    pub fn hovered(&self) -> Option<u64> {
        self.hovered
    }

    /// The draft the renderer should draw: the live gesture, else the staged one.
    pub fn draft(&self) -> Option<SelectionGeometry> {
        let surface = self.surface();
        match &self.mode {
            InteractionMode::Drawing { .. } => self.mode.drawing_rect(&surface),
            InteractionMode::Moving { session, .. } => session.current(),
            InteractionMode::Resizing { .. } | InteractionMode::Idle => {
                self.staged.map(|s| s.geometry)
            }
        }
    }

    /// Confirm (tick) affordance on the staged draft, hidden during gestures.
    pub fn confirm_affordance(&self) -> Option<SelectionGeometry> {
        if !self.mode.is_idle() {
            return None;
        }
        self.staged
            .map(|s| s.geometry.affordance(&self.settings.surface))
    }

    /// Remove (cancel) affordance on the remove target.
    pub fn remove_affordance(&self) -> Option<SelectionGeometry> {
        let id = self.remove_target?;
        self.store
            .get(id)
            .map(|r| r.geometry().affordance(&self.settings.surface))
    }

    /// Resize handle position while a resize is active.
    pub fn handle_position(&self) -> Option<Point> {
        self.mode.resize_handle()
    }

    pub fn stroke_width(&self) -> f32 {
        self.settings.surface.stroke_width()
    }

    pub fn stroke_color<'a>(&'a self, rectangle: &'a Rectangle) -> &'a str {
        rectangle.stroke_color(&self.settings.stroke_color)
    }

    pub fn highlight_mask(&self) -> Option<&HighlightMask> {
        self.highlight.current()
    }

    // ========================================================================
    // Host-driven updates
    // ========================================================================

    /// Switch tools; leaving the add tool drops an in-progress drawing.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool == tool {
            return;
        }
        debug!(from = ?self.tool, to = ?tool, "tool changed");
        if self.mode.is_drawing() {
            self.mode.reset();
        }
        if !self.store.is_pending() {
            self.remove_target = None;
        }
        self.tool = tool;
    }

    /// Replace the committed list with the host's authoritative copy.
    ///
    /// Staged drafts, the remove affordance and any pending confirmation
    /// are dropped.
    pub fn set_value(&mut self, rectangles: Vec<Rectangle>) {
        self.store.replace_all(rectangles);
        self.mode.reset();
        self.staged = None;
        self.remove_target = None;
        if let Some(id) = self.hovered {
            if !self.store.contains(id) {
                self.hovered = None;
            }
        }
        debug!(count = self.store.len(), "external value applied");
    }

    /// Update the highlight overlay; all-zero coordinates hide it.
    pub fn set_highlight(&mut self, coords: HighlightCoords) -> Option<&HighlightMask> {
        self.highlight.project(coords)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn resize_limits(&self) -> ResizeLimits {
        self.settings.resize_limits()
    }
}
