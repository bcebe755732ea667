//! Interaction state machine - one explicit mode instead of scattered flags.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Drawing      (pointer down on empty surface with the add tool, nothing pending)
//! Idle -> Moving       (pointer down inside a rectangle body)
//! Idle -> Resizing     (pointer down on a rectangle edge or corner)
//!
//! Any -> Idle          (pointer up / pointer leave - finalizes the gesture)
//! ```

use crate::geometry::{CursorHit, rect_from_corners};
use crate::session::{DragSession, ResizeSession};
use crate::types::{Point, SelectionGeometry, Surface};

/// Which gesture is active, without its data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Idle,
    Drawing,
    Moving,
    Resizing,
}

/// Active tool; add and remove are mutually exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Move/resize only
    #[default]
    Select,
    /// Draw new rectangles on empty surface
    Add,
    /// Pointer down on a rectangle offers its removal
    Remove,
}

/// Draft geometry waiting for a confirm gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StagedSelection {
    pub geometry: SelectionGeometry,
    /// Committed rectangle this draft edits, `None` for a new selection
    pub target_id: Option<u64>,
}

/// Interaction state with the data each gesture needs.
#[derive(Debug, Clone, Default)]
pub enum InteractionMode {
    #[default]
    Idle,

    /// Rubber-band drawing of a new draft
    Drawing {
        /// Pointer-down position, clamped into the surface
        origin: Point,
        /// Latest pointer position
        current: Point,
    },

    /// Moving the staged draft
    Moving {
        session: DragSession,
        target_id: Option<u64>,
    },

    /// Resizing the staged draft
    Resizing {
        session: ResizeSession,
        target_id: Option<u64>,
    },
}

impl InteractionMode {
    pub fn kind(&self) -> Mode {
        match self {
            Self::Idle => Mode::Idle,
            Self::Drawing { .. } => Mode::Drawing,
            Self::Moving { .. } => Mode::Moving,
            Self::Resizing { .. } => Mode::Resizing,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// Returns true if a move or resize drag is active
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Moving { .. } | Self::Resizing { .. })
    }

    /// Rectangle being drawn, normalized and clamped into the surface.
    pub fn drawing_rect(&self, surface: &Surface) -> Option<SelectionGeometry> {
        match self {
            Self::Drawing { origin, current } => Some(rect_from_corners(*origin, *current, surface)),
            _ => None,
        }
    }

    /// Id of the committed rectangle being edited, if any
    pub fn target_id(&self) -> Option<u64> {
        match self {
            Self::Moving { target_id, .. } | Self::Resizing { target_id, .. } => *target_id,
            _ => None,
        }
    }

    /// Point an active edit of `from` at the committed rectangle `to`.
    pub fn retarget(&mut self, from: Option<u64>, to: u64) -> bool {
        match self {
            Self::Moving { target_id, .. } | Self::Resizing { target_id, .. }
                if *target_id == from =>
            {
                *target_id = Some(to);
                true
            }
            _ => false,
        }
    }

    pub fn resize_anchor(&self) -> Option<CursorHit> {
        match self {
            Self::Resizing { session, .. } => session.anchor(),
            _ => None,
        }
    }

    pub fn resize_handle(&self) -> Option<Point> {
        match self {
            Self::Resizing { session, .. } => session.handle_position(),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
