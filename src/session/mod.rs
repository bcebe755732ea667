//! Gesture sessions: explicit state for one move or resize drag.
//!
//! A session is created on pointer-down, fed pointer positions while the
//! button is held and consumed on pointer-up. Calling `update`/`end` on a
//! session that never started is an `InvalidState` error instead of reading
//! stale captured values.
//!
//! ## Modules
//!
//! - `resize` - handle drag to new dimensions, anchored on the hit edge/corner
//! - `drag` - body drag to new position, size unchanged

mod drag;
mod resize;

pub use drag::DragSession;
pub use resize::{AxisBounds, ResizeLimits, ResizeSession};
