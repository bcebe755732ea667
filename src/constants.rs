//! Engine-wide constants.
//!
//! Centralizes magic numbers for the selection surface so the geometry,
//! sessions and controller agree on the same defaults.

// ============================================================================
// Surface Defaults
// ============================================================================

/// Default surface width in surface units
pub const DEFAULT_SURFACE_WIDTH: f32 = 350.0;

/// Default surface height in surface units
pub const DEFAULT_SURFACE_HEIGHT: f32 = 159.0;

// ============================================================================
// Hit Testing & Resizing
// ============================================================================

/// Distance below which a pointer counts as "near" a rectangle edge
pub const HIT_THRESHOLD: f32 = 5.0;

/// Smallest width or height a resize may produce
pub const MIN_SELECTION_SIZE: f32 = 10.0;

// ============================================================================
// Affordances & Styling
// ============================================================================

/// Smallest side of the confirm/remove affordance squares
pub const MIN_AFFORDANCE_SIZE: f32 = 10.0;

/// Affordance side grows with surface area by this factor
pub const AFFORDANCE_AREA_FACTOR: f32 = 0.000_01;

/// Thinnest stroke used for committed rectangles
pub const MIN_STROKE_WIDTH: f32 = 1.0;

/// Stroke width grows with surface area by this factor
pub const STROKE_AREA_FACTOR: f32 = 0.000_001_2;

/// Stroke colour for rectangles that carry no colour of their own
pub const DEFAULT_STROKE_COLOR: &str = "rgb(208, 38, 38)";
