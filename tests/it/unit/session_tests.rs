//! ResizeSession and DragSession behaviour.

use crate::helpers::{assert_within_surface, geom, pt};
use rectboard::error::SelectionError;
use rectboard::geometry::CursorHit;
use rectboard::session::{AxisBounds, DragSession, ResizeLimits, ResizeSession};
use rectboard::types::Surface;

// ============================================================================
// ResizeSession
// ============================================================================

#[test]
fn test_resize_bounds_for_bottom_right() {
    let surface = Surface::default();
    let mut session = ResizeSession::new();
    session.start(pt(60.0, 50.0), &geom(10.0, 10.0, 50.0, 40.0), &surface).unwrap();

    assert_eq!(
        session.bounds(),
        Some(AxisBounds {
            min_x: 20.0,
            max_x: 350.0,
            min_y: 20.0,
            max_y: 159.0,
        })
    );
    assert_eq!(session.pointer_origin(), Some(pt(60.0, 50.0)));
}

#[test]
fn test_resize_custom_limits() {
    let limits = ResizeLimits {
        threshold: 10.0,
        min_size: 30.0,
    };
    let mut session = ResizeSession::with_limits(limits);
    let anchor = session
        .start(pt(18.0, 30.0), &geom(10.0, 10.0, 50.0, 40.0), &Surface::default())
        .unwrap();
    assert_eq!(anchor, Some(CursorHit::Left));

    let next = session.update(pt(55.0, 30.0)).unwrap();
    assert_eq!(next, geom(30.0, 10.0, 30.0, 40.0));
    assert_eq!(session.limits(), limits);
}

#[test]
fn test_resize_handle_follows_clamped_pointer() {
    let mut session = ResizeSession::new();
    session
        .start(pt(60.0, 30.0), &geom(10.0, 10.0, 50.0, 40.0), &Surface::default())
        .unwrap();
    session.update(pt(1000.0, 30.0)).unwrap();
    assert_eq!(session.handle_position(), Some(pt(350.0, 30.0)));
    assert_eq!(session.anchor(), Some(CursorHit::Right));
}

#[test]
fn test_resize_end_without_update_returns_original() {
    let original = geom(10.0, 10.0, 50.0, 40.0);
    let mut session = ResizeSession::new();
    session.start(pt(10.0, 30.0), &original, &Surface::default()).unwrap();
    assert_eq!(session.end().unwrap(), original);
}

#[test]
fn test_resize_misuse_is_invalid_state() {
    let mut session = ResizeSession::new();
    assert!(matches!(
        session.update(pt(0.0, 0.0)),
        Err(SelectionError::InvalidState(_))
    ));
}

#[test]
fn test_resize_at_surface_corner_stays_inside() {
    let surface = Surface::new(100.0, 100.0);
    let mut session = ResizeSession::new();
    session.start(pt(99.0, 99.0), &geom(80.0, 80.0, 20.0, 20.0), &surface).unwrap();

    let next = session.update(pt(150.0, 150.0)).unwrap();
    assert_eq!(next, geom(80.0, 80.0, 20.0, 20.0));
    assert_within_surface(&next, &surface);
}

// ============================================================================
// DragSession
// ============================================================================

#[test]
fn test_drag_keeps_size() {
    let surface = Surface::default();
    let mut drag = DragSession::new();
    drag.start(pt(30.0, 30.0), &geom(10.0, 10.0, 50.0, 40.0)).unwrap();
    drag.update(pt(100.0, 70.0), &surface).unwrap();

    let current = drag.current().unwrap();
    assert_eq!(current, geom(80.0, 50.0, 50.0, 40.0));
}

#[test]
fn test_drag_oversized_rectangle_pinned_at_origin() {
    let surface = Surface::new(100.0, 100.0);
    let mut drag = DragSession::new();
    drag.start(pt(50.0, 50.0), &geom(0.0, 0.0, 150.0, 50.0)).unwrap();

    assert_eq!(drag.update(pt(80.0, 60.0), &surface).unwrap(), pt(0.0, 10.0));
}

#[test]
fn test_drag_double_start_is_invalid() {
    let mut drag = DragSession::new();
    drag.start(pt(0.0, 0.0), &geom(0.0, 0.0, 10.0, 10.0)).unwrap();
    assert!(matches!(
        drag.start(pt(0.0, 0.0), &geom(0.0, 0.0, 10.0, 10.0)),
        Err(SelectionError::InvalidState(_))
    ));
}
