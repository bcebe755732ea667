//! Full gestures through the InteractionController.

use crate::helpers::{ControllerBuilder, HostCall, RecordingHost, draw, drag, geom, ids, pt};
use rectboard::geometry::{CursorGlyph, CursorHit};
use rectboard::input::{Mode, StagedSelection, Tool};
use rectboard::selection::{AddDecision, AddOutcome, RemoveDecision, RemoveOutcome};

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_draw_commits_on_pointer_up() {
    let mut controller = ControllerBuilder::new().with_tool(Tool::Add).build();
    let host = RecordingHost::new();

    let outcome = draw(&mut controller, &host, pt(10.0, 10.0), pt(60.0, 50.0));

    assert_eq!(outcome, AddOutcome::Added(geom(10.0, 10.0, 50.0, 40.0).with_id(1)));
    assert_eq!(
        host.calls(),
        vec![HostCall::Add {
            candidate: geom(10.0, 10.0, 50.0, 40.0),
            existing_id: None,
        }]
    );
    assert_eq!(controller.mode(), Mode::Idle);
    assert!(controller.draft().is_none());
}

#[test]
fn test_draw_preview_while_dragging() {
    let mut controller = ControllerBuilder::new().with_tool(Tool::Add).build();
    controller.pointer_down(pt(100.0, 100.0)).unwrap();
    controller.pointer_move(pt(40.0, 130.0)).unwrap();

    assert_eq!(controller.mode(), Mode::Drawing);
    assert_eq!(controller.draft(), Some(geom(40.0, 100.0, 60.0, 30.0)));
    assert!(controller.confirm_affordance().is_none());
}

#[test]
fn test_draw_rejected_by_host_discards_draft() {
    let mut controller = ControllerBuilder::new()
        .with_rect(3, 200.0, 10.0, 50.0, 50.0)
        .with_tool(Tool::Add)
        .build();
    let before = controller.rectangles().to_vec();
    let host = RecordingHost::new().answer_add(Ok(AddDecision::Reject));

    let outcome = draw(&mut controller, &host, pt(10.0, 10.0), pt(60.0, 50.0));

    assert_eq!(outcome, AddOutcome::Cancelled);
    assert_eq!(controller.rectangles(), before.as_slice());
    assert!(controller.staged().is_none());
    assert_eq!(controller.mode(), Mode::Idle);
}

#[test]
fn test_draw_past_surface_is_clamped() {
    let mut controller = ControllerBuilder::new()
        .with_surface(100.0, 100.0)
        .with_tool(Tool::Add)
        .build();
    let outcome = draw(&mut controller, &RecordingHost::new(), pt(50.0, 50.0), pt(500.0, -20.0));
    assert_eq!(outcome.rectangle().map(|r| r.geometry()), Some(geom(50.0, 0.0, 50.0, 50.0)));
}

#[test]
fn test_two_drawings_get_distinct_ids() {
    let mut controller = ControllerBuilder::new().with_tool(Tool::Add).build();
    let host = RecordingHost::new();
    draw(&mut controller, &host, pt(10.0, 10.0), pt(60.0, 50.0));
    draw(&mut controller, &host, pt(100.0, 10.0), pt(160.0, 50.0));

    assert_eq!(ids(&controller), vec![1, 2]);
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_move_stages_without_committing() {
    let mut controller = ControllerBuilder::new().with_rect(7, 10.0, 10.0, 50.0, 40.0).build();

    assert!(drag(&mut controller, pt(30.0, 30.0), pt(80.0, 60.0)).is_none());

    assert_eq!(
        controller.staged(),
        Some(StagedSelection {
            geometry: geom(60.0, 40.0, 50.0, 40.0),
            target_id: Some(7),
        })
    );
    assert_eq!(controller.rectangles()[0].geometry(), geom(10.0, 10.0, 50.0, 40.0));
    assert_eq!(
        controller.confirm_affordance(),
        Some(geom(100.0, 40.0, 10.0, 10.0))
    );
}

#[test]
fn test_confirm_edit_updates_in_place() {
    let mut controller = ControllerBuilder::new()
        .with_rect(7, 10.0, 10.0, 50.0, 40.0)
        .with_rect(8, 200.0, 100.0, 20.0, 20.0)
        .build();
    let host = RecordingHost::new().answer_add(Ok(AddDecision::Adopt(42)));

    drag(&mut controller, pt(30.0, 30.0), pt(80.0, 60.0));
    let outcome = pollster::block_on(controller.commit_staged(&host)).unwrap();

    assert_eq!(
        outcome,
        AddOutcome::Updated {
            previous_id: 7,
            rectangle: geom(60.0, 40.0, 50.0, 40.0).with_id(42),
        }
    );
    assert_eq!(ids(&controller), vec![42, 8]);
    assert!(controller.staged().is_none());
}

#[test]
fn test_resize_from_corner_then_confirm() {
    let mut controller = ControllerBuilder::new().with_rect(1, 10.0, 10.0, 50.0, 40.0).build();

    controller.pointer_down(pt(59.0, 49.0)).unwrap();
    assert_eq!(controller.mode(), Mode::Resizing);
    assert_eq!(controller.interaction().resize_anchor(), Some(CursorHit::BottomRight));

    let feedback = controller.pointer_move(pt(100.0, 80.0)).unwrap();
    assert_eq!(feedback.cursor, Some(CursorGlyph::NwseResize));
    assert_eq!(controller.handle_position(), Some(pt(100.0, 80.0)));

    controller.pointer_up(pt(100.0, 80.0)).unwrap();
    let outcome = pollster::block_on(controller.commit_staged(&RecordingHost::new())).unwrap();
    assert_eq!(
        outcome.rectangle().map(|r| r.geometry()),
        Some(geom(10.0, 10.0, 90.0, 70.0))
    );
    assert_eq!(outcome.rectangle().map(|r| r.id), Some(1));
}

#[test]
fn test_resize_never_below_minimum() {
    let mut controller = ControllerBuilder::new().with_rect(1, 10.0, 10.0, 50.0, 40.0).build();

    controller.pointer_down(pt(59.0, 30.0)).unwrap();
    controller.pointer_move(pt(-100.0, 30.0)).unwrap();
    controller.pointer_up(pt(-100.0, 30.0)).unwrap();

    assert_eq!(controller.staged().map(|s| s.geometry), Some(geom(10.0, 10.0, 10.0, 40.0)));
}

#[test]
fn test_staged_draft_can_be_adjusted_again() {
    let mut controller = ControllerBuilder::new().with_rect(1, 10.0, 10.0, 50.0, 40.0).build();

    drag(&mut controller, pt(30.0, 30.0), pt(40.0, 30.0));
    drag(&mut controller, pt(50.0, 30.0), pt(50.0, 40.0));

    assert_eq!(
        controller.staged(),
        Some(StagedSelection {
            geometry: geom(20.0, 20.0, 50.0, 40.0),
            target_id: Some(1),
        })
    );
}

#[test]
fn test_click_on_empty_surface_clears_staged_draft() {
    let mut controller = ControllerBuilder::new().with_rect(1, 10.0, 10.0, 50.0, 40.0).build();
    drag(&mut controller, pt(30.0, 30.0), pt(40.0, 30.0));
    assert!(controller.staged().is_some());

    controller.pointer_down(pt(300.0, 150.0)).unwrap();
    controller.pointer_up(pt(300.0, 150.0)).unwrap();
    assert!(controller.staged().is_none());
}

#[test]
fn test_leave_while_drawing_discards() {
    let mut controller = ControllerBuilder::new().with_tool(Tool::Add).build();
    controller.pointer_down(pt(10.0, 10.0)).unwrap();
    controller.pointer_move(pt(80.0, 80.0)).unwrap();
    controller.pointer_leave().unwrap();

    assert_eq!(controller.mode(), Mode::Idle);
    assert!(controller.draft().is_none());
    assert!(!controller.store().is_pending());
}

// ============================================================================
// Remove tool
// ============================================================================

#[test]
fn test_remove_tool_offers_and_removes() {
    let mut controller = ControllerBuilder::new()
        .with_rect(7, 10.0, 10.0, 50.0, 40.0)
        .with_rect(8, 100.0, 10.0, 50.0, 40.0)
        .with_tool(Tool::Remove)
        .build();

    controller.pointer_down(pt(120.0, 30.0)).unwrap();
    assert_eq!(controller.remove_target(), Some(8));
    assert_eq!(controller.remove_affordance(), Some(geom(140.0, 10.0, 10.0, 10.0)));

    let outcome = pollster::block_on(controller.commit_remove(&RecordingHost::new())).unwrap();
    assert!(matches!(outcome, RemoveOutcome::Removed(r) if r.id == 8));
    assert_eq!(ids(&controller), vec![7]);
    assert_eq!(controller.remove_target(), None);
}

#[test]
fn test_remove_kept_by_host() {
    let mut controller = ControllerBuilder::new()
        .with_rect(7, 10.0, 10.0, 50.0, 40.0)
        .with_tool(Tool::Remove)
        .build();
    let host = RecordingHost::new().answer_remove(Ok(RemoveDecision::Keep));

    controller.pointer_down(pt(20.0, 20.0)).unwrap();
    let outcome = pollster::block_on(controller.commit_remove(&host)).unwrap();

    assert_eq!(outcome, RemoveOutcome::Kept);
    assert_eq!(ids(&controller), vec![7]);
}

#[test]
fn test_remove_target_follows_hover() {
    let mut controller = ControllerBuilder::new()
        .with_rect(7, 10.0, 10.0, 50.0, 40.0)
        .with_tool(Tool::Remove)
        .build();

    controller.pointer_move(pt(20.0, 20.0)).unwrap();
    assert_eq!(controller.remove_target(), Some(7));
    controller.pointer_move(pt(200.0, 100.0)).unwrap();
    assert_eq!(controller.remove_target(), None);
}

// ============================================================================
// Hover and rendering hints
// ============================================================================

#[test]
fn test_hover_notifications_reach_host() {
    let mut controller = ControllerBuilder::new()
        .with_rect(1, 10.0, 10.0, 50.0, 40.0)
        .with_rect(2, 100.0, 10.0, 50.0, 40.0)
        .build();
    let host = RecordingHost::new();

    for point in [pt(20.0, 20.0), pt(25.0, 20.0), pt(120.0, 20.0), pt(300.0, 150.0)] {
        if let Some(change) = controller.pointer_move(point).unwrap().hover {
            change.notify(&host);
        }
    }

    assert_eq!(
        host.calls(),
        vec![
            HostCall::Hover(1),
            HostCall::HoverOut(1),
            HostCall::Hover(2),
            HostCall::HoverOut(2),
        ]
    );
}

#[test]
fn test_stroke_uses_rect_color_or_default() {
    let controller = ControllerBuilder::new().with_rect(1, 0.0, 0.0, 10.0, 10.0).build();
    let rect = &controller.rectangles()[0];
    assert_eq!(controller.stroke_color(rect), "rgb(208, 38, 38)");
    assert_eq!(controller.stroke_width(), 1.0);
}
