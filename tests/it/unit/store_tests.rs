//! SelectionStore: id assignment, confirmation protocol, external sync.

use crate::helpers::{RecordingHost, geom, rect};
use rectboard::error::SelectionError;
use rectboard::selection::{
    AddDecision, AddOutcome, ConfirmationKind, HostError, RemoveDecision, RemoveOutcome,
    SelectionStore,
};
use rectboard::types::Point;

fn store_with_seven() -> SelectionStore {
    SelectionStore::from_rectangles(vec![
        rect(3, 0.0, 0.0, 20.0, 20.0),
        rect(7, 30.0, 30.0, 20.0, 20.0),
        rect(9, 60.0, 60.0, 20.0, 20.0),
    ])
}

// ============================================================================
// Add
// ============================================================================

#[test]
fn test_add_twice_yields_distinct_ids() {
    let mut store = SelectionStore::new();
    let host = RecordingHost::new();

    let first = pollster::block_on(store.add(&host, geom(10.0, 10.0, 50.0, 40.0), None)).unwrap();
    let second = pollster::block_on(store.add(&host, geom(10.0, 10.0, 50.0, 40.0), None)).unwrap();

    let a = first.rectangle().unwrap().id;
    let b = second.rectangle().unwrap().id;
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_add_rejected_leaves_list_unchanged() {
    let mut store = store_with_seven();
    let before = store.rectangles().to_vec();
    let host = RecordingHost::new().answer_add(Ok(AddDecision::Reject));

    let outcome =
        pollster::block_on(store.add(&host, geom(100.0, 10.0, 50.0, 40.0), None)).unwrap();
    assert_eq!(outcome, AddOutcome::Cancelled);
    assert_eq!(store.rectangles(), before.as_slice());
    assert!(!store.is_pending());
}

#[test]
fn test_add_adopts_host_id() {
    let mut store = SelectionStore::new();
    let host = RecordingHost::new().answer_add(Ok(AddDecision::Adopt(42)));

    let outcome = pollster::block_on(store.add(&host, geom(1.0, 1.0, 20.0, 20.0), None)).unwrap();
    assert_eq!(outcome, AddOutcome::Added(rect(42, 1.0, 1.0, 20.0, 20.0)));
}

#[test]
fn test_update_remaps_id_in_place() {
    let mut store = store_with_seven();
    let host = RecordingHost::new().answer_add(Ok(AddDecision::Adopt(42)));

    let outcome =
        pollster::block_on(store.add(&host, geom(35.0, 35.0, 25.0, 25.0), Some(7))).unwrap();

    assert_eq!(
        outcome,
        AddOutcome::Updated {
            previous_id: 7,
            rectangle: rect(42, 35.0, 35.0, 25.0, 25.0),
        }
    );
    let ids: Vec<u64> = store.rectangles().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 42, 9]);
    assert!(store.get(7).is_none());
}

#[test]
fn test_update_adopting_own_id_is_not_a_collision() {
    let mut store = store_with_seven();
    let host = RecordingHost::new().answer_add(Ok(AddDecision::Adopt(7)));

    let outcome =
        pollster::block_on(store.add(&host, geom(31.0, 31.0, 20.0, 20.0), Some(7))).unwrap();
    assert_eq!(outcome.rectangle().map(|r| r.id), Some(7));
}

#[test]
fn test_update_adopting_taken_id_gets_fresh_id() {
    let mut store = store_with_seven();
    let host = RecordingHost::new().answer_add(Ok(AddDecision::Adopt(9)));

    let outcome =
        pollster::block_on(store.add(&host, geom(31.0, 31.0, 20.0, 20.0), Some(7))).unwrap();
    let id = outcome.rectangle().unwrap().id;
    assert!(![3, 9].contains(&id));
    assert_eq!(store.len(), 3);
}

#[test]
fn test_update_unknown_target_rejected() {
    let mut store = store_with_seven();
    assert!(matches!(
        store.begin_add(geom(0.0, 0.0, 10.0, 10.0), Some(100)),
        Err(SelectionError::UnknownRectangle(100))
    ));
    assert!(!store.is_pending());
}

#[test]
fn test_degenerate_candidate_never_reaches_host() {
    let mut store = SelectionStore::new();
    let host = RecordingHost::new();

    let err = pollster::block_on(store.add(&host, geom(10.0, 10.0, 30.0, 0.0), None)).unwrap_err();
    assert!(err.is_silent());
    assert!(host.calls().is_empty());
    assert!(store.is_empty());
}

// ============================================================================
// Remove
// ============================================================================

#[test]
fn test_remove_exactly_one() {
    let mut store = store_with_seven();
    let host = RecordingHost::new();

    let outcome = pollster::block_on(store.remove(&host, 7)).unwrap();
    assert_eq!(outcome, RemoveOutcome::Removed(rect(7, 30.0, 30.0, 20.0, 20.0)));
    let ids: Vec<u64> = store.rectangles().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 9]);
}

#[test]
fn test_remove_unknown_id() {
    let mut store = store_with_seven();
    assert!(matches!(
        store.begin_remove(1),
        Err(SelectionError::UnknownRectangle(1))
    ));
}

#[test]
fn test_remove_host_failure_then_retry() {
    let mut store = store_with_seven();
    let request = store.begin_remove(9).unwrap();

    let err = store
        .resolve_remove(request.ticket, Err(HostError::new("offline")))
        .unwrap_err();
    assert!(matches!(err, SelectionError::HostConfirmationFailed(_)));
    assert_eq!(store.pending_remove_request(), Some(request.clone()));

    let outcome = store
        .resolve_remove(request.ticket, Ok(RemoveDecision::from(true)))
        .unwrap();
    assert!(matches!(outcome, RemoveOutcome::Removed(r) if r.id == 9));
}

// ============================================================================
// Pending discipline
// ============================================================================

#[test]
fn test_wrong_ticket_is_stale() {
    let mut store = store_with_seven();
    let request = store.begin_remove(3).unwrap();

    assert!(matches!(
        store.resolve_remove(request.ticket + 1, Ok(RemoveDecision::Remove)),
        Err(SelectionError::StaleConfirmation { .. })
    ));
    assert!(matches!(
        store.resolve_add(request.ticket, Ok(AddDecision::Accept)),
        Err(SelectionError::StaleConfirmation { .. })
    ));
    assert!(store.is_pending());
}

#[test]
fn test_resolve_without_pending() {
    let mut store = SelectionStore::new();
    assert!(matches!(
        store.resolve_add(1, Ok(AddDecision::Accept)),
        Err(SelectionError::NoPendingConfirmation)
    ));
}

#[test]
fn test_abandon_clears_pending() {
    let mut store = store_with_seven();
    store.begin_remove(3).unwrap();
    assert_eq!(store.abandon_pending(), Some(ConfirmationKind::Remove));
    assert_eq!(store.abandon_pending(), None);
    assert_eq!(store.len(), 3);
}

// ============================================================================
// External sync and lookups
// ============================================================================

#[test]
fn test_replace_all_reindexes() {
    let mut store = store_with_seven();
    store.replace_all(vec![rect(100, 200.0, 100.0, 20.0, 20.0)]);

    assert!(store.topmost_at(Point::new(35.0, 35.0)).is_none());
    assert_eq!(store.topmost_at(Point::new(210.0, 110.0)).map(|r| r.id), Some(100));
}

#[test]
fn test_fresh_ids_skip_synced_ids() {
    let mut store = SelectionStore::new();
    store.replace_all(vec![rect(1, 0.0, 0.0, 10.0, 10.0), rect(2, 20.0, 0.0, 10.0, 10.0)]);

    let outcome = pollster::block_on(store.add(
        &RecordingHost::new(),
        geom(50.0, 50.0, 10.0, 10.0),
        None,
    ))
    .unwrap();
    assert_eq!(outcome.rectangle().map(|r| r.id), Some(3));
}
