//! Selection store - owns the committed rectangle list.
//!
//! The list keeps insertion order; an edit replaces its rectangle in place.
//! Ids are unique within one store: host-supplied ids are re-checked and a
//! store-owned monotonic counter fills in when the host leaves the choice to
//! us or proposes an id that is already taken.

use super::host::{AddDecision, ConfirmationKind, HostError, RemoveDecision, SelectionHost};
use crate::error::{SelectionError, SelectionResult};
use crate::geometry::hit_test_with;
use crate::spatial_index::SpatialIndex;
use crate::types::{Point, Rectangle, SelectionGeometry};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Request handed to the host for an add or edit.
#[derive(Clone, Debug, PartialEq)]
pub struct AddRequest {
    pub ticket: u64,
    pub candidate: SelectionGeometry,
    pub existing_id: Option<u64>,
}

/// Request handed to the host for a removal.
#[derive(Clone, Debug, PartialEq)]
pub struct RemoveRequest {
    pub ticket: u64,
    pub id: u64,
    pub rectangle: Rectangle,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AddOutcome {
    /// Appended at the end of the list
    Added(Rectangle),
    /// Replaced `previous_id` at the same list position
    Updated { previous_id: u64, rectangle: Rectangle },
    /// Host rejected; nothing changed
    Cancelled,
}

impl AddOutcome {
    pub fn rectangle(&self) -> Option<&Rectangle> {
        match self {
            Self::Added(rectangle) | Self::Updated { rectangle, .. } => Some(rectangle),
            Self::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RemoveOutcome {
    Removed(Rectangle),
    /// Host rejected; the rectangle stays
    Kept,
}

/// Snapshot of the pending-confirmation guard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfirmationState {
    pub pending: bool,
    pub kind: Option<ConfirmationKind>,
    pub target_id: Option<u64>,
}

#[derive(Clone, Debug)]
enum Pending {
    Add {
        ticket: u64,
        candidate: SelectionGeometry,
        target: Option<u64>,
    },
    Remove {
        ticket: u64,
        id: u64,
    },
}

impl Pending {
    fn ticket(&self) -> u64 {
        match self {
            Self::Add { ticket, .. } | Self::Remove { ticket, .. } => *ticket,
        }
    }

    fn kind(&self) -> ConfirmationKind {
        match self {
            Self::Add { .. } => ConfirmationKind::Add,
            Self::Remove { .. } => ConfirmationKind::Remove,
        }
    }

    fn target_id(&self) -> Option<u64> {
        match self {
            Self::Add { target, .. } => *target,
            Self::Remove { id, .. } => Some(*id),
        }
    }
}

/// Owner of the committed selection list.
pub struct SelectionStore {
    rectangles: Vec<Rectangle>,
    index: SpatialIndex,
    next_id_hint: u64,
    next_ticket: u64,
    pending: Option<Pending>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::from_rectangles(Vec::new())
    }

    pub fn from_rectangles(rectangles: Vec<Rectangle>) -> Self {
        let mut store = Self {
            rectangles: dedup_ids(rectangles),
            index: SpatialIndex::new(),
            next_id_hint: 1,
            next_ticket: 1,
            pending: None,
        };
        store.rebuild_index();
        store
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn get(&self, id: u64) -> Option<&Rectangle> {
        self.rectangles.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.rectangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    /// Topmost rectangle containing the point; later entries draw on top.
    pub fn topmost_at(&self, point: Point) -> Option<&Rectangle> {
        self.topmost_matching(point, 0.0, |r| r.contains(point))
    }

    /// Topmost rectangle the pointer can grab: inside it, or within
    /// `threshold` of one of its edges.
    pub fn topmost_grabbable(&self, point: Point, threshold: f32) -> Option<&Rectangle> {
        self.topmost_matching(point, threshold, |r| {
            r.contains(point) || !hit_test_with(point, &r.geometry(), threshold).is_none()
        })
    }

    fn topmost_matching<F>(&self, point: Point, margin: f32, accept: F) -> Option<&Rectangle>
    where
        F: Fn(&Rectangle) -> bool,
    {
        let candidates: HashSet<u64> = self.index.query_near(point, margin).into_iter().collect();
        if candidates.is_empty() {
            return None;
        }
        self.rectangles
            .iter()
            .rev()
            .find(|r| candidates.contains(&r.id) && accept(r))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn confirmation_state(&self) -> ConfirmationState {
        match &self.pending {
            Some(pending) => ConfirmationState {
                pending: true,
                kind: Some(pending.kind()),
                target_id: pending.target_id(),
            },
            None => ConfirmationState::default(),
        }
    }

    /// The outstanding add request, for re-asking the host after a failure.
    pub fn pending_add_request(&self) -> Option<AddRequest> {
        match &self.pending {
            Some(Pending::Add {
                ticket,
                candidate,
                target,
            }) => Some(AddRequest {
                ticket: *ticket,
                candidate: *candidate,
                existing_id: *target,
            }),
            _ => None,
        }
    }

    /// The outstanding remove request, for re-asking the host after a failure.
    pub fn pending_remove_request(&self) -> Option<RemoveRequest> {
        match &self.pending {
            Some(Pending::Remove { ticket, id }) => self.get(*id).map(|rectangle| RemoveRequest {
                ticket: *ticket,
                id: *id,
                rectangle: rectangle.clone(),
            }),
            _ => None,
        }
    }

    // ========================================================================
    // Add / edit
    // ========================================================================

    /// Open an add (or, with `existing_id`, an edit) confirmation.
    pub fn begin_add(
        &mut self,
        candidate: SelectionGeometry,
        existing_id: Option<u64>,
    ) -> SelectionResult<AddRequest> {
        self.ensure_idle()?;

        if candidate.is_degenerate() {
            debug!(?candidate, "discarding empty selection");
            return Err(SelectionError::DegenerateGeometry {
                width: candidate.width,
                height: candidate.height,
            });
        }
        if let Some(id) = existing_id {
            if !self.contains(id) {
                return Err(SelectionError::UnknownRectangle(id));
            }
        }

        let ticket = self.take_ticket();
        self.pending = Some(Pending::Add {
            ticket,
            candidate,
            target: existing_id,
        });
        debug!(ticket, ?existing_id, "add confirmation requested");

        Ok(AddRequest {
            ticket,
            candidate,
            existing_id,
        })
    }

    /// Apply the host's answer to the pending add.
    ///
    /// A host failure leaves the request pending so it can be retried or
    /// abandoned.
    pub fn resolve_add(
        &mut self,
        ticket: u64,
        answer: Result<AddDecision, HostError>,
    ) -> SelectionResult<AddOutcome> {
        match &self.pending {
            Some(Pending::Add { ticket: t, .. }) if *t == ticket => {}
            Some(_) => return Err(SelectionError::StaleConfirmation { ticket }),
            None => return Err(SelectionError::NoPendingConfirmation),
        }

        let decision = match answer {
            Ok(decision) => decision,
            Err(err) => {
                warn!(ticket, "add confirmation failed: {}", err);
                return Err(SelectionError::HostConfirmationFailed(err));
            }
        };

        let Some(Pending::Add {
            candidate, target, ..
        }) = self.pending.take()
        else {
            return Err(SelectionError::NoPendingConfirmation);
        };

        if decision == AddDecision::Reject {
            debug!(ticket, "add rejected by host");
            return Ok(AddOutcome::Cancelled);
        }

        match target {
            Some(previous_id) => self.replace_in_place(previous_id, candidate, decision),
            None => {
                let id = match decision {
                    AddDecision::Adopt(id) if !self.contains(id) => id,
                    _ => self.fresh_id(),
                };
                let rectangle = candidate.with_id(id);
                self.index.insert(id, &candidate);
                self.rectangles.push(rectangle.clone());
                info!(id, "selection added");
                Ok(AddOutcome::Added(rectangle))
            }
        }
    }

    fn replace_in_place(
        &mut self,
        previous_id: u64,
        candidate: SelectionGeometry,
        decision: AddDecision,
    ) -> SelectionResult<AddOutcome> {
        let position = self
            .rectangles
            .iter()
            .position(|r| r.id == previous_id)
            .ok_or(SelectionError::UnknownRectangle(previous_id))?;

        let id = match decision {
            AddDecision::Adopt(id) if id == previous_id || !self.contains(id) => id,
            AddDecision::Adopt(_) => self.fresh_id(),
            _ => previous_id,
        };

        let color = self.rectangles[position].color.take();
        let rectangle = Rectangle {
            color,
            ..candidate.with_id(id)
        };

        self.index.remove(previous_id);
        self.index.insert(id, &candidate);
        self.rectangles[position] = rectangle.clone();
        info!(previous_id, id, "selection updated");

        Ok(AddOutcome::Updated {
            previous_id,
            rectangle,
        })
    }

    // ========================================================================
    // Remove
    // ========================================================================

    /// Open a remove confirmation for `id`.
    pub fn begin_remove(&mut self, id: u64) -> SelectionResult<RemoveRequest> {
        self.ensure_idle()?;

        let rectangle = self
            .get(id)
            .cloned()
            .ok_or(SelectionError::UnknownRectangle(id))?;

        let ticket = self.take_ticket();
        self.pending = Some(Pending::Remove { ticket, id });
        debug!(ticket, id, "remove confirmation requested");

        Ok(RemoveRequest {
            ticket,
            id,
            rectangle,
        })
    }

    /// Apply the host's answer to the pending remove.
    pub fn resolve_remove(
        &mut self,
        ticket: u64,
        answer: Result<RemoveDecision, HostError>,
    ) -> SelectionResult<RemoveOutcome> {
        let id = match &self.pending {
            Some(Pending::Remove { ticket: t, id }) if *t == ticket => *id,
            Some(_) => return Err(SelectionError::StaleConfirmation { ticket }),
            None => return Err(SelectionError::NoPendingConfirmation),
        };

        let decision = match answer {
            Ok(decision) => decision,
            Err(err) => {
                warn!(ticket, id, "remove confirmation failed: {}", err);
                return Err(SelectionError::HostConfirmationFailed(err));
            }
        };
        self.pending = None;

        if decision == RemoveDecision::Keep {
            debug!(ticket, id, "remove rejected by host");
            return Ok(RemoveOutcome::Kept);
        }

        let position = self
            .rectangles
            .iter()
            .position(|r| r.id == id)
            .ok_or(SelectionError::UnknownRectangle(id))?;
        let removed = self.rectangles.remove(position);
        self.index.remove(id);
        info!(id, "selection removed");

        Ok(RemoveOutcome::Removed(removed))
    }

    /// Drop the outstanding confirmation without touching the list.
    pub fn abandon_pending(&mut self) -> Option<ConfirmationKind> {
        let pending = self.pending.take()?;
        debug!(ticket = pending.ticket(), "pending confirmation abandoned");
        Some(pending.kind())
    }

    // ========================================================================
    // Async drivers
    // ========================================================================

    /// Ask the host and apply its answer in one step.
    pub async fn add<H: SelectionHost>(
        &mut self,
        host: &H,
        candidate: SelectionGeometry,
        existing_id: Option<u64>,
    ) -> SelectionResult<AddOutcome> {
        let request = self.begin_add(candidate, existing_id)?;
        let answer = host
            .confirm_add(&request.candidate, request.existing_id)
            .await;
        self.resolve_add(request.ticket, answer)
    }

    /// Ask the host and apply its answer in one step.
    pub async fn remove<H: SelectionHost>(
        &mut self,
        host: &H,
        id: u64,
    ) -> SelectionResult<RemoveOutcome> {
        let request = self.begin_remove(id)?;
        let answer = host.confirm_remove(request.id, &request.rectangle).await;
        self.resolve_remove(request.ticket, answer)
    }

    // ========================================================================
    // External sync
    // ========================================================================

    /// Replace the whole list with an authoritative copy from the host.
    ///
    /// Any outstanding confirmation is discarded; a late answer for it gets
    /// `StaleConfirmation` or `NoPendingConfirmation`. Only the first
    /// rectangle with a given id is kept.
    pub fn replace_all(&mut self, rectangles: Vec<Rectangle>) {
        if let Some(pending) = self.pending.take() {
            debug!(ticket = pending.ticket(), "external sync discarded pending confirmation");
        }

        self.rectangles = dedup_ids(rectangles);
        self.rebuild_index();
        debug!(count = self.rectangles.len(), "selection list replaced");
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn ensure_idle(&self) -> SelectionResult<()> {
        match &self.pending {
            Some(pending) => Err(SelectionError::ConfirmationPending {
                kind: pending.kind(),
            }),
            None => Ok(()),
        }
    }

    fn take_ticket(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    /// Next counter value not already used by a rectangle in the list.
    fn fresh_id(&mut self) -> u64 {
        loop {
            let id = self.next_id_hint;
            self.next_id_hint += 1;
            if !self.contains(id) {
                return id;
            }
            debug!(id, "id collision, retrying");
        }
    }

    fn rebuild_index(&mut self) {
        let entries: Vec<(u64, SelectionGeometry)> =
            self.rectangles.iter().map(|r| (r.id, r.geometry())).collect();
        self.index.rebuild(entries.iter().map(|(id, g)| (*id, g)));
    }
}

/// Keep the first rectangle for each id; ids are unique within a store.
fn dedup_ids(rectangles: Vec<Rectangle>) -> Vec<Rectangle> {
    let mut seen = HashSet::with_capacity(rectangles.len());
    rectangles
        .into_iter()
        .filter(|r| {
            let first = seen.insert(r.id);
            if !first {
                warn!(id = r.id, "duplicate selection id dropped");
            }
            first
        })
        .collect()
}
