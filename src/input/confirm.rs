//! Commit and remove gestures.
//!
//! Every commit is a host round trip. The synchronous half (`confirm_staged`,
//! `request_remove`, `resolve_*`) lets an event loop keep delivering pointer
//! events while the host thinks; the async helpers run the whole round trip
//! for callers that can simply await it.

use super::{InteractionController, StagedSelection};
use crate::error::{SelectionError, SelectionResult};
use crate::selection::{
    AddDecision, AddOutcome, AddRequest, ConfirmationKind, HostError, RemoveDecision,
    RemoveOutcome, RemoveRequest, SelectionHost,
};
use tracing::{debug, warn};

impl InteractionController {
    /// Submit the staged draft (new or edit) for confirmation.
    pub fn confirm_staged(&mut self) -> SelectionResult<AddRequest> {
        if !self.mode.is_idle() {
            return Err(SelectionError::InvalidState("confirm during an active gesture"));
        }
        let staged = self
            .staged
            .ok_or(SelectionError::InvalidState("nothing staged to confirm"))?;

        self.store
            .begin_add(staged.geometry, staged.target_id)
            .inspect_err(|err| {
                if !err.is_silent() {
                    warn!("confirm rejected: {}", err);
                }
            })
    }

    /// Apply the host's answer to the pending add.
    ///
    /// Success and rejection both drop the staged draft the request came
    /// from; a host failure keeps it so the gesture can be retried. A draft
    /// edited further while the host was deciding stays staged, and on
    /// success it becomes an edit of the committed rectangle.
    pub fn resolve_add(
        &mut self,
        ticket: u64,
        answer: Result<AddDecision, HostError>,
    ) -> SelectionResult<AddOutcome> {
        let request = self.store.pending_add_request();
        let outcome = self.store.resolve_add(ticket, answer)?;

        if let Some(request) = request {
            self.follow_outcome(&request, &outcome);
        }
        if let AddOutcome::Updated {
            previous_id,
            rectangle,
        } = &outcome
        {
            if self.hovered == Some(*previous_id) {
                self.hovered = Some(rectangle.id);
            }
        }
        Ok(outcome)
    }

    fn follow_outcome(&mut self, request: &AddRequest, outcome: &AddOutcome) {
        let from = request.existing_id;
        if let Some(staged) = self.staged.filter(|s| s.target_id == from) {
            if staged.geometry == request.candidate {
                self.staged = None;
            } else if let Some(rectangle) = outcome.rectangle() {
                debug!(id = rectangle.id, "staged draft retargeted to committed selection");
                self.staged = Some(StagedSelection {
                    geometry: staged.geometry,
                    target_id: Some(rectangle.id),
                });
            }
        }
        if let Some(rectangle) = outcome.rectangle() {
            if self.mode.retarget(from, rectangle.id) {
                debug!(id = rectangle.id, "active edit retargeted to committed selection");
            }
        }
    }

    /// Submit the remove target for confirmation.
    pub fn request_remove(&mut self) -> SelectionResult<RemoveRequest> {
        let id = self
            .remove_target
            .ok_or(SelectionError::InvalidState("no rectangle offered for removal"))?;
        self.store.begin_remove(id).inspect_err(|err| {
            if !err.is_silent() {
                warn!(id, "remove rejected: {}", err);
            }
        })
    }

    /// Apply the host's answer to the pending remove.
    pub fn resolve_remove(
        &mut self,
        ticket: u64,
        answer: Result<RemoveDecision, HostError>,
    ) -> SelectionResult<RemoveOutcome> {
        let outcome = self.store.resolve_remove(ticket, answer)?;
        self.remove_target = None;

        if let RemoveOutcome::Removed(rect) = &outcome {
            if self.hovered == Some(rect.id) {
                self.hovered = None;
            }
            if self.staged.is_some_and(|s| s.target_id == Some(rect.id)) {
                debug!(id = rect.id, "staged edit dropped with its rectangle");
                self.staged = None;
            }
        }
        Ok(outcome)
    }

    /// Give up on the outstanding confirmation and the gesture behind it.
    pub fn abandon_pending(&mut self) -> Option<ConfirmationKind> {
        let request = self.store.pending_add_request();
        let kind = self.store.abandon_pending()?;

        match kind {
            ConfirmationKind::Add => {
                if let (Some(request), Some(staged)) = (request, self.staged) {
                    if staged.target_id == request.existing_id {
                        self.staged = None;
                    }
                }
            }
            ConfirmationKind::Remove => self.remove_target = None,
        }
        Some(kind)
    }

    // ========================================================================
    // Host round trips
    // ========================================================================

    /// Ask the host about `request` and apply the answer.
    pub async fn settle_add<H: SelectionHost>(
        &mut self,
        host: &H,
        request: AddRequest,
    ) -> SelectionResult<AddOutcome> {
        let answer = host
            .confirm_add(&request.candidate, request.existing_id)
            .await;
        self.resolve_add(request.ticket, answer)
    }

    /// Ask the host about `request` and apply the answer.
    pub async fn settle_remove<H: SelectionHost>(
        &mut self,
        host: &H,
        request: RemoveRequest,
    ) -> SelectionResult<RemoveOutcome> {
        let answer = host.confirm_remove(request.id, &request.rectangle).await;
        self.resolve_remove(request.ticket, answer)
    }

    /// Confirm gesture on the staged draft, end to end.
    pub async fn commit_staged<H: SelectionHost>(
        &mut self,
        host: &H,
    ) -> SelectionResult<AddOutcome> {
        let request = self.confirm_staged()?;
        self.settle_add(host, request).await
    }

    /// Remove gesture on the remove target, end to end.
    pub async fn commit_remove<H: SelectionHost>(
        &mut self,
        host: &H,
    ) -> SelectionResult<RemoveOutcome> {
        let request = self.request_remove()?;
        self.settle_remove(host, request).await
    }
}
