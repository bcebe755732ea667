//! Host contract for confirming selection changes.
//!
//! The host (the toolkit embedding the engine) may veto or remap every add
//! and remove. Its answers are asynchronous; the store treats each one as a
//! suspension point guarded by a pending-confirmation state.

use crate::types::{Rectangle, SelectionGeometry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use thiserror::Error;

/// Host answer to an add (or edit) confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddDecision {
    /// Commit under this id (re-checked for collisions)
    Adopt(u64),
    /// Commit and let the store pick the id
    Accept,
    /// Cancel: the draft is discarded, the list is unchanged
    Reject,
}

/// Host answer to a remove confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveDecision {
    Remove,
    Keep,
}

impl From<bool> for RemoveDecision {
    fn from(remove: bool) -> Self {
        if remove { Self::Remove } else { Self::Keep }
    }
}

/// Which kind of confirmation is outstanding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationKind {
    Add,
    Remove,
}

impl fmt::Display for ConfirmationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Remove => f.write_str("remove"),
        }
    }
}

/// Failure inside the host's confirmation hook (network error, crash, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HostError {
    message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Callbacks the embedding toolkit provides.
pub trait SelectionHost {
    /// Confirm a new selection, or an edit of `existing_id`.
    fn confirm_add(
        &self,
        candidate: &SelectionGeometry,
        existing_id: Option<u64>,
    ) -> impl Future<Output = Result<AddDecision, HostError>>;

    /// Confirm removing `id`; `rectangle` is the current snapshot.
    fn confirm_remove(
        &self,
        id: u64,
        rectangle: &Rectangle,
    ) -> impl Future<Output = Result<RemoveDecision, HostError>>;

    /// Pointer entered a committed rectangle. Notification only.
    fn rect_hover(&self, _rectangle: &Rectangle) {}

    /// Pointer left a committed rectangle. Notification only.
    fn rect_hover_out(&self, _rectangle: &Rectangle) {}
}

/// Host that approves everything and lets the store assign ids.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl SelectionHost for AcceptAll {
    async fn confirm_add(
        &self,
        _candidate: &SelectionGeometry,
        _existing_id: Option<u64>,
    ) -> Result<AddDecision, HostError> {
        Ok(AddDecision::Accept)
    }

    async fn confirm_remove(
        &self,
        _id: u64,
        _rectangle: &Rectangle,
    ) -> Result<RemoveDecision, HostError> {
        Ok(RemoveDecision::Remove)
    }
}
