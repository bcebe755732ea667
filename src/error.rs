//! Error types for selection operations
//!
//! Host rejection is not an error: a host that answers "no" produces a
//! cancelled outcome. Only misuse, stale answers and host failures land here.

use crate::selection::{ConfirmationKind, HostError};
use thiserror::Error;

/// Errors that can occur while editing or committing selections
#[derive(Error, Debug)]
pub enum SelectionError {
    /// A session or controller call arrived in the wrong state
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    /// A committing gesture was attempted while a confirmation is outstanding
    #[error("A {kind} confirmation is already pending")]
    ConfirmationPending { kind: ConfirmationKind },

    /// A host answer arrived for a request that is no longer pending
    #[error("Confirmation {ticket} is no longer pending")]
    StaleConfirmation { ticket: u64 },

    /// A host answer arrived while nothing was pending
    #[error("No confirmation is pending")]
    NoPendingConfirmation,

    /// The referenced rectangle is not in the store
    #[error("Unknown rectangle id {0}")]
    UnknownRectangle(u64),

    /// Candidate has no area; it is discarded, never added
    #[error("Degenerate selection {width}x{height}")]
    DegenerateGeometry { width: f32, height: f32 },

    /// The host's confirmation hook failed; the request stays pending
    #[error("Host confirmation failed: {0}")]
    HostConfirmationFailed(#[source] HostError),
}

/// Result type alias for selection operations
pub type SelectionResult<T> = Result<T, SelectionError>;

impl SelectionError {
    /// True for outcomes the controller swallows as a silent no-op.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            Self::DegenerateGeometry { .. } | Self::ConfirmationPending { .. }
        )
    }
}
