//! Committed selections and the host confirmation protocol.
//!
//! ## Protocol
//!
//! Every add, edit and remove goes through the host in two phases:
//!
//! ```text
//! begin_add / begin_remove   -> request (ticket), store marks itself pending
//! host answers asynchronously
//! resolve_add / resolve_remove(ticket, answer) -> outcome, store idle again
//! ```
//!
//! While a request is pending every other `begin_*` is rejected with
//! `ConfirmationPending`. `add`/`remove` drive both phases for callers that
//! can simply await the host.

mod host;
mod store;

pub use host::{AcceptAll, AddDecision, ConfirmationKind, HostError, RemoveDecision, SelectionHost};
pub use store::{
    AddOutcome, AddRequest, ConfirmationState, RemoveOutcome, RemoveRequest, SelectionStore,
};
