//! Two-step confirmation for destructive actions.
//!
//! Deleting a transaction, clearing all data and importing a file each first
//! queue a [PendingAction] and show a dialog. The action is only applied when
//! the user confirms it through [resolve_confirmation_endpoint].

mod dialog;
mod queue;
mod resolve_endpoint;

pub(crate) use dialog::request_confirmation;
pub use queue::{ConfirmationId, ConfirmationQueue, PendingAction};
pub use resolve_endpoint::resolve_confirmation_endpoint;
