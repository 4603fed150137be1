//! Destructive actions that are waiting for the user to confirm or decline them.
//!
//! Requesting an action only records it and hands back an ID. The action is
//! returned to the caller, and so applied, only when the ID is resolved with
//! `confirmed = true`. Declining or dismissing a confirmation discards it.

use std::collections::BTreeMap;

use crate::{
    Error,
    transaction::{Transaction, TransactionId},
};

/// The identifier of a pending confirmation.
pub type ConfirmationId = i64;

/// The most confirmations kept at once. Requesting another drops the oldest.
const MAX_PENDING: usize = 32;

/// A change to the ledger that cannot be undone.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    /// Remove the transaction with this ID.
    DeleteTransaction(TransactionId),
    /// Remove every transaction.
    ClearAll,
    /// Replace every transaction with these imported ones.
    ReplaceAll(Vec<Transaction>),
}

impl PendingAction {
    /// The question shown to the user.
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::DeleteTransaction(_) => "Delete this transaction?".to_owned(),
            PendingAction::ClearAll => {
                "Are you sure? All of your data will be deleted and cannot be recovered.".to_owned()
            }
            PendingAction::ReplaceAll(transactions) => format!(
                "Import {} transaction{}? Your current data will be replaced.",
                transactions.len(),
                if transactions.len() == 1 { "" } else { "s" }
            ),
        }
    }

    /// The text on the button that confirms the action.
    pub fn confirm_label(&self) -> &'static str {
        match self {
            PendingAction::DeleteTransaction(_) => "Delete",
            PendingAction::ClearAll => "Delete everything",
            PendingAction::ReplaceAll(_) => "Import",
        }
    }
}

/// The actions waiting on a yes or no from the user.
#[derive(Debug, Default)]
pub struct ConfirmationQueue {
    last_id: ConfirmationId,
    pending: BTreeMap<ConfirmationId, PendingAction>,
}

impl ConfirmationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `action` and return the ID the user must resolve it with.
    pub fn request(&mut self, action: PendingAction) -> ConfirmationId {
        if self.pending.len() >= MAX_PENDING
            && let Some((expired_id, _)) = self.pending.pop_first()
        {
            tracing::debug!("Dropping unanswered confirmation {expired_id}");
        }

        self.last_id += 1;
        self.pending.insert(self.last_id, action);

        self.last_id
    }

    /// Answer the confirmation `id`, removing it from the queue.
    ///
    /// Returns the action to apply if `confirmed` is true, `None` if it was declined.
    ///
    /// # Errors
    /// Returns [Error::ConfirmationNotFound] if `id` is unknown or was already resolved.
    pub fn resolve(
        &mut self,
        id: ConfirmationId,
        confirmed: bool,
    ) -> Result<Option<PendingAction>, Error> {
        let action = self
            .pending
            .remove(&id)
            .ok_or(Error::ConfirmationNotFound)?;

        Ok(confirmed.then_some(action))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
