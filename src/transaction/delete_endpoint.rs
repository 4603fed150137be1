use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::Response,
};

use crate::{
    AppState, Error,
    confirmation::{ConfirmationQueue, PendingAction, request_confirmation},
    transaction::{Ledger, TransactionId},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The ledger holding the transaction to delete.
    pub ledger: Arc<Mutex<Ledger>>,
    /// Where the delete waits until the user confirms it.
    pub confirmations: Arc<Mutex<ConfirmationQueue>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            confirmations: state.confirmations.clone(),
        }
    }
}

/// A route handler for deleting a transaction, responds with a confirmation dialog.
///
/// The transaction is only removed once the dialog is confirmed.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let exists = match state.ledger.lock() {
        Ok(ledger) => ledger
            .transactions()
            .iter()
            .any(|transaction| transaction.id == transaction_id),
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LockError.into_alert_response();
        }
    };

    if !exists {
        tracing::debug!("Tried to delete missing transaction {transaction_id}");
        return Error::DeleteMissingTransaction.into_alert_response();
    }

    request_confirmation(
        &state.confirmations,
        PendingAction::DeleteTransaction(transaction_id),
    )
}
