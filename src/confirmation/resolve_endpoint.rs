//! Defines the endpoint that answers a pending confirmation.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRefresh;
use serde::Deserialize;

use crate::{
    AppState, Error,
    confirmation::{ConfirmationId, ConfirmationQueue, PendingAction},
    transaction::Ledger,
};

/// The state needed to resolve a confirmation.
#[derive(Debug, Clone)]
pub struct ResolveConfirmationState {
    /// The transactions the confirmed action is applied to.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The actions waiting on the user.
    pub confirmations: Arc<Mutex<ConfirmationQueue>>,
}

impl FromRef<AppState> for ResolveConfirmationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            confirmations: state.confirmations.clone(),
        }
    }
}

/// The user's answer.
#[derive(Debug, Deserialize)]
pub struct ConfirmationForm {
    /// `true` to go ahead with the action, `false` to discard it.
    pub confirmed: bool,
}

/// A route handler for confirming or declining a destructive action.
///
/// A confirmed action is applied to the ledger and the client is told to
/// refresh the page. A declined action is discarded and the empty response
/// closes the dialog.
pub async fn resolve_confirmation_endpoint(
    State(state): State<ResolveConfirmationState>,
    Path(confirmation_id): Path<ConfirmationId>,
    Form(form): Form<ConfirmationForm>,
) -> Response {
    let resolved = match state.confirmations.lock() {
        Ok(mut confirmations) => confirmations.resolve(confirmation_id, form.confirmed),
        Err(error) => {
            tracing::error!("could not acquire confirmation queue lock: {error}");
            return Error::LockError.into_alert_response();
        }
    };

    let action = match resolved {
        Ok(Some(action)) => action,
        Ok(None) => {
            tracing::debug!("Confirmation {confirmation_id} declined");
            return StatusCode::OK.into_response();
        }
        Err(error) => {
            tracing::warn!("could not resolve confirmation {confirmation_id}: {error}");
            return error.into_alert_response();
        }
    };

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LockError.into_alert_response();
        }
    };

    if let Err(error) = apply_action(action, &mut ledger) {
        tracing::error!("could not apply confirmed action: {error}");
        return error.into_alert_response();
    }

    (HxRefresh(true), StatusCode::OK).into_response()
}

fn apply_action(action: PendingAction, ledger: &mut Ledger) -> Result<(), Error> {
    match action {
        PendingAction::DeleteTransaction(id) => {
            let removed = ledger.remove(id)?;
            tracing::info!("Deleted transaction {}", removed.id);
        }
        PendingAction::ClearAll => {
            ledger.clear()?;
            tracing::info!("Cleared all transactions");
        }
        PendingAction::ReplaceAll(transactions) => {
            let count = transactions.len();
            ledger.replace_all(transactions)?;
            tracing::info!("Imported {count} transactions");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REFRESH;
    use time::macros::date;

    use crate::{
        confirmation::{
            ConfirmationQueue, PendingAction,
            resolve_endpoint::{
                ConfirmationForm, ResolveConfirmationState, resolve_confirmation_endpoint,
            },
        },
        test_utils::{get_header, ledger::must_get_ledger},
        transaction::{NewTransaction, TransactionType},
    };

    fn get_test_state() -> ResolveConfirmationState {
        let mut ledger = must_get_ledger();
        ledger
            .add(NewTransaction {
                amount: Some(100.0),
                description: "coffee".to_owned(),
                category: "food".to_owned(),
                date: Some(date!(2024 - 01 - 05)),
                kind: TransactionType::Expense,
            })
            .unwrap();

        ResolveConfirmationState {
            ledger: Arc::new(Mutex::new(ledger)),
            confirmations: Arc::new(Mutex::new(ConfirmationQueue::new())),
        }
    }

    fn first_transaction_id(state: &ResolveConfirmationState) -> i64 {
        state.ledger.lock().unwrap().transactions()[0].id
    }

    #[tokio::test]
    async fn confirmed_delete_removes_transaction() {
        let state = get_test_state();
        let transaction_id = first_transaction_id(&state);
        let confirmation_id = state
            .confirmations
            .lock()
            .unwrap()
            .request(PendingAction::DeleteTransaction(transaction_id));

        let response = resolve_confirmation_endpoint(
            State(state.clone()),
            Path(confirmation_id),
            Form(ConfirmationForm { confirmed: true }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_header(&response, HX_REFRESH.as_str()), "true");
        assert!(state.ledger.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn declined_delete_keeps_transaction() {
        let state = get_test_state();
        let transaction_id = first_transaction_id(&state);
        let confirmation_id = state
            .confirmations
            .lock()
            .unwrap()
            .request(PendingAction::DeleteTransaction(transaction_id));

        let response = resolve_confirmation_endpoint(
            State(state.clone()),
            Path(confirmation_id),
            Form(ConfirmationForm { confirmed: false }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(HX_REFRESH).is_none());
        assert_eq!(state.ledger.lock().unwrap().len(), 1);
        assert!(state.confirmations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn confirmed_clear_empties_ledger() {
        let state = get_test_state();
        let confirmation_id = state
            .confirmations
            .lock()
            .unwrap()
            .request(PendingAction::ClearAll);

        resolve_confirmation_endpoint(
            State(state.clone()),
            Path(confirmation_id),
            Form(ConfirmationForm { confirmed: true }),
        )
        .await;

        assert!(state.ledger.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn confirmed_import_replaces_ledger() {
        let state = get_test_state();
        let confirmation_id = state
            .confirmations
            .lock()
            .unwrap()
            .request(PendingAction::ReplaceAll(Vec::new()));

        resolve_confirmation_endpoint(
            State(state.clone()),
            Path(confirmation_id),
            Form(ConfirmationForm { confirmed: true }),
        )
        .await;

        assert!(state.ledger.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_confirmation_is_not_found() {
        let state = get_test_state();

        let response = resolve_confirmation_endpoint(
            State(state.clone()),
            Path(404),
            Form(ConfirmationForm { confirmed: true }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.ledger.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_of_missing_transaction_is_not_found() {
        let state = get_test_state();
        let confirmation_id = state
            .confirmations
            .lock()
            .unwrap()
            .request(PendingAction::DeleteTransaction(-1));

        let response = resolve_confirmation_endpoint(
            State(state.clone()),
            Path(confirmation_id),
            Form(ConfirmationForm { confirmed: true }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
