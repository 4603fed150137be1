//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    transaction::{Ledger, NewTransaction, TransactionType},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The ledger the new transaction is added to.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in baht.
    #[serde(default)]
    pub amount: Option<f64>,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    /// The ID of the selected category.
    #[serde(default)]
    pub category: String,
    /// The date when the transaction occurred.
    #[serde(default)]
    pub date: Option<Date>,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
}

impl From<TransactionForm> for NewTransaction {
    fn from(form: TransactionForm) -> Self {
        Self {
            amount: form.amount,
            description: form.description,
            category: form.category,
            date: form.date,
            kind: form.kind,
        }
    }
}

/// A route handler for creating a new transaction, redirects to the home page on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LockError.into_alert_response();
        }
    };

    match ledger.add(form.into()) {
        Ok(transaction) => {
            tracing::info!("Created transaction {}", transaction.id);
        }
        Err(error @ Error::Validation(_)) => {
            tracing::debug!("rejected transaction: {error}");
            return error.into_alert_response();
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(endpoints::ROOT.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
