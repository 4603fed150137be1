//! Defines the route handler for the page that lists every transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    transaction::{
        Ledger, Transaction,
        view::{empty_state, transaction_list},
    },
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The ledger to list transactions from.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The query string for the transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    /// Only show transactions whose description or category matches this text.
    #[serde(default)]
    pub q: Option<String>,
}

/// Render the list of transactions, optionally filtered by `?q=`.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let ledger = state.ledger.lock().map_err(|error| {
        tracing::error!("could not acquire ledger lock: {error}");
        Error::LockError
    })?;

    let search = query.q.as_deref().map(str::trim).unwrap_or_default();
    let transactions = ledger.search(search);

    Ok(transactions_view(&transactions, search, ledger.len()).into_response())
}

fn transactions_view(transactions: &[&Transaction], search: &str, total_count: usize) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let empty_view = if search.is_empty() {
        empty_state(
            "No transactions yet",
            "Tap the plus button to record your first one.",
        )
    } else {
        empty_state(
            &format!("Nothing matches \"{search}\""),
            "Try a different word or clear the search.",
        )
    };

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex items-center justify-between w-full"
            {
                h2 class="text-xl font-bold" { "Transactions" }

                span class="text-sm text-gray-500 dark:text-gray-400"
                {
                    @if search.is_empty() {
                        (total_count) " total"
                    } @else {
                        (transactions.len()) " of " (total_count)
                    }
                }
            }

            form
                method="get"
                action=(endpoints::TRANSACTIONS_VIEW)
                role="search"
                class="w-full flex gap-2"
            {
                input
                    type="search"
                    name="q"
                    value=(search)
                    placeholder="Search description or category"
                    aria-label="Search transactions"
                    class=(FORM_TEXT_INPUT_STYLE);

                @if !search.is_empty() {
                    a href=(endpoints::TRANSACTIONS_VIEW) class={ "self-center text-sm " (LINK_STYLE) }
                    {
                        "Clear"
                    }
                }
            }

            (transaction_list(transactions.iter().copied(), empty_view))
        }
    };

    base("Transactions", &[], &content)
}
