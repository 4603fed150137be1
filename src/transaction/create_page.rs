//! Defines the route handler for the page for creating a new transaction.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    category::categories_for,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
    timezone::local_today,
    transaction::TransactionType,
};

/// The query string for the new transaction page.
#[derive(Debug, Default, Deserialize)]
pub struct NewTransactionQuery {
    /// Which set of categories to offer.
    #[serde(rename = "type", default)]
    pub kind: TransactionType,
}

fn type_tab(kind: TransactionType, selected: TransactionType) -> Markup {
    let url = format!(
        "{}?{}",
        endpoints::NEW_TRANSACTION_VIEW,
        serde_urlencoded::to_string([("type", kind.as_str())]).unwrap_or_default()
    );
    let is_selected = kind == selected;
    let style = match (kind, is_selected) {
        (TransactionType::Expense, true) => {
            "flex-1 py-2 text-center rounded-xl font-semibold bg-rose-100 text-rose-600"
        }
        (TransactionType::Income, true) => {
            "flex-1 py-2 text-center rounded-xl font-semibold bg-emerald-100 text-emerald-700"
        }
        (_, false) => {
            "flex-1 py-2 text-center rounded-xl text-gray-500 hover:bg-gray-100 dark:hover:bg-gray-700"
        }
    };

    html! {
        a
            href=(url)
            role="tab"
            aria-selected=(is_selected)
            class=(style)
        {
            (kind)
        }
    }
}

fn create_transaction_view(kind: TransactionType, today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let categories = categories_for(kind);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Transaction" }

                div role="tablist" class="flex gap-2 rounded-2xl bg-white dark:bg-gray-800 p-1"
                {
                    (type_tab(TransactionType::Expense, kind))
                    (type_tab(TransactionType::Income, kind))
                }

                input type="hidden" name="type" value=(kind.as_str());

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount (฿)" }

                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="What was it for?"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                fieldset
                {
                    legend class=(FORM_LABEL_STYLE) { "Category" }

                    div class="grid grid-cols-3 gap-2"
                    {
                        @for (index, category) in categories.iter().enumerate() {
                            label
                            {
                                input
                                    type="radio"
                                    name="category"
                                    value=(category.id)
                                    checked[index == 0]
                                    class=(FORM_RADIO_INPUT_STYLE);

                                span class=(FORM_RADIO_LABEL_STYLE)
                                {
                                    span
                                        class="flex h-8 w-8 items-center justify-center rounded-full text-gray-700"
                                        style={ "background-color: " (category.color) }
                                    {
                                        i class={ "fa-solid " (category.icon) } {}
                                    }
                                    span class="text-xs" { (category.name) }
                                }
                            }
                        }
                    }
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        required
                        value=(today)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Save Transaction"
                }
            }
        }
    };

    base("New Transaction", &[], &content)
}

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Bangkok".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for creating a transaction.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
    Query(query): Query<NewTransactionQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    Ok(create_transaction_view(query.kind, today).into_response())
}
