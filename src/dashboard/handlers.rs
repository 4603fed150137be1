//! Home page HTTP handler and view rendering.
//!
//! The home page shows the balance, income and expense totals, the most recent
//! transactions and a doughnut chart of expenses by category.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{Totals, by_category, totals},
        cards::summary_cards_view,
        charts::{DashboardChart, category_chart, charts_script, charts_view},
    },
    endpoints,
    html::{ECHARTS_URL, HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    transaction::{Ledger, Transaction, empty_state, transaction_list},
};

/// How many transactions are listed on the home page.
const RECENT_TRANSACTION_COUNT: usize = 5;

/// The state needed for displaying the home page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The ledger to summarise.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Display the home page with an overview of the user's money.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LockError)?;

    let totals = totals(ledger.transactions());
    let category_totals = by_category(ledger.transactions());

    let chart = (!category_totals.is_empty()).then(|| DashboardChart {
        id: "category-chart",
        options: category_chart(&category_totals).to_string(),
    });

    Ok(dashboard_view(&totals, ledger.recent(RECENT_TRANSACTION_COUNT), chart).into_response())
}

fn dashboard_view(
    totals: &Totals,
    recent_transactions: &[Transaction],
    chart: Option<DashboardChart>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "Add one");

    let content = html!(
        (nav_bar)

        div id="dashboard-content" class=(PAGE_CONTAINER_STYLE)
        {
            (summary_cards_view(totals))

            section id="recent-transactions" class="w-full"
            {
                div class="flex items-baseline justify-between mb-3"
                {
                    h3 class="text-lg font-semibold" { "Recent Transactions" }

                    a href=(endpoints::TRANSACTIONS_VIEW) class={ "text-sm " (LINK_STYLE) }
                    {
                        "See all"
                    }
                }

                (transaction_list(
                    recent_transactions,
                    empty_state(
                        "No transactions yet",
                        "Add your first income or expense to get started.",
                    ),
                ))
            }

            section id="spending" class="w-full"
            {
                h3 class="text-lg font-semibold mb-3" { "Spending" }

                @match &chart {
                    Some(chart) => (charts_view(std::slice::from_ref(chart))),
                    None => {
                        p class="text-sm text-gray-500 dark:text-gray-400"
                        {
                            "Your spending by category will show up here once you record an expense. "
                            (new_transaction_link)
                        }
                    }
                }
            }
        }
    );

    let scripts = match &chart {
        Some(chart) => vec![
            HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
            charts_script(std::slice::from_ref(chart)),
        ],
        None => Vec::new(),
    };

    base("Home", &scripts, &content)
}
