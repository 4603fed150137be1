//! The reports page: totals, a breakdown of expenses by category and a chart
//! of monthly expenses.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{CategoryTotal, Totals, by_category, by_month, totals},
        cards::summary_cards_view,
        charts::{DashboardChart, MonthlyChartKind, charts_script, charts_view, monthly_chart},
    },
    endpoints,
    html::{CARD_STYLE, ECHARTS_URL, HeadElement, PAGE_CONTAINER_STYLE, base, format_currency},
    navigation::NavBar,
    transaction::{Ledger, empty_state},
};

/// The state needed for displaying the reports page.
#[derive(Debug, Clone)]
pub struct ReportsState {
    /// The ledger to report on.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for ReportsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The query string for the reports page.
#[derive(Debug, Default, Deserialize)]
pub struct ReportsQuery {
    /// How to draw the monthly expenses.
    #[serde(default)]
    pub chart: MonthlyChartKind,
}

/// Display the reports page.
pub async fn get_reports_page(
    State(state): State<ReportsState>,
    Query(query): Query<ReportsQuery>,
) -> Result<Response, Error> {
    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LockError)?;

    let totals = totals(ledger.transactions());
    let category_totals = by_category(ledger.transactions());
    let monthly_totals = by_month(ledger.transactions());

    let chart = (!monthly_totals.is_empty()).then(|| DashboardChart {
        id: "monthly-chart",
        options: monthly_chart(&monthly_totals, query.chart).to_string(),
    });

    Ok(reports_view(&totals, &category_totals, query.chart, chart).into_response())
}

fn reports_view(
    totals: &Totals,
    category_totals: &[CategoryTotal],
    chart_kind: MonthlyChartKind,
    chart: Option<DashboardChart>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold w-full" { "Reports" }

            (summary_cards_view(totals))

            p id="transaction-count" class="w-full text-sm text-gray-500 dark:text-gray-400"
            {
                (totals.count) " transaction" @if totals.count != 1 { "s" } " recorded"
            }

            section id="category-breakdown" class={ "w-full " (CARD_STYLE) }
            {
                h3 class="text-lg font-semibold mb-3" { "Expenses by Category" }

                @if category_totals.is_empty() {
                    (empty_state("No expenses yet", "Expenses will be broken down by category here."))
                } @else {
                    (category_breakdown(category_totals, totals.expense))
                }
            }

            section id="monthly-expenses" class="w-full"
            {
                div class="flex items-center justify-between mb-3"
                {
                    h3 class="text-lg font-semibold" { "Monthly Expenses" }
                    (chart_kind_selector(chart_kind))
                }

                @match &chart {
                    Some(chart) => (charts_view(std::slice::from_ref(chart))),
                    None => {
                        p class="text-sm text-gray-500 dark:text-gray-400"
                        {
                            "Monthly totals will show up here once you record an expense."
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

    base("Reports", &scripts, &content)
}

fn category_breakdown(category_totals: &[CategoryTotal], total_expense: f64) -> Markup {
    html! {
        ul class="flex flex-col gap-3"
        {
            @for total in category_totals {
                @let percentage = share_of_total(total.amount, total_expense);

                li class="flex items-center gap-3" data-category=(total.category_id)
                {
                    span
                        class="flex h-8 w-8 shrink-0 items-center justify-center rounded-full text-gray-700"
                        style={ "background-color: " (total.color) }
                    {
                        i class={ "fa-solid " (total.icon) } {}
                    }

                    div class="flex-1"
                    {
                        div class="flex justify-between text-sm"
                        {
                            span { (total.name) }
                            span class="font-semibold tabular-nums" { (format_currency(total.amount)) }
                        }

                        div class="h-2 w-full rounded-full bg-gray-100 dark:bg-gray-700"
                        {
                            div
                                class="h-2 rounded-full"
                                style={ "width: " (format!("{percentage:.1}")) "%; background-color: " (total.color) }
                            {}
                        }
                    }
                }
            }
        }
    }
}

/// `amount` as a percentage of `total`, or zero when there is no total.
fn share_of_total(amount: f64, total: f64) -> f64 {
    if total > 0.0 {
        amount / total * 100.0
    } else {
        0.0
    }
}

fn chart_kind_selector(selected: MonthlyChartKind) -> Markup {
    html! {
        nav aria-label="Chart type" class="flex gap-1 rounded-xl bg-white dark:bg-gray-800 p-1 text-sm"
        {
            @for kind in MonthlyChartKind::ALL {
                @let url = format!(
                    "{}?{}",
                    endpoints::REPORTS_VIEW,
                    serde_urlencoded::to_string([("chart", kind.as_str())]).unwrap_or_default()
                );

                @if kind == selected {
                    a
                        href=(url)
                        aria-current="true"
                        class="px-3 py-1 rounded-lg bg-pink-100 text-pink-700 font-semibold"
                    {
                        (kind.label())
                    }
                } @else {
                    a
                        href=(url)
                        class="px-3 py-1 rounded-lg text-gray-500 hover:bg-gray-100 dark:hover:bg-gray-700"
                    {
                        (kind.label())
                    }
                }
            }
        }
    }
}
