//! Summary cards for the home and reports pages.
//!
//! Shows the balance with income and expenses side by side underneath it.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::Totals,
    html::{CARD_STYLE, format_currency},
};

/// Renders the balance card followed by the income and expense cards.
pub(super) fn summary_cards_view(totals: &Totals) -> Markup {
    let balance_class = if totals.balance < 0.0 {
        "text-rose-500 dark:text-rose-300"
    } else {
        "text-gray-900 dark:text-white"
    };

    html! {
        section id="summary" class="w-full grid grid-cols-2 gap-3"
        {
            div
                id="balance-card"
                class={ "col-span-2 bg-gradient-to-br from-pink-100 to-violet-100 dark:from-pink-900 dark:to-violet-900 " (CARD_STYLE) }
            {
                p class="text-sm text-gray-600 dark:text-gray-300" { "Balance" }
                p class={ "text-3xl font-bold tabular-nums " (balance_class) }
                {
                    (format_currency(totals.balance))
                }
            }

            (total_card(
                "income-card",
                "Income",
                "fa-arrow-down",
                "text-emerald-600 dark:text-emerald-300",
                totals.income,
            ))
            (total_card(
                "expense-card",
                "Expenses",
                "fa-arrow-up",
                "text-rose-500 dark:text-rose-300",
                totals.expense,
            ))
        }
    }
}

fn total_card(id: &str, label: &str, icon: &str, amount_class: &str, amount: f64) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE)
        {
            p class="flex items-center gap-2 text-sm text-gray-600 dark:text-gray-300"
            {
                i class={ "fa-solid " (icon) " " (amount_class) } {}
                (label)
            }
            p class={ "text-xl font-semibold tabular-nums " (amount_class) }
            {
                (format_currency(amount))
            }
        }
    }
}
