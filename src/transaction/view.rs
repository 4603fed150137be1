//! HTML rendering for lists of transactions.

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    category::display_category,
    endpoints::{self, format_endpoint},
    html::{BUTTON_DELETE_STYLE, format_currency},
    transaction::{Transaction, TransactionType},
};

/// The max number of graphemes to display in a transaction item before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:none] [month repr:short] [year]");

/// A list of transaction items in the order given, or `empty_view` if there are none.
pub(crate) fn transaction_list<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    empty_view: Markup,
) -> Markup {
    let items: Vec<Markup> = transactions.into_iter().map(transaction_item).collect();

    html! {
        @if items.is_empty() {
            (empty_view)
        } @else {
            ul id="transaction-list" class="w-full flex flex-col gap-2"
            {
                @for item in items {
                    (item)
                }
            }
        }
    }
}

/// The message shown when there are no transactions to list.
pub(crate) fn empty_state(message: &str, hint: &str) -> Markup {
    html! {
        div class="w-full flex flex-col items-center gap-2 py-10 text-gray-500 dark:text-gray-400"
        {
            i class="fa-solid fa-inbox text-4xl text-pink-300" {}
            p class="font-medium" { (message) }
            small { (hint) }
        }
    }
}

fn transaction_item(transaction: &Transaction) -> Markup {
    let category = display_category(&transaction.category);
    let (description, tooltip) = format_description(&transaction.description);
    let (sign, amount_class) = match transaction.kind {
        TransactionType::Income => ("+", "text-emerald-600 dark:text-emerald-300"),
        TransactionType::Expense => ("-", "text-rose-500 dark:text-rose-300"),
    };
    let delete_url = format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);

    html! {
        li
            class="flex items-center gap-3 rounded-2xl bg-white dark:bg-gray-800 px-4 py-3 shadow-sm"
            data-transaction-id=(transaction.id)
        {
            div
                class="flex h-10 w-10 shrink-0 items-center justify-center rounded-full text-gray-700"
                style={ "background-color: " (category.color) }
            {
                i class={ "fa-solid " (category.icon) } {}
            }

            div class="min-w-0 flex-1"
            {
                p class="truncate text-sm font-medium" title=[tooltip] { (description) }
                p class="text-xs text-gray-500 dark:text-gray-400"
                {
                    (category.name) " · "
                    time datetime=(transaction.date) { (format_date(transaction.date)) }
                }
            }

            span class={ "shrink-0 text-sm font-semibold tabular-nums " (amount_class) }
            {
                (sign) (format_currency(transaction.amount))
            }

            button
                type="button"
                hx-delete=(delete_url)
                hx-target="#dialog-container"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                class=(BUTTON_DELETE_STYLE)
                aria-label={ "Delete " (transaction.description) }
            {
                i class="fa-solid fa-trash-can" {}
            }
        }
    }
}

fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(description))
    }
}

#[cfg(test)]
mod view_tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        test_utils::assert_valid_html,
        transaction::{
            Transaction, TransactionType,
            view::{empty_state, format_description, transaction_list},
        },
    };

    fn transaction(id: i64, description: &str, kind: TransactionType) -> Transaction {
        Transaction {
            id,
            amount: 12.5,
            description: description.to_owned(),
            category: "food".to_owned(),
            date: date!(2024 - 01 - 05),
            kind,
        }
    }

    fn render(transactions: &[Transaction]) -> Html {
        let markup = transaction_list(transactions, empty_state("Nothing here", "Add one"));
        Html::parse_fragment(&markup.into_string())
    }

    #[test]
    fn renders_items_in_given_order() {
        let html = render(&[
            transaction(2, "second", TransactionType::Expense),
            transaction(1, "first", TransactionType::Income),
        ]);
        assert_valid_html(&html);

        let ids: Vec<&str> = html
            .select(&Selector::parse("li[data-transaction-id]").unwrap())
            .filter_map(|item| item.value().attr("data-transaction-id"))
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn each_item_has_delete_button_for_its_id() {
        let html = render(&[transaction(1704412800000, "coffee", TransactionType::Expense)]);

        let button = html
            .select(&Selector::parse("button[hx-delete]").unwrap())
            .next()
            .expect("No delete button found");
        assert_eq!(
            button.value().attr("hx-delete"),
            Some("/api/transactions/1704412800000")
        );
        assert_eq!(button.value().attr("hx-target"), Some("#dialog-container"));
    }

    #[test]
    fn amounts_are_signed_by_type() {
        let html = render(&[
            transaction(2, "coffee", TransactionType::Expense),
            transaction(1, "salary", TransactionType::Income),
        ]);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("-฿12.50"), "got {text}");
        assert!(text.contains("+฿12.50"), "got {text}");
    }

    #[test]
    fn description_is_escaped() {
        let html = render(&[transaction(
            1,
            "<script>alert('hi')</script>",
            TransactionType::Expense,
        )]);

        assert!(
            html.select(&Selector::parse("li script").unwrap())
                .next()
                .is_none(),
            "description must not be rendered as markup"
        );
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let html = render(&[]);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Nothing here"));
        assert!(
            html.select(&Selector::parse("#transaction-list").unwrap())
                .next()
                .is_none()
        );
    }

    #[test]
    fn long_descriptions_are_truncated_with_tooltip() {
        let description = "a".repeat(40);

        let (truncated, tooltip) = format_description(&description);

        assert_eq!(truncated, format!("{}...", "a".repeat(29)));
        assert_eq!(tooltip, Some(description.as_str()));
    }

    #[test]
    fn short_descriptions_are_unchanged() {
        let (text, tooltip) = format_description("coffee");

        assert_eq!(text, "coffee");
        assert_eq!(tooltip, None);
    }
}
