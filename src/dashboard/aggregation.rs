//! Summaries of the ledger for the cards, lists and charts.
//!
//! Every function here is pure: the same transactions always give the same
//! result, and amounts are summed in the order the transactions are given.

use std::collections::BTreeMap;

use time::{Date, Duration, Month};

use crate::{
    category::{Category, find_category},
    transaction::{Transaction, TransactionType},
};

/// Income, expense and the difference between them.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Totals {
    /// The sum of all income.
    pub income: f64,
    /// The sum of all expenses.
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
    /// The number of transactions summed.
    pub count: usize,
}

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category_id: String,
    pub name: String,
    pub amount: f64,
    pub color: String,
    pub icon: String,
}

/// The total spent in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    /// The first day of the month.
    pub month: Date,
    /// The month and year, e.g. "Jan 2024".
    pub label: String,
    pub amount: f64,
}

/// Sum income and expenses.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals {
        count: transactions.len(),
        ..Totals::default()
    };

    for transaction in transactions {
        match transaction.kind {
            TransactionType::Income => totals.income += transaction.amount,
            TransactionType::Expense => totals.expense += transaction.amount,
        }
    }

    totals.balance = totals.income - totals.expense;

    totals
}

/// Sum expenses per category, largest first.
///
/// Categories with equal totals are ordered by ID. Income is ignored.
/// An ID that is not an expense category is shown with a placeholder name,
/// colour and icon.
pub fn by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut amounts: BTreeMap<&str, f64> = BTreeMap::new();

    for transaction in expenses(transactions) {
        *amounts.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
    }

    let mut category_totals: Vec<CategoryTotal> = amounts
        .into_iter()
        .map(|(id, amount)| {
            let category = match find_category(TransactionType::Expense, id) {
                Some(category) => category,
                None => Category::unknown(id),
            };

            CategoryTotal {
                category_id: id.to_owned(),
                name: category.name.to_owned(),
                amount,
                color: category.color.to_owned(),
                icon: category.icon.to_owned(),
            }
        })
        .collect();

    // Stable, so ties stay in ID order.
    category_totals.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    category_totals
}

/// Sum expenses per calendar month, oldest month first. Income is ignored.
pub fn by_month(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut amounts: BTreeMap<Date, f64> = BTreeMap::new();

    for transaction in expenses(transactions) {
        *amounts
            .entry(first_of_month(transaction.date))
            .or_insert(0.0) += transaction.amount;
    }

    amounts
        .into_iter()
        .map(|(month, amount)| MonthlyTotal {
            month,
            label: month_label(month),
            amount,
        })
        .collect()
}

fn expenses(transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionType::Expense)
}

fn first_of_month(date: Date) -> Date {
    date - Duration::days(i64::from(date.day()) - 1)
}

/// Formats a month as a three-letter abbreviation followed by the year, e.g. "Jan 2024".
pub(super) fn month_label(date: Date) -> String {
    let month = match date.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    };

    format!("{month} {}", date.year())
}

#[cfg(test)]
mod aggregation_tests {
    use time::{Date, macros::date};

    use crate::{
        category::{UNKNOWN_CATEGORY_COLOR, UNKNOWN_CATEGORY_ICON},
        dashboard::aggregation::{Totals, by_category, by_month, month_label, totals},
        transaction::{Transaction, TransactionType},
    };

    fn transaction(
        id: i64,
        amount: f64,
        category: &str,
        date: Date,
        kind: TransactionType,
    ) -> Transaction {
        Transaction {
            id,
            amount,
            description: format!("transaction {id}"),
            category: category.to_owned(),
            date,
            kind,
        }
    }

    fn expense(id: i64, amount: f64, category: &str, date: Date) -> Transaction {
        transaction(id, amount, category, date, TransactionType::Expense)
    }

    fn income(id: i64, amount: f64, category: &str, date: Date) -> Transaction {
        transaction(id, amount, category, date, TransactionType::Income)
    }

    #[test]
    fn totals_of_empty_sequence_are_zero() {
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn totals_sum_income_and_expense() {
        let transactions = [
            expense(1, 100.0, "food", date!(2024 - 01 - 05)),
            income(2, 500.0, "salary", date!(2024 - 01 - 01)),
            expense(3, 50.5, "transport", date!(2024 - 01 - 02)),
        ];

        let got = totals(&transactions);

        assert_eq!(
            got,
            Totals {
                income: 500.0,
                expense: 150.5,
                balance: 349.5,
                count: 3,
            }
        );
    }

    #[test]
    fn totals_are_deterministic() {
        let transactions = [
            expense(1, 0.1, "food", date!(2024 - 01 - 05)),
            expense(2, 0.2, "food", date!(2024 - 01 - 05)),
            expense(3, 0.3, "food", date!(2024 - 01 - 05)),
        ];

        let first = totals(&transactions);
        let second = totals(&transactions);

        assert_eq!(first.expense.to_bits(), second.expense.to_bits());
    }

    #[test]
    fn by_category_sorts_largest_first_and_ignores_income() {
        let transactions = [
            expense(1, 30.0, "food", date!(2024 - 01 - 05)),
            expense(2, 70.0, "transport", date!(2024 - 01 - 04)),
            expense(3, 20.0, "food", date!(2024 - 01 - 03)),
            income(4, 1000.0, "salary", date!(2024 - 01 - 01)),
        ];

        let got = by_category(&transactions);

        let ids_and_amounts: Vec<(&str, f64)> = got
            .iter()
            .map(|total| (total.category_id.as_str(), total.amount))
            .collect();
        assert_eq!(ids_and_amounts, vec![("transport", 70.0), ("food", 50.0)]);
        assert_eq!(got[1].icon, "fa-utensils");
        assert_eq!(got[1].color, "#FFD6EC");
    }

    #[test]
    fn by_category_breaks_ties_by_id() {
        let transactions = [
            expense(1, 10.0, "transport", date!(2024 - 01 - 05)),
            expense(2, 10.0, "food", date!(2024 - 01 - 05)),
        ];

        let got = by_category(&transactions);

        assert_eq!(got[0].category_id, "food");
        assert_eq!(got[1].category_id, "transport");
    }

    #[test]
    fn by_category_unknown_id_uses_placeholder() {
        let transactions = [expense(1, 10.0, "mystery", date!(2024 - 01 - 05))];

        let got = by_category(&transactions);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "mystery");
        assert_eq!(got[0].color, UNKNOWN_CATEGORY_COLOR);
        assert_eq!(got[0].icon, UNKNOWN_CATEGORY_ICON);
    }

    #[test]
    fn by_month_groups_expenses_chronologically() {
        let transactions = [
            expense(1, 5.0, "food", date!(2024 - 02 - 29)),
            income(2, 500.0, "salary", date!(2024 - 02 - 01)),
            expense(3, 10.0, "food", date!(2024 - 01 - 31)),
            expense(4, 15.0, "food", date!(2024 - 01 - 01)),
            expense(5, 1.0, "food", date!(2023 - 12 - 25)),
        ];

        let got = by_month(&transactions);

        let summary: Vec<(Date, &str, f64)> = got
            .iter()
            .map(|total| (total.month, total.label.as_str(), total.amount))
            .collect();
        assert_eq!(
            summary,
            vec![
                (date!(2023 - 12 - 01), "Dec 2023", 1.0),
                (date!(2024 - 01 - 01), "Jan 2024", 25.0),
                (date!(2024 - 02 - 01), "Feb 2024", 5.0),
            ]
        );
    }

    #[test]
    fn by_month_of_income_only_is_empty() {
        let transactions = [income(1, 500.0, "salary", date!(2024 - 02 - 01))];

        assert!(by_month(&transactions).is_empty());
    }

    #[test]
    fn formats_month_label() {
        assert_eq!(month_label(date!(2025 - 09 - 14)), "Sep 2025");
    }
}
