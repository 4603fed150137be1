use rusqlite::Connection;
use time::Date;

use crate::{
    storage::initialize,
    transaction::{Ledger, NewTransaction, TransactionType},
};

/// An empty ledger backed by an in-memory database.
pub(crate) fn must_get_ledger() -> Ledger {
    let conn = Connection::open_in_memory().expect("Could not open in-memory database");
    initialize(&conn).expect("Could not initialize database");

    Ledger::load(conn)
}

pub(crate) fn expense(amount: f64, category: &str, date: Date) -> NewTransaction {
    NewTransaction {
        amount: Some(amount),
        description: format!("{category} expense"),
        category: category.to_owned(),
        date: Some(date),
        kind: TransactionType::Expense,
    }
}

pub(crate) fn income(amount: f64, category: &str, date: Date) -> NewTransaction {
    NewTransaction {
        amount: Some(amount),
        description: format!("{category} income"),
        category: category.to_owned(),
        date: Some(date),
        kind: TransactionType::Income,
    }
}
