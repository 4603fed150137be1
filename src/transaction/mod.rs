//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` form input with its validation
//! - The `Ledger` that keeps transactions ordered and persisted
//! - Lenient parsing of imported files
//! - View handlers for creating, listing and deleting transactions

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod import;
mod ledger;
mod transactions_page;
mod view;

pub use core::{NewTransaction, Transaction, TransactionId, TransactionType};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use import::parse_transactions;
pub use ledger::Ledger;
pub use transactions_page::get_transactions_page;

pub(crate) use view::{empty_state, transaction_list};

#[cfg(test)]
pub(crate) use ledger::TRANSACTIONS_KEY;
