//! The in-memory sequence of transactions and its persisted mirror.
//!
//! The ledger is the source of truth for the app. Every mutation writes the
//! whole sequence as a JSON array under [TRANSACTIONS_KEY] before the change is
//! applied in memory, so a failed write leaves both copies untouched.

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    category::display_category,
    storage::{get_item, remove_item, set_item},
    transaction::{NewTransaction, Transaction, TransactionId},
};

/// The storage key the transactions are saved under.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// An ordered collection of transactions, newest date first.
#[derive(Debug)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    last_id: TransactionId,
    connection: Connection,
}

impl Ledger {
    /// Load the saved transactions from `connection`.
    ///
    /// A missing value gives an empty ledger. A value that cannot be read or
    /// parsed is logged and also gives an empty ledger.
    pub fn load(connection: Connection) -> Self {
        let transactions = match get_item(TRANSACTIONS_KEY, &connection) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<Transaction>>(&text) {
                Ok(transactions) => transactions,
                Err(error) => {
                    tracing::warn!("Ignoring saved transactions that could not be parsed: {error}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!("Could not read saved transactions: {error}");
                Vec::new()
            }
        };

        let mut ledger = Self {
            last_id: max_id(&transactions),
            transactions,
            connection,
        };
        sort_by_date_descending(&mut ledger.transactions);

        tracing::debug!("Loaded {} transactions", ledger.transactions.len());

        ledger
    }

    /// Validate `new_transaction`, give it an ID and insert it in date order.
    ///
    /// Among transactions with the same date the new one comes first.
    ///
    /// # Errors
    /// Returns an [Error::Validation] naming the rejected field, in which case
    /// nothing changes, or an [Error::SqlError] if the ledger could not be saved.
    pub fn add(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let valid = new_transaction.validate()?;
        let id = self.next_id(OffsetDateTime::now_utc());
        let transaction = valid.with_id(id);

        let mut transactions = Vec::with_capacity(self.transactions.len() + 1);
        transactions.push(transaction.clone());
        transactions.extend(self.transactions.iter().cloned());
        sort_by_date_descending(&mut transactions);

        self.save(&transactions)?;
        self.transactions = transactions;
        self.last_id = self.last_id.max(id);

        Ok(transaction)
    }

    /// Remove the transaction with `id`.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingTransaction] if no transaction has `id`.
    pub fn remove(&mut self, id: TransactionId) -> Result<Transaction, Error> {
        let Some(index) = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
        else {
            return Err(Error::DeleteMissingTransaction);
        };

        let mut transactions = self.transactions.clone();
        let removed = transactions.remove(index);

        self.save(&transactions)?;
        self.transactions = transactions;

        Ok(removed)
    }

    /// Remove every transaction and the saved value.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the saved value could not be removed.
    pub fn clear(&mut self) -> Result<(), Error> {
        remove_item(TRANSACTIONS_KEY, &self.connection)?;
        self.transactions.clear();

        Ok(())
    }

    /// Replace every transaction with `transactions`, sorted newest date first.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the ledger could not be saved.
    pub fn replace_all(&mut self, mut transactions: Vec<Transaction>) -> Result<(), Error> {
        sort_by_date_descending(&mut transactions);

        self.save(&transactions)?;
        self.last_id = self.last_id.max(max_id(&transactions));
        self.transactions = transactions;

        Ok(())
    }

    /// The whole ledger as a JSON array indented with two spaces.
    ///
    /// # Errors
    /// Returns an [Error::JSONSerializationError] if serialization fails.
    pub fn export(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(&self.transactions)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))
    }

    /// All transactions, newest date first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The first `count` transactions.
    pub fn recent(&self, count: usize) -> &[Transaction] {
        &self.transactions[..count.min(self.transactions.len())]
    }

    /// The transactions whose description, category ID or category name
    /// contains `query`, ignoring case. A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Transaction> {
        let query = query.trim().to_lowercase();

        if query.is_empty() {
            return self.transactions.iter().collect();
        }

        self.transactions
            .iter()
            .filter(|transaction| {
                transaction.description.to_lowercase().contains(&query)
                    || transaction.category.to_lowercase().contains(&query)
                    || display_category(&transaction.category)
                        .name
                        .to_lowercase()
                        .contains(&query)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn next_id(&self, now: OffsetDateTime) -> TransactionId {
        let now_millis = unix_millis(now);

        match self.last_id.checked_add(1) {
            Some(next) => now_millis.max(next),
            // An imported ID can sit at the top of the range.
            None => first_unused_id(now_millis, |id| {
                self.transactions.iter().any(|transaction| transaction.id == id)
            }),
        }
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), Error> {
        let text = serde_json::to_string(transactions)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        set_item(TRANSACTIONS_KEY, &text, &self.connection).inspect_err(|error| {
            tracing::error!("Could not save transactions: {error}");
        })
    }
}

pub(super) fn unix_millis(time: OffsetDateTime) -> TransactionId {
    (time.unix_timestamp_nanos() / 1_000_000) as TransactionId
}

/// The smallest ID from `start` upwards that `is_taken` rejects, or `start` if
/// every ID in that range is taken.
pub(super) fn first_unused_id(
    start: TransactionId,
    is_taken: impl Fn(TransactionId) -> bool,
) -> TransactionId {
    (start..=TransactionId::MAX)
        .find(|id| !is_taken(*id))
        .unwrap_or(start)
}

fn sort_by_date_descending(transactions: &mut [Transaction]) {
    // `sort_by` is stable, so equal dates keep their relative order.
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

fn max_id(transactions: &[Transaction]) -> TransactionId {
    transactions
        .iter()
        .map(|transaction| transaction.id)
        .max()
        .unwrap_or(0)
}
