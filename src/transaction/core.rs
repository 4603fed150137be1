//! Defines the core data models for transactions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ValidationError;

/// The identifier of a transaction.
///
/// Identifiers are the number of milliseconds since the Unix epoch at the
/// time the transaction was created, bumped forward when needed so that no
/// two transactions share an identifier.
pub type TransactionId = i64;

/// Whether money was earned or spent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money was spent.
    #[default]
    Expense,
    /// Money was earned.
    Income,
}

impl TransactionType {
    /// The lowercase name used in forms, query strings and persisted data.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Expense => write!(f, "Expense"),
            TransactionType::Income => write!(f, "Income"),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The field order and names match the persisted JSON layout:
/// `{id, amount, description, category, date, type}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction. Always positive,
    /// use `kind` to tell income and expenses apart.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The ID of the category in the [crate::category] registry.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// The user supplied fields for a transaction that has not been added to the ledger yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The amount entered by the user, `None` if the field was left empty.
    pub amount: Option<f64>,
    /// The description as typed, surrounding whitespace is removed on validation.
    pub description: String,
    /// The selected category ID.
    pub category: String,
    /// The selected date, `None` if no date was selected.
    pub date: Option<Date>,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionType,
}

/// A [NewTransaction] that passed validation and is waiting for an ID.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidTransaction {
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub date: Date,
    pub kind: TransactionType,
}

impl ValidTransaction {
    pub(crate) fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            description: self.description,
            category: self.category,
            date: self.date,
            kind: self.kind,
        }
    }
}

impl NewTransaction {
    /// Check the amount, description and date, in that order.
    ///
    /// # Errors
    /// Returns the first [ValidationError] found:
    /// - [ValidationError::NonPositiveAmount] if the amount is missing, not finite or not greater than zero,
    /// - [ValidationError::EmptyDescription] if the description is empty after trimming,
    /// - [ValidationError::MissingDate] if no date was given.
    pub(crate) fn validate(self) -> Result<ValidTransaction, ValidationError> {
        let amount = match self.amount {
            Some(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => return Err(ValidationError::NonPositiveAmount),
        };

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let Some(date) = self.date else {
            return Err(ValidationError::MissingDate);
        };

        Ok(ValidTransaction {
            amount,
            description: description.to_owned(),
            category: self.category,
            date,
            kind: self.kind,
        })
    }
}
