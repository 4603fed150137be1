//! Reading transactions from an uploaded export file.
//!
//! Import is lenient about individual records. Only a file that is not a JSON
//! array is rejected.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use time::{Date, OffsetDateTime, macros::format_description};

use crate::{
    Error,
    transaction::{
        Transaction, TransactionId, TransactionType,
        ledger::{first_unused_id, unix_millis},
    },
};

/// A record from an import file with every field optional.
#[derive(Debug, Deserialize)]
struct ImportedTransaction {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<TransactionId>,
    #[serde(default, deserialize_with = "lenient_amount")]
    amount: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    category: String,
    #[serde(default, deserialize_with = "lenient_date")]
    date: Option<Date>,
    #[serde(default, rename = "type", deserialize_with = "lenient_kind")]
    kind: TransactionType,
}

fn lenient_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<TransactionId>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Numbers and numeric strings are kept, anything else becomes zero.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let amount = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };

    Ok(amount.filter(|amount| amount.is_finite()).unwrap_or(0.0))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accepts `YYYY-MM-DD`, including as the prefix of a timestamp.
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
    let Value::String(text) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };

    Ok(text
        .get(..10)
        .and_then(|day| Date::parse(day, format_description!("[year]-[month]-[day]")).ok()))
}

fn lenient_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TransactionType, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) if text.eq_ignore_ascii_case("income") => TransactionType::Income,
        _ => TransactionType::Expense,
    })
}

/// Parse the contents of an exported file.
///
/// Records are accepted as they are. Missing fields are filled in: a fresh ID,
/// an amount of zero, empty text, `fallback_date` and the expense type.
/// Elements that are not objects are skipped.
///
/// # Errors
/// Returns an [Error::InvalidFormat] if `text` is not JSON or the top level
/// value is not an array.
pub fn parse_transactions(text: &str, fallback_date: Date) -> Result<Vec<Transaction>, Error> {
    let value: Value = serde_json::from_str(text)
        .map_err(|_| Error::InvalidFormat("The file is not valid JSON".to_owned()))?;

    let Value::Array(values) = value else {
        return Err(Error::InvalidFormat(
            "The file does not contain a list of transactions".to_owned(),
        ));
    };

    let records: Vec<ImportedTransaction> = values
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|value| {
            serde_json::from_value(value)
                .inspect_err(|error| tracing::warn!("Skipping unreadable record: {error}"))
                .ok()
        })
        .collect();

    let mut used_ids: HashSet<TransactionId> =
        records.iter().filter_map(|record| record.id).collect();
    let now_millis = unix_millis(OffsetDateTime::now_utc());

    Ok(records
        .into_iter()
        .map(|record| {
            let id = match record.id {
                Some(id) => id,
                None => {
                    let id = first_unused_id(now_millis, |id| used_ids.contains(&id));
                    used_ids.insert(id);
                    id
                }
            };

            Transaction {
                id,
                amount: record.amount,
                description: record.description,
                category: record.category,
                date: record.date.unwrap_or(fallback_date),
                kind: record.kind,
            }
        })
        .collect())
}

#[cfg(test)]
mod import_tests {
    use time::macros::date;

    use crate::{
        Error,
        transaction::{TransactionType, parse_transactions},
    };

    #[test]
    fn rejects_non_array() {
        let result = parse_transactions(r#"{"transactions": []}"#, date!(2024 - 03 - 01));

        assert!(matches!(result, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn rejects_invalid_json() {
        let result = parse_transactions("not json", date!(2024 - 03 - 01));

        assert!(matches!(result, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn accepts_empty_array() {
        let result = parse_transactions("[]", date!(2024 - 03 - 01));

        assert_eq!(result, Ok(Vec::new()));
    }

    #[test]
    fn keeps_complete_records_as_they_are() {
        let records = parse_transactions(
            r#"[{"id":7,"amount":12.5,"description":"lunch","category":"food","date":"2024-01-05","type":"income"}]"#,
            date!(2024 - 03 - 01),
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 7);
        assert_eq!(records[0].amount, 12.5);
        assert_eq!(records[0].description, "lunch");
        assert_eq!(records[0].category, "food");
        assert_eq!(records[0].date, date!(2024 - 01 - 05));
        assert_eq!(records[0].kind, TransactionType::Income);
    }

    #[test]
    fn record_without_id_gets_a_fresh_one() {
        let records = parse_transactions(
            r#"[
                {"amount":100,"description":"coffee","category":"food","date":"2024-01-05","type":"expense"},
                {"amount":5,"description":"tea","category":"food","date":"2024-01-06","type":"expense"}
            ]"#,
            date!(2024 - 03 - 01),
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].id > 0);
        assert_ne!(records[0].id, records[1].id);
    }

    #[test]
    fn numeric_string_amount_is_accepted() {
        let records = parse_transactions(
            r#"[{"id":1,"amount":"100","description":"coffee","category":"food","date":"2024-01-05","type":"expense"}]"#,
            date!(2024 - 03 - 01),
        )
        .unwrap();

        assert_eq!(records[0].amount, 100.0);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let records =
            parse_transactions(r#"[{"id": 1, "amount": "lots"}]"#, date!(2024 - 03 - 01)).unwrap();

        assert_eq!(records[0].amount, 0.0);
        assert_eq!(records[0].description, "");
        assert_eq!(records[0].category, "");
        assert_eq!(records[0].date, date!(2024 - 03 - 01));
        assert_eq!(records[0].kind, TransactionType::Expense);
    }

    #[test]
    fn elements_that_are_not_objects_are_skipped() {
        let records = parse_transactions(
            r#"[1, "two", {"id": 3, "amount": 3, "date": "2024-01-05T10:00:00Z"}]"#,
            date!(2024 - 03 - 01),
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 3);
        assert_eq!(records[0].date, date!(2024 - 01 - 05));
    }
}
