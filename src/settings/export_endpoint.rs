use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use time::Date;

use crate::{AppState, Error, timezone::local_today, transaction::Ledger};

/// The state needed to export the ledger.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The ledger to export.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Bangkok".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler that downloads every transaction as a JSON file.
pub async fn export_endpoint(State(state): State<ExportState>) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let json = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LockError)?
        .export()?;

    Ok((
        [
            (CONTENT_TYPE, "application/json".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_file_name(today)),
            ),
        ],
        json,
    )
        .into_response())
}

/// The name of the exported file, e.g. "pastel-finance-2024-01-05.json".
fn export_file_name(date: Date) -> String {
    format!("pastel-finance-{date}.json")
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::{StatusCode, header::CONTENT_DISPOSITION},
    };
    use time::macros::date;

    use crate::{
        settings::export_endpoint::{ExportState, export_endpoint, export_file_name},
        test_utils::{assert_content_type, get_header, ledger::must_get_ledger},
        transaction::{NewTransaction, TransactionType, parse_transactions},
    };

    fn get_test_state() -> ExportState {
        let mut ledger = must_get_ledger();
        ledger
            .add(NewTransaction {
                amount: Some(2500.0),
                description: "rent".to_owned(),
                category: "home".to_owned(),
                date: Some(date!(2024 - 01 - 01)),
                kind: TransactionType::Expense,
            })
            .unwrap();

        ExportState {
            ledger: Arc::new(Mutex::new(ledger)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[test]
    fn file_name_includes_date() {
        assert_eq!(
            export_file_name(date!(2024 - 01 - 05)),
            "pastel-finance-2024-01-05.json"
        );
    }

    #[tokio::test]
    async fn export_downloads_json() {
        let state = get_test_state();

        let response = export_endpoint(State(state.clone())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "application/json");
        let disposition = get_header(&response, CONTENT_DISPOSITION.as_str());
        assert!(
            disposition.starts_with("attachment; filename=\"pastel-finance-"),
            "got {disposition}"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let exported = parse_transactions(&text, date!(2024 - 01 - 01)).unwrap();
        assert_eq!(exported, state.ledger.lock().unwrap().transactions());
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let state = ExportState {
            local_timezone: "Not/AZone".to_owned(),
            ..get_test_state()
        };

        assert!(export_endpoint(State(state)).await.is_err());
    }
}
