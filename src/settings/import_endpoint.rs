use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Multipart, State, multipart::Field},
    response::Response,
};

use crate::{
    AppState, Error,
    confirmation::{ConfirmationQueue, PendingAction, request_confirmation},
    timezone::local_today,
    transaction::parse_transactions,
};

/// The name of the multipart field holding the uploaded file.
const FILE_FIELD: &str = "file";

/// The state needed for importing transactions.
#[derive(Debug, Clone)]
pub struct ImportState {
    /// Where the import waits until the user confirms it.
    pub confirmations: Arc<Mutex<ConfirmationQueue>>,
    /// The timezone used to date records that have no date.
    pub local_timezone: String,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            confirmations: state.confirmations.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Route handler for importing transactions from an exported JSON file.
///
/// A valid file is not applied straight away: the response is a dialog asking
/// the user to confirm replacing their data. An invalid file leaves everything
/// untouched and responds with an error alert.
pub async fn import_endpoint(State(state): State<ImportState>, multipart: Multipart) -> Response {
    let text = match read_file_field(multipart).await {
        Ok(text) => text,
        Err(error) => {
            tracing::debug!("Could not read uploaded file: {error}");
            return error.into_alert_response();
        }
    };

    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let transactions = match parse_transactions(&text, today) {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::debug!("Rejected import: {error}");
            return error.into_alert_response();
        }
    };

    tracing::debug!("Parsed {} transactions for import", transactions.len());
    request_confirmation(&state.confirmations, PendingAction::ReplaceAll(transactions))
}

/// Find the file field in `multipart` and read it as text.
async fn read_file_field(mut multipart: Multipart) -> Result<String, Error> {
    while let Some(field) = multipart.next_field().await.map_err(|error| {
        tracing::error!("Could not read multipart form: {error}");
        Error::MultipartError(error.body_text())
    })? {
        if field.name() == Some(FILE_FIELD) {
            return parse_multipart_field(field).await;
        }
    }

    Err(Error::MultipartError("No file was uploaded.".to_owned()))
}

async fn parse_multipart_field(field: Field<'_>) -> Result<String, Error> {
    let file_name = field.file_name().unwrap_or("file").to_owned();

    let text = field.text().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })?;

    tracing::debug!("Read {} bytes from {file_name}", text.len());

    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{FromRequest, Multipart, State},
        http::{Request, StatusCode},
    };
    use time::macros::date;

    use crate::{
        confirmation::{ConfirmationQueue, PendingAction},
        endpoints,
        settings::import_endpoint::{ImportState, import_endpoint},
        test_utils::{assert_valid_html, parse_html_fragment},
        transaction::{Transaction, TransactionType},
    };

    const EXPORTED_FILE: &str = r#"[
  {
    "id": 1704412800000,
    "amount": 100.0,
    "description": "coffee",
    "category": "food",
    "date": "2024-01-05",
    "type": "expense"
  }
]"#;

    fn get_test_state() -> ImportState {
        ImportState {
            confirmations: Arc::new(Mutex::new(ConfirmationQueue::new())),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    async fn must_make_multipart(field_name: &str, contents: &str) -> Multipart {
        let boundary = "MY_BOUNDARY123456789";
        let boundary_start = format!("--{boundary}");
        let boundary_end = format!("--{boundary}--");
        let disposition =
            format!("Content-Disposition: form-data; name=\"{field_name}\"; filename=\"data.json\";");

        let lines = [
            boundary_start.as_str(),
            disposition.as_str(),
            "Content-Type: application/json",
            "",
            contents,
            boundary_end.as_str(),
        ];

        let data = lines.join("\r\n").into_bytes();

        let request = Request::builder()
            .method("POST")
            .uri(endpoints::IMPORT)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(data.into())
            .unwrap();

        Multipart::from_request(request, &{}).await.unwrap()
    }

    #[tokio::test]
    async fn valid_file_asks_for_confirmation() {
        let state = get_test_state();

        let response = import_endpoint(
            State(state.clone()),
            must_make_multipart("file", EXPORTED_FILE).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Import 1 transaction?"), "got {text}");

        let want = Transaction {
            id: 1704412800000,
            amount: 100.0,
            description: "coffee".to_owned(),
            category: "food".to_owned(),
            date: date!(2024 - 01 - 05),
            kind: TransactionType::Expense,
        };
        assert_eq!(
            state.confirmations.lock().unwrap().resolve(1, true),
            Ok(Some(PendingAction::ReplaceAll(vec![want])))
        );
    }

    #[tokio::test]
    async fn incomplete_records_are_accepted() {
        let state = get_test_state();

        let response = import_endpoint(
            State(state.clone()),
            must_make_multipart("file", r#"[{"amount": "100", "description": "coffee"}]"#).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let action = state.confirmations.lock().unwrap().resolve(1, true);
        let Ok(Some(PendingAction::ReplaceAll(transactions))) = action else {
            panic!("expected a pending import, got {action:?}");
        };
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, 100.0);
        assert_eq!(transactions[0].description, "coffee");
        assert_eq!(transactions[0].kind, TransactionType::Expense);
    }

    #[tokio::test]
    async fn non_array_file_is_rejected() {
        let state = get_test_state();

        let response = import_endpoint(
            State(state.clone()),
            must_make_multipart("file", r#"{"transactions": []}"#).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.confirmations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_json_is_rejected() {
        let state = get_test_state();

        let response = import_endpoint(
            State(state.clone()),
            must_make_multipart("file", "not json").await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.confirmations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file_field_is_rejected() {
        let state = get_test_state();

        let response = import_endpoint(
            State(state.clone()),
            must_make_multipart("something-else", EXPORTED_FILE).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.confirmations.lock().unwrap().is_empty());
    }
}
