use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::Response,
};

use crate::{
    AppState,
    confirmation::{ConfirmationQueue, PendingAction, request_confirmation},
};

/// The state needed to clear all data.
#[derive(Debug, Clone)]
pub struct ClearDataState {
    /// Where the clear waits until the user confirms it.
    pub confirmations: Arc<Mutex<ConfirmationQueue>>,
}

impl FromRef<AppState> for ClearDataState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            confirmations: state.confirmations.clone(),
        }
    }
}

/// A route handler for deleting every transaction, responds with a confirmation dialog.
pub async fn clear_data_endpoint(State(state): State<ClearDataState>) -> Response {
    request_confirmation(&state.confirmations, PendingAction::ClearAll)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};

    use crate::{
        confirmation::{ConfirmationQueue, PendingAction},
        settings::clear_endpoint::{ClearDataState, clear_data_endpoint},
        test_utils::parse_html_fragment,
    };

    #[tokio::test]
    async fn clear_asks_for_confirmation() {
        let state = ClearDataState {
            confirmations: Arc::new(Mutex::new(ConfirmationQueue::new())),
        };

        let response = clear_data_endpoint(State(state.clone())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("cannot be recovered"), "got {text}");
        assert_eq!(
            state.confirmations.lock().unwrap().resolve(1, true),
            Ok(Some(PendingAction::ClearAll))
        );
    }
}
