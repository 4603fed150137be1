//! The modal dialog that asks the user to confirm a destructive action.

use std::sync::{Arc, Mutex};

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    Error,
    confirmation::{ConfirmationId, ConfirmationQueue, PendingAction},
    endpoints::{self, format_endpoint},
    html::{BUTTON_DANGER_STYLE, BUTTON_SECONDARY_STYLE},
};

/// Queue `action` and respond with the dialog asking the user to confirm it.
///
/// Handlers for destructive actions call this instead of changing the ledger.
pub(crate) fn request_confirmation(
    confirmations: &Arc<Mutex<ConfirmationQueue>>,
    action: PendingAction,
) -> Response {
    let mut confirmations = match confirmations.lock() {
        Ok(confirmations) => confirmations,
        Err(error) => {
            tracing::error!("could not acquire confirmation queue lock: {error}");
            return Error::LockError.into_alert_response();
        }
    };

    let prompt = action.prompt();
    let confirm_label = action.confirm_label();
    let id = confirmations.request(action);
    tracing::debug!(
        "Waiting on confirmation {id} ({} pending)",
        confirmations.len()
    );

    confirmation_dialog(id, &prompt, confirm_label).into_response()
}

/// A modal showing `prompt` with buttons to cancel or confirm.
///
/// Both buttons post to the confirmation endpoint for `id`, as does clicking
/// the backdrop, which declines.
pub(crate) fn confirmation_dialog(id: ConfirmationId, prompt: &str, confirm_label: &str) -> Markup {
    let resolve_url = format_endpoint(endpoints::CONFIRMATION, id);

    html! {
        div
            id="confirmation-dialog"
            role="dialog"
            aria-modal="true"
            aria-labelledby="confirmation-prompt"
            class="fixed inset-0 z-50 flex items-center justify-center p-4"
        {
            div
                class="absolute inset-0 bg-gray-900/40 backdrop-blur-sm"
                hx-post=(resolve_url)
                hx-vals=r#"{"confirmed": "false"}"#
                hx-target="#dialog-container"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
            {}

            form
                hx-post=(resolve_url)
                hx-target="#dialog-container"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                class="relative w-full max-w-sm rounded-2xl bg-white dark:bg-gray-800 p-6 shadow-xl space-y-4"
            {
                div class="flex justify-center text-3xl text-rose-400"
                {
                    i class="fa-solid fa-triangle-exclamation" {}
                }

                p id="confirmation-prompt" class="text-center text-gray-900 dark:text-white"
                {
                    (prompt)
                }

                div class="flex gap-3"
                {
                    button
                        type="submit"
                        name="confirmed"
                        value="false"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Cancel"
                    }

                    button
                        type="submit"
                        name="confirmed"
                        value="true"
                        class=(BUTTON_DANGER_STYLE)
                    {
                        (confirm_label)
                    }
                }
            }
        }
    }
}
