//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}', use [format_endpoint].

/// The home page with the balance summary and recent transactions.
pub const ROOT: &str = "/";
/// The page for displaying all transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page with the category breakdown and monthly expense chart.
pub const REPORTS_VIEW: &str = "/reports";
/// The page for clearing, exporting and importing data.
pub const SETTINGS_VIEW: &str = "/settings";

/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to request deletion of a single transaction.
pub const DELETE_TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to request deletion of all transactions.
pub const CLEAR_TRANSACTIONS: &str = "/api/clear";
/// The route to download all transactions as a JSON file.
pub const EXPORT: &str = "/api/export";
/// The route to upload a JSON file that replaces all transactions.
pub const IMPORT: &str = "/api/import";
/// The route to accept or decline a pending destructive action.
pub const CONFIRMATION: &str = "/api/confirmations/{confirmation_id}";

/// The generated service worker script.
pub const SERVICE_WORKER: &str = "/sw.js";
/// The web app manifest.
pub const WEB_MANIFEST: &str = "/manifest.json";

/// Replace the first `{parameter}` in `endpoint_path` with `id`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.char_indices() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
