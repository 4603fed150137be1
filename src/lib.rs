//! Pastel Finance is a web app for tracking personal income and expenses.
//!
//! This library provides a web server that directly serves HTML pages, plus a
//! responder for static files that can be run on its own.
//!
//! Transactions are kept in memory by a ledger and mirrored to a single key in
//! a SQLite key-value table, so the whole history is rewritten on every change.
//! Deleting, clearing and importing always go through a confirmation step
//! before anything is changed.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod confirmation;
mod dashboard;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod navigation;
mod offline;
mod routing;
mod settings;
mod static_files;
mod storage;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use error::{Error, ValidationError};
pub use routing::build_router;
pub use static_files::{StaticAssets, cache_control_for, content_type_for, serve_static_asset};
pub use storage::initialize as initialize_db;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
