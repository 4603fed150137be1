//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error, confirmation::ConfirmationQueue, static_files::StaticAssets, storage::initialize,
    transaction::Ledger,
};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Bangkok".
    pub local_timezone: String,

    /// The user's transactions, loaded from and saved to the database.
    pub ledger: Arc<Mutex<Ledger>>,

    /// Destructive actions waiting for the user to confirm them.
    pub confirmations: Arc<Mutex<ConfirmationQueue>>,

    /// Where files that are not rendered by the app are served from.
    pub static_assets: StaticAssets,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database and load the saved transactions.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Bangkok".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        static_assets: StaticAssets,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let ledger = Ledger::load(db_connection);
        tracing::info!("Loaded {} transactions", ledger.len());

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            ledger: Arc::new(Mutex::new(ledger)),
            confirmations: Arc::new(Mutex::new(ConfirmationQueue::new())),
            static_assets,
        })
    }
}

impl axum::extract::FromRef<AppState> for StaticAssets {
    fn from_ref(state: &AppState) -> Self {
        state.static_assets.clone()
    }
}
