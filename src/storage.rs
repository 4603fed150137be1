//! A string key-value store on top of SQLite.
//!
//! The app keeps its whole state as serialized values under fixed keys, the
//! same way a browser app would use local storage. Each write replaces the
//! previous value for that key.

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// Create the tables the application needs.
///
/// # Errors
/// Returns an error if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_key_value_table(connection)?;

    Ok(())
}

/// Create the key-value table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Get the value stored under `key`, or `None` if nothing has been stored.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_item(key: &str, connection: &Connection) -> Result<Option<String>, Error> {
    connection
        .query_row(
            "SELECT value FROM key_value WHERE key = :key",
            &[(":key", key)],
            |row| row.get(0),
        )
        .optional()
        .map_err(|error| error.into())
}

/// Store `value` under `key`, replacing any existing value.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn set_item(key: &str, value: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO key_value (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (key, value),
    )?;

    Ok(())
}

/// Remove the value stored under `key`. Removing a missing key is not an error.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn remove_item(key: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute("DELETE FROM key_value WHERE key = :key", &[(":key", key)])?;

    Ok(())
}
