//! Implements a struct that holds the state of the REST server.

use crate::{Error, db::Database};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The expense database. Each request opens its own connection.
    pub database: Database,
}

impl AppState {
    /// Create a new [AppState] backed by `database`.
    ///
    /// This function will initialize the database by creating the expense table.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(database: Database, local_timezone: &str) -> Result<Self, Error> {
        database.initialize()?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            database,
        })
    }
}
