//! Scoped access to the application's SQLite database.
//!
//! The database is never held open between calls. Each call to
//! [Database::with_cursor] opens its own connection, runs inside a single
//! transaction and closes the connection before returning.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, Transaction};

use crate::{Error, expense::create_expense_table};

/// A handle to the application database.
///
/// Cloning is cheap: the handle only stores where the database lives.
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Create a handle for the SQLite database file at `path`.
    ///
    /// The file is created on first use if it does not exist.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file path of the database.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the tables for the domain models if they do not exist yet.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database cannot be opened or the
    /// tables cannot be created.
    pub fn initialize(&self) -> Result<(), Error> {
        self.with_cursor(true, |transaction| {
            create_expense_table(transaction)?;
            Ok(())
        })
    }

    /// Run `f` inside a transaction on a fresh connection.
    ///
    /// If `commit` is `true` the transaction is committed when `f` succeeds and
    /// rolled back when it fails. If `commit` is `false` nothing `f` does is
    /// ever persisted.
    ///
    /// The connection is closed on every exit path, including panics in `f`.
    ///
    /// # Errors
    /// Returns the error from `f`, or an [Error::SqlError] if the connection
    /// could not be opened or the transaction could not be committed.
    pub fn with_cursor<T, F>(&self, commit: bool, f: F) -> Result<T, Error>
    where
        F: FnOnce(&Transaction) -> Result<T, Error>,
    {
        let mut connection = self.connect()?;
        let transaction = connection.transaction()?;

        match f(&transaction) {
            Ok(value) if commit => {
                transaction.commit()?;
                Ok(value)
            }
            // Dropping the transaction rolls it back.
            Ok(value) => Ok(value),
            Err(error) => {
                if commit && let Err(rollback_error) = transaction.rollback() {
                    tracing::error!("could not roll back transaction: {rollback_error}");
                }

                Err(error)
            }
        }
    }

    fn connect(&self) -> Result<Connection, Error> {
        Connection::open(&self.path).map_err(|error| {
            tracing::error!("could not open database at {:?}: {error}", self.path);
            Error::SqlError(error)
        })
    }
}
