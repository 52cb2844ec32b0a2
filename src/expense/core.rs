//! Defines the expense model and the database queries for expenses.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, db::Database};

// ============================================================================
// MODELS
// ============================================================================

/// Money spent on a given day.
///
/// Expenses have no ID. The expenses for a day are always replaced together,
/// see [replace_expenses_for_date].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The day the money was spent.
    pub expense_date: Date,
    /// How much was spent.
    ///
    /// Expected to be non-negative, but this is not enforced.
    pub amount: f64,
    /// A free-form label such as "Food" or "Rent".
    pub category: String,
    /// Optional free text describing the expense.
    #[serde(default)]
    pub notes: Option<String>,
}

/// The data needed to insert an expense.
///
/// Expenses are stored exactly as they are read back, so this is the same
/// shape as [Expense].
pub type NewExpense = Expense;

impl Expense {
    /// Create a new expense without notes.
    pub fn new(expense_date: Date, amount: f64, category: &str) -> Self {
        Self {
            expense_date,
            amount,
            category: category.to_owned(),
            notes: None,
        }
    }

    /// Set the notes for the expense.
    pub fn notes(mut self, notes: Option<&str>) -> Self {
        self.notes = notes.map(str::to_owned);
        self
    }
}

/// The sum of expense amounts for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category the expenses were recorded under.
    pub category: String,
    /// The sum of the expense amounts in the category.
    pub total: f64,
}

type RowsAffected = usize;

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Get the expenses recorded on `expense_date`.
///
/// Errors are logged and an empty list is returned instead, so callers
/// cannot tell a failed query apart from a day with no expenses.
pub fn fetch_expenses(expense_date: Date, database: &Database) -> Vec<Expense> {
    database
        .with_cursor(false, |connection| {
            select_expenses_for_date(expense_date, connection)
        })
        .unwrap_or_else(|error| {
            tracing::error!("could not fetch expenses for {expense_date}: {error}");
            Vec::new()
        })
}

/// Delete every expense recorded on `expense_date`.
///
/// Returns the number of deleted expenses.
///
/// # Errors
/// Returns an [Error::SqlError] if the delete fails, in which case nothing
/// is deleted.
pub fn delete_expenses_for_date(
    expense_date: Date,
    database: &Database,
) -> Result<RowsAffected, Error> {
    database.with_cursor(true, |connection| {
        delete_expenses(expense_date, connection)
    })
}

/// Insert a single expense.
///
/// Returns the number of inserted rows, i.e. 1 on success.
///
/// # Errors
/// Returns an [Error::SqlError] if the insert fails.
pub fn insert_expense(expense: &NewExpense, database: &Database) -> Result<RowsAffected, Error> {
    database.with_cursor(true, |connection| insert(expense, connection))
}

/// Replace the expenses recorded on `expense_date` with `expenses`.
///
/// An empty `expenses` leaves the database untouched. Otherwise the delete
/// and the inserts are committed together, or not at all.
///
/// Each expense is stored under its own `expense_date`.
///
/// Returns the number of inserted expenses.
///
/// # Errors
/// Returns an [Error::SqlError] if any statement fails. The expenses for
/// `expense_date` are then left as they were.
pub fn replace_expenses_for_date(
    expense_date: Date,
    expenses: &[NewExpense],
    database: &Database,
) -> Result<RowsAffected, Error> {
    if expenses.is_empty() {
        return Ok(0);
    }

    database.with_cursor(true, |connection| {
        let deleted = delete_expenses(expense_date, connection)?;

        let mut inserted = 0;
        for expense in expenses {
            inserted += insert(expense, connection)?;
        }

        tracing::info!(
            "replaced {deleted} expenses on {expense_date} with {inserted} new expenses"
        );

        Ok(inserted)
    })
}

/// Get the total amount spent per category between `start_date` and
/// `end_date`, inclusive.
///
/// The order of the returned totals is unspecified.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn fetch_expense_summary(
    start_date: Date,
    end_date: Date,
    database: &Database,
) -> Result<Vec<CategoryTotal>, Error> {
    database.with_cursor(false, |connection| {
        connection
            .prepare(
                "SELECT category, SUM(amount) AS total FROM expenses
                 WHERE expense_date BETWEEN ?1 AND ?2
                 GROUP BY category",
            )?
            .query_map((start_date, end_date), |row| {
                let total: Option<f64> = row.get(1)?;

                Ok(CategoryTotal {
                    category: row.get(0)?,
                    total: total.unwrap_or(0.0),
                })
            })?
            .collect::<Result<Vec<_>, rusqlite::Error>>()
            .map_err(Error::from)
    })
}

fn select_expenses_for_date(
    expense_date: Date,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT expense_date, amount, category, notes FROM expenses
             WHERE expense_date = :expense_date
             ORDER BY rowid",
        )?
        .query_map(&[(":expense_date", &expense_date)], map_expense_row)?
        .collect::<Result<Vec<_>, rusqlite::Error>>()
        .map_err(Error::from)
}

fn delete_expenses(expense_date: Date, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM expenses WHERE expense_date = :expense_date",
            &[(":expense_date", &expense_date)],
        )
        .map_err(Error::from)
}

fn insert(expense: &NewExpense, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "INSERT INTO expenses (expense_date, amount, category, notes)
             VALUES (?1, ?2, ?3, ?4)",
            (
                expense.expense_date,
                expense.amount,
                &expense.category,
                &expense.notes,
            ),
        )
        .map_err(Error::from)
}

/// Create the expenses table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                expense_date TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                notes TEXT
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(expense_date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let expense_date = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let notes = row.get(3)?;

    Ok(Expense {
        expense_date,
        amount,
        category,
        notes,
    })
}

// ============================================================================
// TESTS
// ============================================================================
