//! JSON endpoints for reading and replacing a day's expenses.

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    db::Database,
    expense::{
        Expense, ExpenseDate,
        core::{fetch_expenses, replace_expenses_for_date},
    },
};

/// The state needed to read and write expenses.
#[derive(Debug, Clone)]
pub struct ExpenseApiState {
    pub database: Database,
}

impl FromRef<AppState> for ExpenseApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            database: state.database.clone(),
        }
    }
}

/// The response body for a replace request.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A route handler that returns the expenses recorded on the date in the path.
///
/// A date that cannot be parsed matches no expenses, so an empty list is
/// returned rather than an error.
pub async fn get_expenses_endpoint(
    State(state): State<ExpenseApiState>,
    Path(expense_date): Path<String>,
) -> Json<Vec<Expense>> {
    let expense_date = match ExpenseDate::parse(&expense_date) {
        Ok(ExpenseDate(date)) => date,
        Err(error) => {
            tracing::warn!("{error}");
            return Json(Vec::new());
        }
    };

    Json(fetch_expenses(expense_date, &state.database))
}

/// A route handler that replaces the expenses recorded on the date in the path.
///
/// An empty list is acknowledged without touching the stored expenses.
pub async fn replace_expenses_endpoint(
    State(state): State<ExpenseApiState>,
    Path(expense_date): Path<String>,
    Json(expenses): Json<Vec<Expense>>,
) -> Result<Json<MessageResponse>, Error> {
    let ExpenseDate(expense_date) = ExpenseDate::parse(&expense_date)?;

    if expenses.is_empty() {
        return Ok(Json(MessageResponse {
            message: "No expenses to add.".to_owned(),
        }));
    }

    replace_expenses_for_date(expense_date, &expenses, &state.database)?;

    Ok(Json(MessageResponse {
        message: format!(
            "Added {} expenses for date {expense_date}.",
            expenses.len()
        ),
    }))
}
