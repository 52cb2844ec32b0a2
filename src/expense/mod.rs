//! Expense management.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model
//! - Database functions for fetching, deleting, inserting and summarising expenses
//! - The JSON endpoints for reading and replacing a day's expenses

mod api;
mod core;
mod date;

pub use api::{get_expenses_endpoint, replace_expenses_endpoint};
pub use self::core::{
    CategoryTotal, Expense, NewExpense, create_expense_table, delete_expenses_for_date,
    fetch_expense_summary, fetch_expenses, insert_expense, replace_expenses_for_date,
};
pub use date::ExpenseDate;
