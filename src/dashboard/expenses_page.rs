//! The page for entering and editing the expenses for a single day.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form and Query since they parse repeated keys into a
// Vec and an empty string as None instead of rejecting the request.
use axum_extra::extract::{Form, Query};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    dashboard::{DashboardState, today},
    endpoints::{self, format_endpoint},
    expense::{Expense, ExpenseDate, fetch_expenses, replace_expenses_for_date},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, base, dollar_input_styles,
    },
    internal_server_error::InternalServerError,
    navigation::NavBar,
};

/// The categories offered by the category select.
const CATEGORIES: [&str; 5] = ["Food", "Shopping", "Rent", "Entertainment", "Other"];

/// The query parameters for the expenses page.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensesQuery {
    /// The date to show, e.g. "2024-08-02". Defaults to today.
    pub date: Option<String>,
}

/// The form data for replacing a day's expenses.
///
/// Each row of the form submits one `amount`, `category` and `notes` field,
/// so the i-th entry of each list belongs to the same expense.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensesForm {
    #[serde(default)]
    pub amount: Vec<f64>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ExpensesForm {
    /// Convert the form rows into expenses on `expense_date`.
    ///
    /// Rows with an amount of zero or less are dropped.
    fn into_expenses(self, expense_date: Date) -> Vec<Expense> {
        let mut notes = self.notes.into_iter();

        self.amount
            .into_iter()
            .zip(self.category)
            .map(|(amount, category)| {
                let notes = notes.next().filter(|notes| !notes.trim().is_empty());

                Expense {
                    expense_date,
                    amount,
                    category,
                    notes,
                }
            })
            .filter(|expense| expense.amount > 0.0)
            .collect()
    }
}

/// Display the expenses for the date in the query string, or today.
pub async fn get_expenses_page(
    State(state): State<DashboardState>,
    Query(query): Query<ExpensesQuery>,
) -> Response {
    let expense_date = match query.date.as_deref().map(ExpenseDate::parse) {
        Some(Ok(ExpenseDate(date))) => Ok(date),
        Some(Err(error)) => {
            tracing::warn!("{error}, showing today's expenses instead");
            today(&state.local_timezone)
        }
        None => today(&state.local_timezone),
    };

    let expense_date = match expense_date {
        Ok(date) => date,
        Err(error) => {
            tracing::error!("could not get today's date: {error}");
            return InternalServerError::default().into_response();
        }
    };

    let expenses = fetch_expenses(expense_date, &state.database);

    expenses_view(expense_date, &expenses).into_response()
}

/// Get an empty expense row for appending to the expenses form.
pub async fn get_expense_row() -> Markup {
    expense_row(None)
}

/// A route handler for replacing a day's expenses from the expenses form,
/// redirects to the expenses page for the date on success.
pub async fn replace_expenses_form_endpoint(
    State(state): State<DashboardState>,
    Path(expense_date): Path<String>,
    Form(form): Form<ExpensesForm>,
) -> Response {
    let expense_date = match ExpenseDate::parse(&expense_date) {
        Ok(ExpenseDate(date)) => date,
        Err(error) => {
            tracing::warn!("{error}");
            return error.into_alert_response();
        }
    };

    let expenses = form.into_expenses(expense_date);

    if let Err(error) = replace_expenses_for_date(expense_date, &expenses, &state.database) {
        return error.into_alert_response();
    }

    (
        HxRedirect(expenses_page_url(expense_date)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

fn expenses_page_url(expense_date: Date) -> String {
    format!("{}?date={expense_date}", endpoints::EXPENSES_VIEW)
}

fn expenses_view(expense_date: Date, expenses: &[Expense]) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();
    let form_endpoint = format_endpoint(endpoints::EXPENSES_FORM, expense_date);

    let content = html!(
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                method="get"
                action=(endpoints::EXPENSES_VIEW)
                class="w-full mb-6"
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Expense Date" }

                input
                    id="date"
                    name="date"
                    type="date"
                    value=(expense_date)
                    onchange="this.form.submit()"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button
                type="button"
                hx-get=(endpoints::EXPENSE_ROW_VIEW)
                hx-target="#expense-rows"
                hx-swap="beforeend"
                class=(BUTTON_SECONDARY_STYLE)
            {
                "Add Another Expense"
            }

            form
                id="expenses-form"
                hx-post=(form_endpoint)
                hx-target-error="#alert-container"
                class="w-full space-y-4"
            {
                div class="grid grid-cols-3 gap-4 font-semibold"
                {
                    span { "Amount" }
                    span { "Category" }
                    span { "Notes" }
                }

                div id="expense-rows" class="space-y-2"
                {
                    @for expense in expenses {
                        (expense_row(Some(expense)))
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Submit" }
            }
        }
    );

    base("Add/Update", &[dollar_input_styles()], &content)
}

/// A single editable expense row, prefilled from `expense` if given.
fn expense_row(expense: Option<&Expense>) -> Markup {
    let amount = expense.map(|expense| format!("{:.2}", expense.amount));
    let selected_category = expense.map_or(CATEGORIES[0], |expense| expense.category.as_str());
    let notes = expense.and_then(|expense| expense.notes.as_deref());

    html!(
        div class="grid grid-cols-3 gap-4 expense-row"
        {
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    type="number"
                    step="0.01"
                    min="0"
                    placeholder="0.00"
                    value=[amount]
                    required
                    aria-label="Amount"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            select name="category" aria-label="Category" class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in category_options(selected_category) {
                    option value=(category) selected[category == selected_category]
                    {
                        (category)
                    }
                }
            }

            input
                name="notes"
                type="text"
                value=[notes]
                aria-label="Notes"
                class=(FORM_TEXT_INPUT_STYLE);
        }
    )
}

/// The known categories, plus `selected` if it is not one of them.
fn category_options(selected: &str) -> Vec<&str> {
    let mut options = CATEGORIES.to_vec();

    if !CATEGORIES.contains(&selected) {
        options.push(selected);
    }

    options
}
