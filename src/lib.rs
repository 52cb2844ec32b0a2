//! Expense Tracker is a web app for recording daily expenses and seeing where
//! the money went.
//!
//! This library provides a JSON API for reading and replacing a day's
//! expenses and for summarising spending by category, along with a dashboard
//! of HTML pages built on the same storage layer.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod alert;
mod analytics;
mod app_state;
mod dashboard;
mod db;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use analytics::{Breakdown, CategoryBreakdown, DateRange, category_breakdown, get_breakdown};
pub use app_state::AppState;
pub use db::Database;
pub use expense::{
    CategoryTotal, Expense, NewExpense, delete_expenses_for_date, fetch_expense_summary,
    fetch_expenses, insert_expense, replace_expenses_for_date,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, LogConfig, init_logging, logging_middleware};
pub use routing::build_router;
pub use timezone::get_local_offset;

use crate::alert::Alert;

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
            Ok(mut signal) => {
                signal.recv().await;
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

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A date in a URL path or query string was not a valid `YYYY-MM-DD` date.
    #[error("invalid date \"{0}\", expected a date like 2024-08-02")]
    InvalidDate(String),

    /// An unhandled/unexpected SQL error.
    ///
    /// The details should only be logged on the server. Clients are told
    /// that something went wrong without the SQL error text.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The log file or the global subscriber could not be set up.
    #[error("could not set up logging: {0}")]
    LoggingSetup(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidDate(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::SqlError(_) | Error::InvalidTimezone(_) | Error::LoggingSetup(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Render the error as an alert for htmx requests from the dashboard.
    pub(crate) fn into_alert_response(self) -> Response {
        let status_code = self.status_code();

        match self {
            Error::InvalidDate(date) => Alert::error(
                "Invalid date",
                &format!("\"{date}\" is not a valid date. Dates look like 2024-08-02."),
            )
            .into_response_with_status(status_code),
            Error::InvalidTimezone(timezone) => Alert::error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
            .into_response_with_status(status_code),
            _ => Alert::error(
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            )
            .into_response_with_status(status_code),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let detail = match &self {
            Error::InvalidDate(_) => self.to_string(),
            // SQL errors are logged when they are converted from rusqlite errors.
            Error::SqlError(_) => {
                "Internal server error, check the server logs for more details.".to_owned()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                "Internal server error, check the server logs for more details.".to_owned()
            }
        };

        (status_code, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::Value;

    use crate::{Error, test_utils::parse_html_fragment};

    async fn json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");
        serde_json::from_slice(&body).expect("Could not parse response body as JSON")
    }

    #[tokio::test]
    async fn invalid_date_is_unprocessable() {
        let response = Error::InvalidDate("2024-13-01".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        let detail = body["detail"].as_str().expect("detail missing");
        assert!(detail.contains("2024-13-01"), "got {detail}");
    }

    #[tokio::test]
    async fn sql_error_hides_details() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        let detail = body["detail"].as_str().expect("detail missing");
        assert!(!detail.contains("SQL"), "got {detail}");
    }

    #[tokio::test]
    async fn sql_error_alert_is_generic() {
        let response =
            Error::SqlError(rusqlite::Error::InvalidQuery).into_alert_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Something went wrong"), "got {text}");
    }

    #[test]
    fn sql_errors_convert() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::SqlError(rusqlite::Error::QueryReturnedNoRows));
    }
}
