//! Error alerts for the dashboard.
//!
//! Alerts are rendered into the `#alert-container` element by htmx when a
//! dashboard form submission fails.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

const ALERT_ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
    dark:bg-gray-800 dark:text-red-400";

/// An error message with a short summary and optional details.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    pub fn into_html(self) -> Markup {
        html! {
            div class=(ALERT_ERROR_STYLE) role="alert"
            {
                span class="font-medium" { (self.message) }

                @if !self.details.is_empty() {
                    " " (self.details)
                }
            }
        }
    }

    /// Render the alert with `status_code`.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}
