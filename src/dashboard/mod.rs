//! Dashboard module
//!
//! Provides the HTML pages for entering a day's expenses and for viewing the
//! category breakdown over a date range.

mod analytics_page;
mod charts;
mod expenses_page;
mod tables;

pub use analytics_page::get_analytics_page;
pub use expenses_page::{get_expense_row, get_expenses_page, replace_expenses_form_endpoint};

use axum::extract::FromRef;
use time::{Date, OffsetDateTime};

use crate::{AppState, Error, db::Database, timezone::get_local_offset};

/// The state needed for displaying the dashboard pages.
///
/// Contains the database handle and timezone information required
/// by dashboard handlers.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The expense database.
    pub database: Database,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            database: state.database.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Today's date in `local_timezone_name`, e.g. "Pacific/Auckland".
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the timezone name is not known.
fn today(local_timezone_name: &str) -> Result<Date, Error> {
    let local_timezone = get_local_offset(local_timezone_name).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", local_timezone_name);
        Error::InvalidTimezone(local_timezone_name.to_owned())
    })?;

    Ok(OffsetDateTime::now_utc().to_offset(local_timezone).date())
}
