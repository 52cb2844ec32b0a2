//! The JSON endpoint for the category breakdown.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    analytics::breakdown::{Breakdown, category_breakdown},
    db::Database,
    expense::fetch_expense_summary,
};

/// The state needed for the analytics endpoint.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    pub database: Database,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            database: state.database.clone(),
        }
    }
}

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    /// The first day in the range.
    pub start_date: Date,
    /// The last day in the range.
    pub end_date: Date,
}

/// Get the category breakdown for the expenses in `date_range`.
///
/// # Errors
/// Returns an [Error::SqlError] if the expenses cannot be summarised.
pub fn get_breakdown(date_range: DateRange, database: &Database) -> Result<Breakdown, Error> {
    let totals = fetch_expense_summary(date_range.start_date, date_range.end_date, database)?;

    Ok(category_breakdown(&totals))
}

/// A route handler that returns the total and percentage spent per category.
pub async fn get_analytics_endpoint(
    State(state): State<AnalyticsState>,
    Json(date_range): Json<DateRange>,
) -> Result<Json<Breakdown>, Error> {
    get_breakdown(date_range, &state.database).map(Json)
}

#[cfg(test)]
mod tests {
    use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        analytics::{
            CategoryBreakdown,
            endpoint::{AnalyticsState, DateRange, get_analytics_endpoint},
        },
        expense::{Expense, insert_expense},
        test_utils::get_test_database,
    };

    #[tokio::test]
    async fn returns_breakdown_for_range() {
        let (_dir, database) = get_test_database();
        for expense in [
            Expense::new(date!(2024 - 08 - 02), 10.0, "Food"),
            Expense::new(date!(2024 - 08 - 02), 5.0, "Food"),
            Expense::new(date!(2024 - 08 - 03), 20.0, "Rent"),
        ] {
            insert_expense(&expense, &database).unwrap();
        }
        let state = AnalyticsState { database };

        let Json(breakdown) = get_analytics_endpoint(
            State(state),
            Json(DateRange {
                start_date: date!(2024 - 08 - 02),
                end_date: date!(2024 - 08 - 03),
            }),
        )
        .await
        .unwrap();

        assert_eq!(
            breakdown["Food"],
            CategoryBreakdown {
                total: 15.0,
                percentage: 42.86
            }
        );
        assert_eq!(
            breakdown["Rent"],
            CategoryBreakdown {
                total: 20.0,
                percentage: 57.14
            }
        );
    }

    #[tokio::test]
    async fn empty_range_returns_empty_breakdown() {
        let (_dir, database) = get_test_database();
        let state = AnalyticsState { database };

        let Json(breakdown) = get_analytics_endpoint(
            State(state),
            Json(DateRange {
                start_date: date!(2024 - 08 - 02),
                end_date: date!(2024 - 08 - 03),
            }),
        )
        .await
        .unwrap();

        assert!(breakdown.is_empty());
    }

    #[tokio::test]
    async fn database_error_is_internal_server_error() {
        let (_dir, database) = get_test_database();
        Connection::open(database.path())
            .unwrap()
            .execute("DROP TABLE expenses", ())
            .unwrap();
        let state = AnalyticsState { database };

        let response = get_analytics_endpoint(
            State(state),
            Json(DateRange {
                start_date: date!(2024 - 08 - 02),
                end_date: date!(2024 - 08 - 03),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn date_range_uses_iso_dates_in_json() {
        let date_range: DateRange =
            serde_json::from_str(r#"{"start_date": "2024-08-02", "end_date": "2024-08-05"}"#)
                .unwrap();

        assert_eq!(
            date_range,
            DateRange {
                start_date: date!(2024 - 08 - 02),
                end_date: date!(2024 - 08 - 05),
            }
        );
    }
}
