//! The page showing where the money went over a date range.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, Duration};

use crate::{
    analytics::{Breakdown, DateRange, get_breakdown},
    dashboard::{
        DashboardState,
        charts::{DashboardChart, ECHARTS_URL, category_totals_chart, charts_script, charts_view},
        tables::breakdown_table,
        today,
    },
    endpoints,
    expense::ExpenseDate,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, base, link,
    },
    internal_server_error::InternalServerError,
    navigation::NavBar,
};

/// How many days before today the default date range starts.
const DEFAULT_RANGE_DAYS: i64 = 7;

/// The query parameters for the analytics page.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// The first day to include, e.g. "2024-08-01". Defaults to a week ago.
    pub start_date: Option<String>,
    /// The last day to include, e.g. "2024-08-07". Defaults to today.
    pub end_date: Option<String>,
}

/// Display the category breakdown for the date range in the query string.
pub async fn get_analytics_page(
    State(state): State<DashboardState>,
    Query(query): Query<AnalyticsQuery>,
) -> Response {
    let today = match today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => {
            tracing::error!("could not get today's date: {error}");
            return InternalServerError::default().into_response();
        }
    };

    let date_range = DateRange {
        start_date: parse_or(
            query.start_date.as_deref(),
            today - Duration::days(DEFAULT_RANGE_DAYS),
        ),
        end_date: parse_or(query.end_date.as_deref(), today),
    };

    match get_breakdown(date_range, &state.database) {
        Ok(breakdown) => analytics_view(date_range, &breakdown).into_response(),
        Err(_) => InternalServerError {
            description: "Could not load analytics",
            fix: "Try again later or check the server logs",
        }
        .into_response(),
    }
}

/// Parse `text` as a date, falling back to `default` if it is missing or invalid.
fn parse_or(text: Option<&str>, default: Date) -> Date {
    match text.map(ExpenseDate::parse) {
        Some(Ok(ExpenseDate(date))) => date,
        Some(Err(error)) => {
            tracing::warn!("{error}, using {default} instead");
            default
        }
        None => default,
    }
}

fn analytics_view(date_range: DateRange, breakdown: &Breakdown) -> Markup {
    let nav_bar = NavBar::new(endpoints::ANALYTICS_VIEW).into_html();

    let charts = [DashboardChart {
        id: "category-totals-chart",
        options: category_totals_chart(breakdown).to_string(),
    }];

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            form
                method="get"
                action=(endpoints::ANALYTICS_VIEW)
                class="w-full max-w-3xl grid grid-cols-1 md:grid-cols-3 gap-4 items-end mb-8"
            {
                div
                {
                    label for="start_date" class=(FORM_LABEL_STYLE) { "Start Date" }

                    input
                        id="start_date"
                        name="start_date"
                        type="date"
                        value=(date_range.start_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="end_date" class=(FORM_LABEL_STYLE) { "End Date" }

                    input
                        id="end_date"
                        name="end_date"
                        type="date"
                        value=(date_range.end_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Get Analytics" }
            }

            @if breakdown.is_empty() {
                h2 class="text-xl font-bold" { "Nothing here yet..." }

                p
                {
                    "There are no expenses between " (date_range.start_date)
                    " and " (date_range.end_date) ". You can add expenses on the "
                    (link(endpoints::EXPENSES_VIEW, "Add/Update")) " page."
                }
            } @else {
                div class="w-full max-w-screen-xl"
                {
                    (charts_view(&charts))
                    (breakdown_table(breakdown))
                }
            }
        }
    );

    let scripts = if breakdown.is_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
            charts_script(&charts),
        ]
    };

    base("Analytics", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use axum_extra::extract::Query;
    use scraper::{Html, Selector};
    use time::{Duration, OffsetDateTime, macros::date};

    use crate::{
        dashboard::DashboardState,
        db::Database,
        expense::{Expense, insert_expense},
        test_utils::{assert_status_ok, assert_valid_html, get_test_database, parse_html_document},
    };

    use super::{AnalyticsQuery, get_analytics_page};

    fn get_state(database: Database) -> DashboardState {
        DashboardState {
            database,
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn query(start_date: &str, end_date: &str) -> Query<AnalyticsQuery> {
        Query(AnalyticsQuery {
            start_date: Some(start_date.to_owned()),
            end_date: Some(end_date.to_owned()),
        })
    }

    fn input_value(html: &Html, name: &str) -> Option<String> {
        html.select(&Selector::parse(&format!("input[name='{name}']")).unwrap())
            .next()
            .and_then(|input| input.value().attr("value"))
            .map(str::to_owned)
    }

    #[tokio::test]
    async fn shows_chart_and_table() {
        let (_dir, database) = get_test_database();
        insert_expense(&Expense::new(date!(2024 - 08 - 02), 10.0, "Food"), &database).unwrap();
        insert_expense(&Expense::new(date!(2024 - 08 - 02), 5.0, "Food"), &database).unwrap();
        insert_expense(&Expense::new(date!(2024 - 08 - 03), 20.0, "Rent"), &database).unwrap();

        let response =
            get_analytics_page(State(get_state(database)), query("2024-08-01", "2024-08-05"))
                .await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        assert!(
            html.select(&Selector::parse("#category-totals-chart").unwrap())
                .next()
                .is_some(),
            "Chart with id 'category-totals-chart' not found"
        );

        let percentages: Vec<String> = html
            .select(&Selector::parse("tbody td:nth-child(3)").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(percentages, vec!["42.86%", "57.14%"]);
    }

    #[tokio::test]
    async fn shows_prompt_text_on_no_data() {
        let (_dir, database) = get_test_database();

        let response =
            get_analytics_page(State(get_state(database)), query("2024-08-01", "2024-08-05"))
                .await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert!(html.select(&Selector::parse("table").unwrap()).next().is_none());
        let heading = html
            .select(&Selector::parse("h2").unwrap())
            .next()
            .expect("No heading found");
        assert_eq!(heading.text().collect::<String>(), "Nothing here yet...");
    }

    #[tokio::test]
    async fn defaults_to_last_week() {
        let (_dir, database) = get_test_database();

        let response =
            get_analytics_page(State(get_state(database)), Query(AnalyticsQuery::default()))
                .await;

        let html = parse_html_document(response).await;
        let today = OffsetDateTime::now_utc().date();
        let end_date = input_value(&html, "end_date").expect("No end date found");
        let start_date = input_value(&html, "start_date").expect("No start date found");

        // Allow for the test running across midnight.
        let want_end = [today, today - Duration::days(1)].map(|date| date.to_string());
        assert!(want_end.contains(&end_date), "got {end_date}");
        let want_start = [today - Duration::days(7), today - Duration::days(8)]
            .map(|date| date.to_string());
        assert!(want_start.contains(&start_date), "got {start_date}");
    }

    #[tokio::test]
    async fn invalid_date_uses_default() {
        let (_dir, database) = get_test_database();

        let response =
            get_analytics_page(State(get_state(database)), query("yesterday", "2024-08-05"))
                .await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_eq!(input_value(&html, "end_date").as_deref(), Some("2024-08-05"));
        assert_ne!(input_value(&html, "start_date").as_deref(), Some("yesterday"));
    }
}
