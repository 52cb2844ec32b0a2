//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    analytics::get_analytics_endpoint,
    dashboard::{
        get_analytics_page, get_expense_row, get_expenses_page, replace_expenses_form_endpoint,
    },
    endpoints,
    expense::{get_expenses_endpoint, replace_expenses_endpoint},
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            endpoints::EXPENSES_API,
            get(get_expenses_endpoint).post(replace_expenses_endpoint),
        )
        .route(endpoints::ANALYTICS_API, post(get_analytics_endpoint));

    let dashboard_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::EXPENSE_ROW_VIEW, get(get_expense_row))
        .route(endpoints::EXPENSES_FORM, post(replace_expenses_form_endpoint))
        .route(endpoints::ANALYTICS_VIEW, get(get_analytics_page));

    api_routes
        .merge(dashboard_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the expenses page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EXPENSES_VIEW)
}
