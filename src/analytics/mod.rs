//! Spending analytics.
//!
//! Summarises expenses over a date range into per-category totals and
//! percentages, served as JSON and used by the dashboard charts.

mod breakdown;
mod endpoint;

pub use breakdown::{Breakdown, CategoryBreakdown, category_breakdown};
pub use endpoint::{DateRange, get_analytics_endpoint, get_breakdown};
