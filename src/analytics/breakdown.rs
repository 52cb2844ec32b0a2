//! Category breakdown of spending over a date range.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::expense::CategoryTotal;

/// How much was spent in one category and its share of all spending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// The total amount spent in the category.
    pub total: f64,
    /// The category's share of all spending as a percentage, rounded to two
    /// decimal places.
    pub percentage: f64,
}

/// Category breakdowns keyed by category name.
pub type Breakdown = BTreeMap<String, CategoryBreakdown>;

/// Calculate each category's total and share of the grand total.
///
/// Percentages are all zero when the grand total is not positive.
pub fn category_breakdown(totals: &[CategoryTotal]) -> Breakdown {
    let grand_total: f64 = totals.iter().map(|row| row.total).sum();

    totals
        .iter()
        .map(|row| {
            let percentage = if grand_total > 0.0 {
                round_to_cents(row.total / grand_total * 100.0)
            } else {
                0.0
            };

            (
                row.category.clone(),
                CategoryBreakdown {
                    total: row.total,
                    percentage,
                },
            )
        })
        .collect()
}

/// Round to two decimal places, with exact halves going to the even digit.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
