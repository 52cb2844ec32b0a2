use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The format of dates in URLs and JSON, e.g. "2024-08-02".
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// A calendar date parsed from a URL path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseDate(pub Date);

impl ExpenseDate {
    /// Parse an ISO 8601 calendar date such as "2024-08-02".
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if `text` is not a valid date.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Date::parse(text, DATE_FORMAT)
            .map(ExpenseDate)
            .map_err(|_| Error::InvalidDate(text.to_owned()))
    }
}
