//! Date parameter parsing and defaults.
//!
//! Two formats appear on the wire: `YYYY-MM` for the historical endpoint
//! and `YYYY-MM-DD` everywhere else. Parse failures carry the fixed
//! client-facing message for a 422 response. Defaults are computed per
//! request, never frozen at startup.

use chrono::{Datelike, Days, Local, NaiveDate};

use crate::error::ApiError;

pub const INVALID_MONTH: &str = "Invalid Date format. Expected YYYY-MM";
pub const INVALID_DAY: &str = "Invalid Date format. Expected YYYY-MM-DD";

/// Parses a `YYYY-MM` string, pinned to the first of the month.
pub fn parse_month(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map_err(|_| ApiError::UnprocessableEntity(INVALID_MONTH.to_string()))
}

/// Parses a `YYYY-MM-DD` string.
pub fn parse_day(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::UnprocessableEntity(INVALID_DAY.to_string()))
}

/// Default month for `/historical/{currency}`: the current year-month.
pub fn current_month() -> NaiveDate {
    let today = Local::now().date_naive();
    today.with_day(1).unwrap_or(today)
}

/// Default day for the archive endpoints: yesterday.
pub fn yesterday() -> NaiveDate {
    Local::now().date_naive() - Days::new(1)
}
