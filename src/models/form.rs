//! Parsing helpers for urlencoded form fields.
//!
//! HTML forms submit every field as text, and an untouched optional input
//! arrives as an empty string. These helpers turn that into typed values.

use chrono::NaiveDate;

use crate::error::FormError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trimmed value, or `None` when absent or blank.
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn required_text(raw: Option<&str>, field: &'static str) -> Result<String, FormError> {
    optional_text(raw).ok_or(FormError::Missing(field))
}

pub fn optional_date(raw: Option<&str>, field: &'static str) -> Result<Option<NaiveDate>, FormError> {
    optional_text(raw)
        .map(|value| {
            NaiveDate::parse_from_str(&value, DATE_FORMAT)
                .map_err(|_| FormError::InvalidDate { field, value })
        })
        .transpose()
}

pub fn optional_number(raw: Option<&str>, field: &'static str) -> Result<Option<i32>, FormError> {
    optional_text(raw)
        .map(|value| {
            value
                .parse::<i32>()
                .map_err(|_| FormError::InvalidNumber { field, value })
        })
        .transpose()
}

pub fn required_id(raw: Option<&str>, field: &'static str) -> Result<i64, FormError> {
    let value = required_text(raw, field)?;
    value
        .parse::<i64>()
        .map_err(|_| FormError::InvalidNumber { field, value })
}
