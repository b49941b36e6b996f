//! Strict date parsing for the `Date` column.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// A `Date` value that matches none of the accepted formats.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("malformed date {value:?} in input row {line}")]
pub struct MalformedDateError {
    pub line: usize,
    pub value: String,
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a calendar date. Datetime values are truncated to their date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}
