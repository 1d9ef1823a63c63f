use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{ApiError, Result};
use crate::utils::constants::WIRE_DATE_FORMAT;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y%m%d"];
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%d/%m/%Y %H:%M:%S"];

/// A date in any of the shapes callers hand us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLike {
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl From<&str> for DateLike {
    fn from(value: &str) -> Self {
        DateLike::Text(value.to_string())
    }
}

impl From<String> for DateLike {
    fn from(value: String) -> Self {
        DateLike::Text(value)
    }
}

impl From<&String> for DateLike {
    fn from(value: &String) -> Self {
        DateLike::Text(value.clone())
    }
}

impl From<NaiveDate> for DateLike {
    fn from(value: NaiveDate) -> Self {
        DateLike::Date(value)
    }
}

impl From<NaiveDateTime> for DateLike {
    fn from(value: NaiveDateTime) -> Self {
        DateLike::DateTime(value)
    }
}

/// Zoned values keep the calendar date of their own zone.
impl<Tz: TimeZone> From<DateTime<Tz>> for DateLike {
    fn from(value: DateTime<Tz>) -> Self {
        DateLike::DateTime(value.naive_local())
    }
}

/// Calendar date as the API expects it (`YYYY-MM-DD`). Time of day is dropped.
pub fn normalize_date(input: impl Into<DateLike>) -> Result<String> {
    let date = match input.into() {
        DateLike::Date(date) => date,
        DateLike::DateTime(date_time) => date_time.date(),
        DateLike::Text(text) => parse_text(&text)?,
    };
    Ok(date.format(WIRE_DATE_FORMAT).to_string())
}

fn parse_text(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.naive_local().date())
        })
        .ok_or_else(|| ApiError::InvalidDate(text.to_string()))
}
