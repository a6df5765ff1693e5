use chrono::{DateTime, Datelike, Utc};

use crate::error::TransformError;

/// Converts an epoch-millis bucket key into a UTC timestamp.
pub fn from_millis(millis: i64) -> Result<DateTime<Utc>, TransformError> {
    DateTime::from_timestamp_millis(millis).ok_or(TransformError::TimestampOutOfRange(millis))
}

/// Plain UTC calendar year of a bucket key. This is not the ISO week-year.
pub fn calendar_year(millis: i64) -> Result<i32, TransformError> {
    Ok(from_millis(millis)?.year())
}

/// ISO-8601 week number (1-53) of a bucket key, evaluated in UTC.
pub fn iso_week_number(millis: i64) -> Result<u32, TransformError> {
    Ok(from_millis(millis)?.iso_week().week())
}
