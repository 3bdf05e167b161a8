//! Coercion of raw form values into typed fields.
//!
//! Every parser distinguishes an absent (or blank) value, returned as
//! `Ok(None)`, from a malformed one, returned as [`CoreError::Validation`].
//! Handlers use the `None` case to fall back to stored values on update.

use chrono::{NaiveDate, NaiveTime};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Trimmed value, or `None` when absent or blank.
pub fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse an integer field such as `price`.
pub fn parse_int(raw: Option<&str>, field: &str) -> Result<Option<i32>, CoreError> {
    let Some(value) = non_blank(raw) else {
        return Ok(None);
    };
    value
        .parse::<i32>()
        .map(Some)
        .map_err(|_| CoreError::Validation(format!("Invalid {field}: expected an integer")))
}

/// Parse a decimal field such as `budget`.
pub fn parse_number(raw: Option<&str>, field: &str) -> Result<Option<f64>, CoreError> {
    let Some(value) = non_blank(raw) else {
        return Ok(None);
    };
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(CoreError::Validation(format!(
            "Invalid {field}: expected a number"
        ))),
    }
}

/// Boolean flag: the literal `"true"` is true, any other non-blank value is false.
pub fn parse_flag(raw: Option<&str>) -> Option<bool> {
    non_blank(raw).map(|value| value == "true")
}

/// Parse a date given either as RFC 3339 or as `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(raw: Option<&str>, field: &str) -> Result<Option<Timestamp>, CoreError> {
    let Some(value) = non_blank(raw) else {
        return Ok(None);
    };
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(&value) {
        return Ok(Some(parsed.with_timezone(&chrono::Utc)));
    }
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map(|date| Some(date.and_time(NaiveTime::MIN).and_utc()))
        .map_err(|_| {
            CoreError::Validation(format!(
                "Invalid {field}: expected YYYY-MM-DD or an RFC 3339 timestamp"
            ))
        })
}

/// Parse a JSON array of record ids such as `developerIds`.
pub fn parse_id_list(raw: Option<&str>, field: &str) -> Result<Option<Vec<DbId>>, CoreError> {
    let Some(value) = non_blank(raw) else {
        return Ok(None);
    };
    serde_json::from_str::<Vec<DbId>>(&value)
        .map(Some)
        .map_err(|_| {
            CoreError::Validation(format!("Invalid {field}: expected a JSON array of ids"))
        })
}
