//! Representation transforms applied by relations.
//!
//! Every transform keeps the column name and length and leaves missing values
//! missing. Values that cannot be converted become missing as well, but the
//! built-in relations only run a transform after their predicate has checked
//! that every value converts.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::column::{Column, Value};

/// Pattern matching utilities for date and datetime strings
struct DatePatterns {
    date_iso: Regex,
    date_us: Regex,
    date_eu: Regex,
    datetime_iso: Regex,
}

static DATE_PATTERNS: Lazy<DatePatterns> = Lazy::new(|| DatePatterns {
    date_iso: Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"),
    date_us: Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("valid date regex"),
    date_eu: Regex::new(r"^\d{1,2}\.\d{1,2}\.\d{4}$").expect("valid date regex"),
    datetime_iso: Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}")
        .expect("valid datetime regex"),
});

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a number the way a float cast would: surrounding whitespace is
/// ignored and `inf`/`nan` are accepted. Integers stay integers.
pub fn parse_number(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(Value::Int(v));
    }
    trimmed.parse::<f64>().ok().map(Value::Float)
}

/// Parses ISO, US (`MM/DD/YYYY`) and EU (`DD.MM.YYYY`) dates and ISO or
/// RFC 3339 datetimes.
pub fn parse_datetime(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    let patterns = &*DATE_PATTERNS;

    if patterns.date_iso.is_match(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .map(Value::Date);
    }
    if patterns.date_us.is_match(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%m/%d/%Y")
            .ok()
            .map(Value::Date);
    }
    if patterns.date_eu.is_match(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%d.%m.%Y")
            .ok()
            .map(Value::Date);
    }
    if patterns.datetime_iso.is_match(trimmed) {
        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Some(Value::DateTime(dt));
            }
        }
        return DateTime::parse_from_rfc3339(trimmed)
            .ok()
            .map(|dt| Value::DateTime(dt.naive_utc()));
    }
    None
}

/// Renders every value as text (numeric to categorical).
pub fn to_category(column: &Column) -> Column {
    column.map_present(|value| Value::Str(value.to_string()))
}

/// Parses textual numbers (categorical to numeric).
pub fn string_to_numeric(column: &Column) -> Column {
    column.map_present(|value| {
        value
            .as_str()
            .and_then(parse_number)
            .unwrap_or(Value::Null)
    })
}

/// Maps boolean vocabulary through `mappings`, case-insensitively.
pub fn string_to_bool(column: &Column, mappings: &BTreeMap<String, bool>) -> Column {
    column.map_present(|value| {
        value
            .as_str()
            .and_then(|text| mappings.get(&text.to_lowercase()))
            .map_or(Value::Null, |b| Value::Bool(*b))
    })
}

/// Parses date and datetime strings.
pub fn string_to_datetime(column: &Column) -> Column {
    column.map_present(|value| {
        value
            .as_str()
            .and_then(parse_datetime)
            .unwrap_or(Value::Null)
    })
}
