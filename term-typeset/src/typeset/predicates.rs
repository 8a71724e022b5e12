//! Column predicates shared by the built-in semantic types and relations.
//!
//! All predicates ignore missing values and are false for columns without any
//! non-missing value.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::column::{Column, ColumnKind};
use crate::typeset::coercion::{parse_datetime, parse_number};

static ABSOLUTE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/|[A-Za-z]:[\\/]|\\\\)").expect("valid path regex"));

pub fn is_boolean(column: &Column) -> bool {
    column.kind() == ColumnKind::Boolean
}

pub fn is_numeric(column: &Column) -> bool {
    column.kind() == ColumnKind::Numeric
}

pub fn is_string(column: &Column) -> bool {
    column.kind() == ColumnKind::String
}

pub fn is_temporal(column: &Column) -> bool {
    column.kind() == ColumnKind::Temporal
}

/// A numeric column with between 1 and `threshold` distinct values.
///
/// A threshold of zero never matches.
pub fn numeric_is_category(column: &Column, threshold: usize) -> bool {
    let n_unique = column.n_unique();
    n_unique >= 1 && n_unique <= threshold
}

/// A string column whose values all parse as numbers, not all of them NaN,
/// that would not itself be categorical once parsed.
pub fn string_is_numeric(column: &Column, threshold: usize) -> bool {
    if !is_string(column) {
        return false;
    }
    let mut parsed = Vec::with_capacity(column.len());
    for value in column.non_missing() {
        match value.as_str().and_then(parse_number) {
            Some(number) => parsed.push(number),
            None => return false,
        }
    }
    let parsed = Column::new(column.name(), parsed);
    !parsed.is_all_missing() && !numeric_is_category(&parsed, threshold)
}

/// A string column whose values, lowercased, all belong to the boolean vocabulary.
pub fn string_is_bool(column: &Column, mappings: &BTreeMap<String, bool>) -> bool {
    is_string(column)
        && column.non_missing().all(|value| {
            value
                .as_str()
                .map_or(false, |text| mappings.contains_key(&text.to_lowercase()))
        })
}

/// A string column whose values all parse as dates or datetimes.
pub fn string_is_datetime(column: &Column) -> bool {
    is_string(column)
        && column
            .non_missing()
            .all(|value| value.as_str().and_then(parse_datetime).is_some())
}

/// A string column of absolute URLs with both a scheme and a host.
pub fn string_is_url(column: &Column) -> bool {
    is_string(column)
        && column.non_missing().all(|value| {
            value
                .as_str()
                .and_then(|text| Url::parse(text).ok())
                .map_or(false, |url| !url.scheme().is_empty() && url.has_host())
        })
}

/// A string column of absolute file system paths (POSIX, drive letter or UNC).
pub fn string_is_path(column: &Column) -> bool {
    is_string(column)
        && column.non_missing().all(|value| {
            value
                .as_str()
                .map_or(false, |text| ABSOLUTE_PATH.is_match(text))
        })
}
