//! Cell values of a profiled column.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single cell of a column.
///
/// Columns are heterogeneous: nothing stops a column from holding integers next
/// to strings, or nested containers. `Null` and a float `NaN` are both treated
/// as the missing marker; infinities are ordinary numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    /// Missing value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A text value.
    Str(String),
    /// A calendar date.
    Date(NaiveDate),
    /// A date and time without timezone.
    DateTime(NaiveDateTime),
    /// A list of values.
    List(Vec<Value>),
    /// A fixed-size tuple of values.
    Tuple(Vec<Value>),
    /// A string-keyed mapping.
    Map(BTreeMap<String, Value>),
}

/// Physical kind of a single non-missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Integer,
    Float,
    String,
    Date,
    DateTime,
    Nested,
}

/// Hashable identity of a non-missing value, used for distinct counts.
///
/// Integral floats share the key of the equal integer so that `1` and `1.0`
/// count once, matching a single float-typed numeric column. Nested values
/// are keyed element by element, with `None` for missing elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
    Bool(bool),
    Int(i64),
    Float(u64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    List(Vec<Option<ValueKey>>),
    Tuple(Vec<Option<ValueKey>>),
    Map(Vec<(String, Option<ValueKey>)>),
}

impl Value {
    /// Returns true for `Null` and float `NaN`.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Physical kind of the value, or `None` when it is missing.
    pub fn kind(&self) -> Option<ValueKind> {
        if self.is_missing() {
            return None;
        }
        Some(match self {
            Value::Bool(_) => ValueKind::Boolean,
            Value::Int(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::String,
            Value::Date(_) => ValueKind::Date,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::List(_) | Value::Tuple(_) | Value::Map(_) => ValueKind::Nested,
            Value::Null => unreachable!("missing values have no kind"),
        })
    }

    /// Numeric value as f64 for `Int` and `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrowed text for `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean payload for `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub(crate) fn key(&self) -> Option<ValueKey> {
        if self.is_missing() {
            return None;
        }
        Some(match self {
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Int(v) => ValueKey::Int(*v),
            Value::Float(v) => {
                if v.is_finite()
                    && v.fract() == 0.0
                    && *v >= i64::MIN as f64
                    && *v < i64::MAX as f64
                {
                    ValueKey::Int(*v as i64)
                } else {
                    ValueKey::Float(v.to_bits())
                }
            }
            Value::Str(s) => ValueKey::Str(s.clone()),
            Value::Date(d) => ValueKey::Date(*d),
            Value::DateTime(dt) => ValueKey::DateTime(*dt),
            Value::List(values) => ValueKey::List(values.iter().map(Value::key).collect()),
            Value::Tuple(values) => ValueKey::Tuple(values.iter().map(Value::key).collect()),
            Value::Map(entries) => ValueKey::Map(
                entries
                    .iter()
                    .map(|(name, value)| (name.clone(), value.key()))
                    .collect(),
            ),
            Value::Null => unreachable!("missing values have no key"),
        })
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => {
                if v.is_nan() {
                    write!(f, "nan")
                } else if v.is_infinite() {
                    write!(f, "{}", if *v > 0.0 { "inf" } else { "-inf" })
                } else if v.fract() == 0.0 && v.abs() < 1e16 {
                    write!(f, "{v:.1}")
                } else {
                    write!(f, "{v}")
                }
            }
            Value::Str(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::List(values) => {
                write!(f, "[")?;
                write_seq(f, values)?;
                write!(f, "]")
            }
            Value::Tuple(values) => {
                write!(f, "(")?;
                write_seq(f, values)?;
                write!(f, ")")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_markers() {
        assert!(Value::Null.is_missing());
        assert!(Value::Float(f64::NAN).is_missing());
        assert!(!Value::Float(f64::INFINITY).is_missing());
        assert!(!Value::Str(String::new()).is_missing());
        assert_eq!(Value::Float(f64::NAN).kind(), None);
    }

    #[test]
    fn test_integral_float_shares_int_key() {
        assert_eq!(Value::Int(1).key(), Value::Float(1.0).key());
        assert_eq!(Value::Float(-0.0).key(), Value::Int(0).key());
        assert_ne!(Value::Float(1.5).key(), Value::Int(1).key());
        assert_eq!(Value::Null.key(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(
            Value::List(vec![Value::Int(1), Value::Int(2)]).to_string(),
            "[1, 2]"
        );
        assert_eq!(
            Value::Tuple(vec![Value::Int(1), Value::Int(2)]).to_string(),
            "(1, 2)"
        );

        let mut map = BTreeMap::new();
        map.insert("a".to_string(), Value::from("b"));
        assert_eq!(Value::Map(map).to_string(), "{a: b}");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Str("x".to_string()));
    }
}
