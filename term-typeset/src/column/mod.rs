//! Named, ordered columns of heterogeneous values.
//!
//! A [`Column`] is the unit the typeset classifies. It is never mutated in place
//! by the engine: coercions build a new column with the same name and length via
//! [`Column::map_values`].

pub mod interop;
pub mod value;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use interop::columns_from_record_batch;
pub use value::{Value, ValueKind};

/// Summary of the physical representation of a column's non-missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// No non-missing values.
    Empty,
    /// Only booleans.
    Boolean,
    /// Only integers and floats.
    Numeric,
    /// Only strings.
    String,
    /// Only dates and datetimes.
    Temporal,
    /// Only lists, tuples and maps.
    Nested,
    /// Anything else.
    Mixed,
}

impl ColumnKind {
    fn of(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Boolean => ColumnKind::Boolean,
            ValueKind::Integer | ValueKind::Float => ColumnKind::Numeric,
            ValueKind::String => ColumnKind::String,
            ValueKind::Date | ValueKind::DateTime => ColumnKind::Temporal,
            ValueKind::Nested => ColumnKind::Nested,
        }
    }
}

/// A named column of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    /// Creates a column from anything convertible into values.
    ///
    /// ```rust
    /// use term_typeset::column::{Column, Value};
    ///
    /// let column = Column::new("flags", [Some("Y"), Some("N"), None]);
    /// assert_eq!(column.len(), 3);
    /// assert_eq!(column.values()[2], Value::Null);
    /// ```
    pub fn new<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a column with no values.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the values that are not missing.
    pub fn non_missing(&self) -> impl Iterator<Item = &Value> + '_ {
        self.values.iter().filter(|v| !v.is_missing())
    }

    /// Number of non-missing values.
    pub fn count(&self) -> usize {
        self.non_missing().count()
    }

    /// Number of missing values.
    pub fn null_count(&self) -> usize {
        self.len() - self.count()
    }

    /// Returns true when the column holds no non-missing value.
    pub fn is_all_missing(&self) -> bool {
        self.non_missing().next().is_none()
    }

    /// Number of distinct non-missing values.
    pub fn n_unique(&self) -> usize {
        self.values
            .iter()
            .filter_map(Value::key)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Physical representation of the non-missing values.
    pub fn kind(&self) -> ColumnKind {
        let mut kinds = self.values.iter().filter_map(Value::kind).map(ColumnKind::of);
        let Some(first) = kinds.next() else {
            return ColumnKind::Empty;
        };
        if kinds.all(|kind| kind == first) {
            first
        } else {
            ColumnKind::Mixed
        }
    }

    /// Builds a new column with the same name by transforming every value.
    ///
    /// Missing values are passed to `f` like any other value; transforms that
    /// should keep them missing must do so explicitly.
    pub fn map_values<F>(&self, f: F) -> Column
    where
        F: FnMut(&Value) -> Value,
    {
        Column {
            name: self.name.clone(),
            values: self.values.iter().map(f).collect(),
        }
    }

    /// Builds a new column with the same name and length, mapping only the
    /// non-missing values; missing entries become `Null`.
    pub fn map_present<F>(&self, mut f: F) -> Column
    where
        F: FnMut(&Value) -> Value,
    {
        self.map_values(|value| {
            if value.is_missing() {
                Value::Null
            } else {
                f(value)
            }
        })
    }
}
