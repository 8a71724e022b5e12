//! Common test fixtures for type inference scenarios.
//!
//! The profiling series cover the shapes a column profiler meets in practice:
//! booleans stored as text, numbers stored as text, low-cardinality numbers,
//! nested values and columns with nothing in them. Tests, benchmarks and
//! downstream crates share them to pin inference behaviour.

use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use chrono::{NaiveDate, NaiveDateTime};

use crate::column::{Column, Value};

const NAN: f64 = f64::NAN;

fn date(y: i32, m: u32, d: u32) -> Value {
    NaiveDate::from_ymd_opt(y, m, d).map_or(Value::Null, Value::Date)
}

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> Value {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|day| day.and_hms_opt(h, min, 0))
        .map_or(Value::Null, |dt: NaiveDateTime| Value::DateTime(dt))
}

fn pair(a: i64, b: i64) -> Value {
    Value::Tuple(vec![Value::Int(a), Value::Int(b)])
}

/// All profiling fixture columns, in a fixed order.
pub fn profiling_series() -> Vec<Column> {
    let letters = ('b'..='i').map(|c| c.to_string()).chain(["d".to_string()]);

    vec![
        Column::empty("empty"),
        // Boolean
        Column::new("booleans_type", [false, true, true]),
        Column::new(
            "booleans_type_nan",
            [Value::Bool(false), Value::Bool(true), Value::Float(NAN)],
        ),
        Column::new("str_yes_no", ["Y", "N", "Y"]),
        Column::new("str_yes_no_mixed", ["Y", "n", "y"]),
        Column::new(
            "str_yes_no_nan",
            [Value::from("Y"), Value::from("N"), Value::Float(NAN)],
        ),
        Column::new("str_true_false", ["True", "False", "False"]),
        Column::new(
            "str_true_false_nan",
            [Value::from("True"), Value::from("False"), Value::Float(NAN)],
        ),
        Column::new("str_true_false_none", [Some("True"), Some("False"), None]),
        // Numeric
        Column::new("num_with_inf", [1.0, 2.0, 3.0, 6.0, f64::INFINITY]),
        Column::new("integers", [1i64, 0, 0, 0]),
        Column::new("inf_only", [f64::INFINITY]),
        Column::new("integers_nan", [1.0, 0.0, 1.0, 0.0, NAN]),
        // Describe
        Column::new("id", letters),
        Column::new("catnum", (1..100).map(|c| c.to_string())),
        Column::new("x", [50.0, 50.0, -10.0, 0.0, 0.0, 5.0, 15.0, -3.0, NAN]),
        Column::new(
            "y",
            [
                0.000001,
                654.152,
                NAN,
                15.984512,
                3122.0,
                -3.1415926535,
                111.0,
                15.9,
                13.5,
            ],
        ),
        Column::new(
            "cat",
            [
                Some("a"),
                Some("long text value"),
                Some("Élysée"),
                Some(""),
                None,
                Some("some <b> B.s </div> </div> HTML stuff"),
                Some("c"),
                Some("c"),
                Some("c"),
            ],
        ),
        Column::new("s1", [1.0; 9]),
        Column::new("s2", vec!["some constant text $ % value {obj} "; 9]),
        Column::new(
            "somedate",
            [
                date(2011, 7, 4),
                datetime(2022, 1, 1, 13, 57),
                datetime(1990, 12, 9, 0, 0),
                Value::Float(NAN),
                datetime(1990, 12, 9, 0, 0),
                datetime(1950, 12, 9, 0, 0),
                datetime(1898, 1, 2, 0, 0),
                datetime(1950, 12, 9, 0, 0),
                datetime(1950, 12, 9, 0, 0),
            ],
        ),
        Column::new(
            "bool_tf",
            [true, true, false, true, false, true, true, false, true],
        ),
        Column::new(
            "bool_tf_with_nan",
            [
                Value::Bool(true),
                Value::Bool(false),
                Value::Bool(false),
                Value::Bool(false),
                Value::Bool(false),
                Value::Bool(true),
                Value::Bool(true),
                Value::Bool(false),
                Value::Float(NAN),
            ],
        ),
        Column::new("bool_01", [1i64, 1, 0, 1, 1, 0, 0, 0, 1]),
        Column::new(
            "bool_01_with_nan",
            [1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, NAN],
        ),
        Column::new(
            "list",
            (0..9).map(|_| Value::List(vec![Value::Int(1), Value::Int(2)])),
        ),
        Column::new(
            "mixed",
            [
                Value::Int(1),
                Value::Int(2),
                Value::from("a"),
                Value::Int(4),
                Value::Int(5),
                Value::Int(6),
                Value::Int(7),
                Value::Int(8),
                Value::Int(9),
            ],
        ),
        Column::new(
            "dict",
            ('a'..='i').map(|c| {
                Value::Map(BTreeMap::from([(c.to_string(), Value::from(c.to_string()))]))
            }),
        ),
        Column::new("tuple", (0..9).map(|i| pair(2 * i + 1, 2 * i + 2))),
        Column::new("date_str", ["2018-01-01", "2017-02-01", "2018-04-07"]),
        Column::new("nullable_int", [Some(1i64), None]),
    ]
}

/// Looks up a profiling fixture column by name.
pub fn profiling_column(name: &str) -> Option<Column> {
    profiling_series().into_iter().find(|c| c.name() == name)
}

/// Creates a small record batch mixing the Arrow layouts the interop layer reads.
pub fn create_profiling_record_batch() -> Result<RecordBatch, ArrowError> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("score", DataType::Float64, true),
        Field::new("active", DataType::Boolean, true),
        Field::new("answer", DataType::Utf8, true),
        Field::new("amount", DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from((1..=8).collect::<Vec<i64>>())),
        Arc::new(Float64Array::from(vec![
            Some(0.5),
            Some(1.25),
            None,
            Some(3.0),
            Some(4.75),
            Some(5.5),
            Some(6.0),
            Some(7.125),
        ])),
        Arc::new(BooleanArray::from(vec![
            Some(true),
            Some(false),
            None,
            Some(true),
            Some(true),
            Some(false),
            Some(true),
            Some(false),
        ])),
        Arc::new(StringArray::from(vec![
            Some("yes"),
            Some("no"),
            Some("Yes"),
            None,
            Some("NO"),
            Some("y"),
            Some("n"),
            Some("yes"),
        ])),
        Arc::new(StringArray::from(vec![
            Some("10.5"),
            Some("20"),
            Some("30.25"),
            Some("40"),
            None,
            Some("60"),
            Some("70.75"),
            Some("80"),
        ])),
    ];

    RecordBatch::try_new(schema, columns)
}
