//! Building columns from Arrow arrays and record batches.

use arrow::array::{
    Array, BooleanArray, Date32Array, Date64Array, Float32Array, Float64Array, Int16Array,
    Int32Array, Int64Array, Int8Array, LargeListArray, LargeStringArray, ListArray, StringArray,
    StringViewArray, TimestampMicrosecondArray, TimestampMillisecondArray,
    TimestampNanosecondArray, TimestampSecondArray, UInt16Array, UInt32Array, UInt64Array,
    UInt8Array,
};
use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::RecordBatch;

use super::{Column, Value};
use crate::error::{Result, TypesetError};

macro_rules! collect_values {
    ($array:expr, $ty:ty, |$arr:ident, $i:ident| $convert:expr) => {{
        let $arr = $array
            .as_any()
            .downcast_ref::<$ty>()
            .ok_or_else(|| TypesetError::UnsupportedArrowType(format!("{:?}", $array.data_type())))?;
        (0..$arr.len())
            .map(|$i| {
                if $arr.is_null($i) {
                    Value::Null
                } else {
                    $convert
                }
            })
            .collect::<Vec<Value>>()
    }};
}

impl Column {
    /// Builds a column from an Arrow array.
    ///
    /// Arrow nulls become [`Value::Null`]. Timestamps are taken as naive
    /// datetimes regardless of any attached timezone. List arrays become
    /// [`Value::List`] cells, recursively.
    ///
    /// ```rust
    /// use arrow::array::Int64Array;
    /// use term_typeset::column::{Column, Value};
    ///
    /// let array = Int64Array::from(vec![Some(1), None]);
    /// let column = Column::from_arrow("id", &array).unwrap();
    /// assert_eq!(column.values(), &[Value::Int(1), Value::Null]);
    /// ```
    pub fn from_arrow(name: impl Into<String>, array: &dyn Array) -> Result<Column> {
        Ok(Column {
            name: name.into(),
            values: array_values(array)?,
        })
    }
}

/// Builds one column per field of a record batch, named after the schema.
pub fn columns_from_record_batch(batch: &RecordBatch) -> Result<Vec<Column>> {
    let schema = batch.schema();
    schema
        .fields()
        .iter()
        .zip(batch.columns())
        .map(|(field, array)| Column::from_arrow(field.name().clone(), array.as_ref()))
        .collect()
}

fn array_values(array: &dyn Array) -> Result<Vec<Value>> {
    let values = match array.data_type() {
        DataType::Null => vec![Value::Null; array.len()],
        DataType::Boolean => collect_values!(array, BooleanArray, |a, i| Value::Bool(a.value(i))),
        DataType::Int8 => collect_values!(array, Int8Array, |a, i| Value::Int(a.value(i) as i64)),
        DataType::Int16 => {
            collect_values!(array, Int16Array, |a, i| Value::Int(a.value(i) as i64))
        }
        DataType::Int32 => {
            collect_values!(array, Int32Array, |a, i| Value::Int(a.value(i) as i64))
        }
        DataType::Int64 => collect_values!(array, Int64Array, |a, i| Value::Int(a.value(i))),
        DataType::UInt8 => {
            collect_values!(array, UInt8Array, |a, i| Value::Int(a.value(i) as i64))
        }
        DataType::UInt16 => {
            collect_values!(array, UInt16Array, |a, i| Value::Int(a.value(i) as i64))
        }
        DataType::UInt32 => {
            collect_values!(array, UInt32Array, |a, i| Value::Int(a.value(i) as i64))
        }
        DataType::UInt64 => collect_values!(array, UInt64Array, |a, i| {
            let v = a.value(i);
            i64::try_from(v).map_or(Value::Float(v as f64), Value::Int)
        }),
        DataType::Float32 => {
            collect_values!(array, Float32Array, |a, i| Value::Float(a.value(i) as f64))
        }
        DataType::Float64 => {
            collect_values!(array, Float64Array, |a, i| Value::Float(a.value(i)))
        }
        DataType::Utf8 => {
            collect_values!(array, StringArray, |a, i| Value::Str(a.value(i).to_string()))
        }
        DataType::LargeUtf8 => collect_values!(array, LargeStringArray, |a, i| Value::Str(
            a.value(i).to_string()
        )),
        DataType::Utf8View => collect_values!(array, StringViewArray, |a, i| Value::Str(
            a.value(i).to_string()
        )),
        DataType::Date32 => collect_values!(array, Date32Array, |a, i| a
            .value_as_date(i)
            .map_or(Value::Null, Value::Date)),
        DataType::Date64 => collect_values!(array, Date64Array, |a, i| a
            .value_as_datetime(i)
            .map_or(Value::Null, |dt| Value::Date(dt.date()))),
        DataType::Timestamp(TimeUnit::Second, _) => {
            collect_values!(array, TimestampSecondArray, |a, i| a
                .value_as_datetime(i)
                .map_or(Value::Null, Value::DateTime))
        }
        DataType::Timestamp(TimeUnit::Millisecond, _) => {
            collect_values!(array, TimestampMillisecondArray, |a, i| a
                .value_as_datetime(i)
                .map_or(Value::Null, Value::DateTime))
        }
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            collect_values!(array, TimestampMicrosecondArray, |a, i| a
                .value_as_datetime(i)
                .map_or(Value::Null, Value::DateTime))
        }
        DataType::Timestamp(TimeUnit::Nanosecond, _) => {
            collect_values!(array, TimestampNanosecondArray, |a, i| a
                .value_as_datetime(i)
                .map_or(Value::Null, Value::DateTime))
        }
        DataType::List(_) => {
            let list = array
                .as_any()
                .downcast_ref::<ListArray>()
                .ok_or_else(|| TypesetError::UnsupportedArrowType(format!("{:?}", array.data_type())))?;
            let mut values = Vec::with_capacity(list.len());
            for i in 0..list.len() {
                if list.is_null(i) {
                    values.push(Value::Null);
                } else {
                    values.push(Value::List(array_values(list.value(i).as_ref())?));
                }
            }
            values
        }
        DataType::LargeList(_) => {
            let list = array
                .as_any()
                .downcast_ref::<LargeListArray>()
                .ok_or_else(|| TypesetError::UnsupportedArrowType(format!("{:?}", array.data_type())))?;
            let mut values = Vec::with_capacity(list.len());
            for i in 0..list.len() {
                if list.is_null(i) {
                    values.push(Value::Null);
                } else {
                    values.push(Value::List(array_values(list.value(i).as_ref())?));
                }
            }
            values
        }
        other => return Err(TypesetError::UnsupportedArrowType(format!("{other:?}"))),
    };
    Ok(values)
}
