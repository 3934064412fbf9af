//! Typed column extraction from record batches.
//!
//! Capture exports are loose about types: ids arrive as floats, sides as
//! large strings, flags as 0/1 integers. Every accessor casts to the wanted
//! Arrow type first, so callers see one representation.

use crate::error::{Result, StoreError};
use crate::schema::INPUT_ALIASES;
use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

/// Find a column by name, falling back to known input aliases.
pub fn find_column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a ArrayRef> {
    batch.column_by_name(name).or_else(|| {
        INPUT_ALIASES
            .iter()
            .filter(|(canonical, _)| *canonical == name)
            .find_map(|(_, alias)| batch.column_by_name(alias))
    })
}

fn required<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    find_column(batch, name).ok_or_else(|| StoreError::MissingColumn(name.to_string()))
}

fn cast_to(array: &ArrayRef, name: &str, to: &DataType) -> Result<ArrayRef> {
    cast(array.as_ref(), to).map_err(|_| StoreError::ColumnType {
        column: name.to_string(),
        expected: to.to_string(),
    })
}

/// Integer column; floats are truncated toward zero, nulls are rejected.
pub fn i64_column(batch: &RecordBatch, name: &str) -> Result<Vec<i64>> {
    let casted = cast_to(required(batch, name)?, name, &DataType::Int64)?;
    let values = casted
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| StoreError::ColumnType {
            column: name.to_string(),
            expected: "Int64".to_string(),
        })?;
    values
        .iter()
        .enumerate()
        .map(|(row, v)| {
            v.ok_or_else(|| StoreError::NullValue {
                column: name.to_string(),
                row,
            })
        })
        .collect()
}

/// Float column; nulls become NaN.
pub fn f64_column(batch: &RecordBatch, name: &str) -> Result<Vec<f64>> {
    let casted = cast_to(required(batch, name)?, name, &DataType::Float64)?;
    let values = casted
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| StoreError::ColumnType {
            column: name.to_string(),
            expected: "Float64".to_string(),
        })?;
    Ok(values.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// String column; nulls are rejected.
pub fn string_column(batch: &RecordBatch, name: &str) -> Result<Vec<String>> {
    let casted = cast_to(required(batch, name)?, name, &DataType::Utf8)?;
    let values = casted
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| StoreError::ColumnType {
            column: name.to_string(),
            expected: "Utf8".to_string(),
        })?;
    values
        .iter()
        .enumerate()
        .map(|(row, v)| {
            v.map(str::to_string).ok_or_else(|| StoreError::NullValue {
                column: name.to_string(),
                row,
            })
        })
        .collect()
}

/// Boolean column; integer flags are accepted (non-zero is true), nulls are false.
pub fn bool_column(batch: &RecordBatch, name: &str) -> Result<Vec<bool>> {
    let casted = cast_to(required(batch, name)?, name, &DataType::Boolean)?;
    let values = casted
        .as_any()
        .downcast_ref::<BooleanArray>()
        .ok_or_else(|| StoreError::ColumnType {
            column: name.to_string(),
            expected: "Boolean".to_string(),
        })?;
    Ok(values.iter().map(|v| v.unwrap_or(false)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{Field, Schema};
    use std::sync::Arc;

    fn batch() -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("sched_id", DataType::Float64, false),
            Field::new("flag", DataType::Int64, false),
            Field::new("x", DataType::Float64, true),
            Field::new("throws", DataType::LargeUtf8, true),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(Float64Array::from(vec![7.0, 8.0])),
                Arc::new(Int64Array::from(vec![0, 1])),
                Arc::new(Float64Array::from(vec![Some(1.5), None])),
                Arc::new(arrow::array::LargeStringArray::from(vec![Some("R"), None])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_float_ids_coerce_through_alias() {
        assert_eq!(i64_column(&batch(), "schedule_id").unwrap(), vec![7, 8]);
    }

    #[test]
    fn test_integer_flags_become_bools() {
        assert_eq!(bool_column(&batch(), "flag").unwrap(), vec![false, true]);
    }

    #[test]
    fn test_null_floats_are_nan() {
        let x = f64_column(&batch(), "x").unwrap();
        assert_eq!(x[0], 1.5);
        assert!(x[1].is_nan());
    }

    #[test]
    fn test_null_strings_rejected_with_row() {
        let err = string_column(&batch(), "throwing_side").unwrap_err();
        assert!(matches!(err, StoreError::NullValue { row: 1, .. }));
    }

    #[test]
    fn test_missing_column_named() {
        let err = f64_column(&batch(), "time").unwrap_err();
        assert!(matches!(err, StoreError::MissingColumn(ref c) if c == "time"));
    }
}
