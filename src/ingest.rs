//! Conversion between JSON records and a typed [`DataSet`].
//!
//! Input is an array of flat JSON objects. Unlike file ingestion with a
//! user-provided schema, the schema here is inferred from the records
//! themselves: column order is first-seen key order, and each column's type
//! is the narrowest [`DataType`] that fits every non-null value.
//!
//! Absent keys are treated as missing values, not errors, so ragged records
//! are accepted. Nested objects and arrays are rejected.

use serde_json::Value as JsonValue;

use crate::error::{PrepError, PrepResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

#[derive(Default)]
struct ColumnProfile {
    saw_int: bool,
    saw_float: bool,
    saw_bool: bool,
    saw_str: bool,
}

impl ColumnProfile {
    fn observe(&mut self, v: &JsonValue) {
        match v {
            JsonValue::Null => {}
            JsonValue::Bool(_) => self.saw_bool = true,
            JsonValue::Number(n) => {
                // Integers that fit i64 stay integral; everything else
                // (fractions, u64 overflow) widens the column to float.
                if n.as_i64().is_some() {
                    self.saw_int = true;
                } else {
                    self.saw_float = true;
                }
            }
            JsonValue::String(_) => self.saw_str = true,
            JsonValue::Array(_) | JsonValue::Object(_) => {
                // Checked before observe(); unreachable by construction.
            }
        }
    }

    fn resolve(&self) -> DataType {
        let numeric = self.saw_int || self.saw_float;
        if self.saw_str || (self.saw_bool && numeric) {
            // Mixed scalar types collapse to string, the closest analog of a
            // pandas "object" column.
            DataType::Utf8
        } else if self.saw_float {
            DataType::Float64
        } else if self.saw_int {
            DataType::Int64
        } else if self.saw_bool {
            DataType::Bool
        } else {
            // Entirely-null column: all-NaN convention.
            DataType::Float64
        }
    }
}

/// Build a [`DataSet`] from JSON records, inferring the schema.
pub fn dataset_from_records(records: &[JsonValue]) -> PrepResult<DataSet> {
    if records.is_empty() {
        return Ok(DataSet::empty());
    }

    // First pass: discover columns (first-seen order) and profile types.
    let mut names: Vec<String> = Vec::new();
    let mut profiles: Vec<ColumnProfile> = Vec::new();

    for (idx0, record) in records.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = record
            .as_object()
            .ok_or_else(|| PrepError::MalformedRecord {
                row: row_num,
                message: "expected a json object".to_string(),
            })?;

        for (key, v) in obj {
            if v.is_object() || v.is_array() {
                return Err(PrepError::MalformedRecord {
                    row: row_num,
                    message: format!("nested value under key '{key}' is not supported"),
                });
            }
            let col = match names.iter().position(|n| n == key) {
                Some(i) => i,
                None => {
                    names.push(key.clone());
                    profiles.push(ColumnProfile::default());
                    names.len() - 1
                }
            };
            profiles[col].observe(v);
        }
    }

    let schema = Schema::new(
        names
            .iter()
            .zip(profiles.iter())
            .map(|(name, profile)| Field::new(name.clone(), profile.resolve()))
            .collect(),
    );

    // Second pass: convert cells, filling absent keys with nulls.
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(records.len());
    for record in records {
        let obj = record.as_object().ok_or_else(|| PrepError::Internal {
            message: "record shape changed between passes".to_string(),
        })?;
        let row = schema
            .fields
            .iter()
            .map(|field| convert_cell(obj.get(&field.name), field.data_type))
            .collect();
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}

/// Emit up to `limit` rows of `ds` as JSON objects keyed by column name.
pub fn records_from_dataset(
    ds: &DataSet,
    limit: usize,
) -> Vec<serde_json::Map<String, JsonValue>> {
    let names = ds.column_names();
    ds.rows
        .iter()
        .take(limit)
        .map(|row| {
            names
                .iter()
                .cloned()
                .zip(row.iter().map(value_to_json))
                .collect()
        })
        .collect()
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Int64(v) => JsonValue::from(*v),
        Value::Float64(v) => serde_json::Number::from_f64(*v)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Bool(v) => JsonValue::from(*v),
        Value::Utf8(s) => JsonValue::from(s.clone()),
    }
}

fn convert_cell(v: Option<&JsonValue>, data_type: DataType) -> Value {
    let Some(v) = v else {
        return Value::Null;
    };
    if v.is_null() {
        return Value::Null;
    }

    match data_type {
        DataType::Utf8 => match v {
            JsonValue::String(s) => Value::Utf8(s.clone()),
            // Stringify the minority scalars of a mixed column.
            other => Value::Utf8(other.to_string()),
        },
        DataType::Float64 => v.as_f64().map(Value::Float64).unwrap_or(Value::Null),
        DataType::Int64 => v.as_i64().map(Value::Int64).unwrap_or(Value::Null),
        DataType::Bool => v.as_bool().map(Value::Bool).unwrap_or(Value::Null),
    }
}
