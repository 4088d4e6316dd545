//! Dataset profiling: a derived, read-only snapshot of basic dataset facts.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::DataSet;

/// Summary statistics for a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetProfile {
    /// `(rows, columns)`.
    pub shape: (usize, usize),
    /// Column names in schema order.
    pub columns: Vec<String>,
    /// Column name → type name (`int64`/`float64`/`bool`/`str`).
    pub dtypes: BTreeMap<String, String>,
    /// Column name → count of missing cells.
    pub missing_values: BTreeMap<String, usize>,
    /// Estimated deep memory footprint in bytes.
    pub memory_usage: usize,
}

/// Profile a dataset. Pure; an empty dataset profiles as shape `(0, 0)`.
pub fn profile(ds: &DataSet) -> DatasetProfile {
    let dtypes = ds
        .schema
        .fields
        .iter()
        .map(|f| (f.name.clone(), f.data_type.name().to_string()))
        .collect();

    let missing_values = ds
        .schema
        .field_names()
        .map(str::to_string)
        .zip(ds.null_counts())
        .collect();

    DatasetProfile {
        shape: ds.shape(),
        columns: ds.column_names(),
        dtypes,
        missing_values,
        memory_usage: ds.memory_usage(),
    }
}

#[cfg(test)]
mod tests {
    use super::profile;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    #[test]
    fn profiles_shape_dtypes_and_missing_counts() {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("label", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Utf8("x".to_string())],
                vec![Value::Null, Value::Utf8("y".to_string())],
                vec![Value::Int64(3), Value::Null],
            ],
        );

        let p = profile(&ds);
        assert_eq!(p.shape, (3, 2));
        assert_eq!(p.columns, vec!["id", "label"]);
        assert_eq!(p.dtypes["id"], "int64");
        assert_eq!(p.dtypes["label"], "str");
        assert_eq!(p.missing_values["id"], 1);
        assert_eq!(p.missing_values["label"], 1);
        assert_eq!(p.memory_usage, ds.memory_usage());
    }

    #[test]
    fn empty_dataset_profiles_cleanly() {
        let p = profile(&DataSet::empty());
        assert_eq!(p.shape, (0, 0));
        assert!(p.columns.is_empty());
        assert_eq!(p.memory_usage, 0);
    }
}
