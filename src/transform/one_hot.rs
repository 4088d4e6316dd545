//! One-hot encoding step for categorical (string) columns.

use std::collections::BTreeSet;

use crate::error::{PrepError, PrepResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

use super::Transform;

/// Replace every categorical column with one 0/1 indicator column per
/// category observed during fit.
///
/// Categorical columns are discovered automatically (all `Utf8` columns,
/// in schema order); there are no parameters. Output keeps all
/// non-categorical columns first, unchanged and in their original order,
/// followed by indicator columns named `{column}_{category}` with
/// categories sorted. Nulls and categories unseen at fit time encode as
/// all-zero rows rather than failing.
pub struct OneHotEncode {
    /// Per fitted column: sorted category vocabulary.
    vocab: Vec<(String, Vec<String>)>,
    is_fitted: bool,
}

impl OneHotEncode {
    /// Create an unfitted encoder.
    pub fn new() -> Self {
        Self {
            vocab: Vec::new(),
            is_fitted: false,
        }
    }
}

impl Default for OneHotEncode {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for OneHotEncode {
    fn name(&self) -> &'static str {
        "one_hot_encode"
    }

    fn fit(&mut self, ds: &DataSet) -> PrepResult<()> {
        self.vocab.clear();
        for column in ds.columns_where(DataType::is_categorical) {
            let idx = ds
                .schema
                .index_of(&column)
                .ok_or_else(|| PrepError::ColumnNotFound {
                    column: column.clone(),
                })?;

            let categories: BTreeSet<String> = ds
                .rows
                .iter()
                .filter_map(|row| match &row[idx] {
                    Value::Utf8(s) => Some(s.clone()),
                    _ => None,
                })
                .collect();
            self.vocab.push((column, categories.into_iter().collect()));
        }

        self.is_fitted = true;
        Ok(())
    }

    fn apply(&self, ds: &DataSet) -> PrepResult<DataSet> {
        if !self.is_fitted {
            return Err(PrepError::Internal {
                message: "one_hot_encode step applied before fit".to_string(),
            });
        }
        if self.vocab.is_empty() {
            return Ok(ds.clone());
        }

        let encoded_names: Vec<String> = self.vocab.iter().map(|(c, _)| c.clone()).collect();
        let passthrough = ds.drop_columns(&encoded_names);

        let mut fields = Vec::new();
        let mut sources = Vec::new();
        for (column, categories) in &self.vocab {
            let idx = ds
                .schema
                .index_of(column)
                .ok_or_else(|| PrepError::ColumnNotFound {
                    column: column.clone(),
                })?;
            sources.push((idx, categories));
            for category in categories {
                fields.push(Field::new(format!("{column}_{category}"), DataType::Int64));
            }
        }

        let rows = ds
            .rows
            .iter()
            .map(|row| {
                let mut out = Vec::with_capacity(fields.len());
                for (idx, categories) in &sources {
                    let observed = match &row[*idx] {
                        Value::Utf8(s) => Some(s.as_str()),
                        // Null or unseen: all-zero indicator row.
                        _ => None,
                    };
                    for category in categories.iter() {
                        let hit = observed == Some(category.as_str());
                        out.push(Value::Int64(i64::from(hit)));
                    }
                }
                out
            })
            .collect();

        let indicators = DataSet::new(Schema::new(fields), rows);
        passthrough.hstack(&indicators)
    }
}

#[cfg(test)]
mod tests {
    use super::OneHotEncode;
    use crate::transform::Transform;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("n", DataType::Int64),
            Field::new("color", DataType::Utf8),
            Field::new("size", DataType::Utf8),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![
                    Value::Int64(1),
                    Value::Utf8("red".to_string()),
                    Value::Utf8("s".to_string()),
                ],
                vec![
                    Value::Int64(2),
                    Value::Utf8("blue".to_string()),
                    Value::Utf8("m".to_string()),
                ],
                vec![Value::Int64(3), Value::Utf8("red".to_string()), Value::Null],
            ],
        )
    }

    #[test]
    fn encodes_all_categorical_columns_with_sorted_vocab() {
        let out = OneHotEncode::new().fit_apply(&dataset()).unwrap();
        assert_eq!(
            out.column_names(),
            vec!["n", "color_blue", "color_red", "size_m", "size_s"]
        );
        assert_eq!(out.row_count(), 3);

        // Row 0: red, s
        assert_eq!(out.rows[0][1], Value::Int64(0));
        assert_eq!(out.rows[0][2], Value::Int64(1));
        assert_eq!(out.rows[0][4], Value::Int64(1));
        // Null encodes as all zeros.
        assert_eq!(out.rows[2][3], Value::Int64(0));
        assert_eq!(out.rows[2][4], Value::Int64(0));
        // Numeric column unchanged and first.
        assert_eq!(out.rows[2][0], Value::Int64(3));
    }

    #[test]
    fn unseen_category_at_apply_time_encodes_as_zeros() {
        let ds = dataset();
        let mut step = OneHotEncode::new();
        step.fit(&ds).unwrap();

        let mut later = ds.clone();
        later.rows[0][1] = Value::Utf8("green".to_string());
        let out = step.apply(&later).unwrap();
        assert_eq!(out.rows[0][1], Value::Int64(0)); // color_blue
        assert_eq!(out.rows[0][2], Value::Int64(0)); // color_red
    }

    #[test]
    fn dataset_without_categorical_columns_is_unchanged() {
        let schema = Schema::new(vec![Field::new("n", DataType::Int64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Int64(1)]]);
        let out = OneHotEncode::new().fit_apply(&ds).unwrap();
        assert_eq!(out, ds);
    }

    #[test]
    fn apply_before_fit_is_an_error() {
        assert!(OneHotEncode::new().apply(&dataset()).is_err());
    }
}
