//! Core tabular data model.
//!
//! Request handlers ingest JSON records into an in-memory [`DataSet`] (a
//! [`Schema`] plus row-major [`Value`] storage), and every operation in this
//! crate — profiling, splitting, transform pipelines — works on that type.

use crate::error::{PrepError, PrepResult};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

impl DataType {
    /// Whether this type participates in numeric operations (scaling).
    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }

    /// Whether this type is treated as categorical (one-hot candidates).
    ///
    /// Only strings are categorical; booleans pass through transforms
    /// unchanged, like pandas' non-"object" dtypes.
    pub fn is_categorical(self) -> bool {
        matches!(self, DataType::Utf8)
    }

    /// Type name as reported in dataset profiles.
    pub fn name(self) -> &'static str {
        match self {
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::Bool => "bool",
            DataType::Utf8 => "str",
        }
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// An ordered list of typed fields describing the columns of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed cell in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Whether this value is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`]
/// fields. Every operation returns a new dataset; nothing mutates in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            schema: Schema::new(Vec::new()),
            rows: Vec::new(),
        }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// `(rows, columns)` shape tuple.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<String> {
        self.schema.field_names().map(str::to_string).collect()
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Drop every row that contains a [`Value::Null`] in any column.
    pub fn drop_null_rows(&self) -> Self {
        self.filter_rows(|row| !row.iter().any(Value::is_null))
    }

    /// Create a new dataset from the rows at `indices`, in the given order.
    pub fn take_rows(&self, indices: &[usize]) -> PrepResult<Self> {
        let mut rows = Vec::with_capacity(indices.len());
        for &i in indices {
            let row = self.rows.get(i).ok_or_else(|| PrepError::Internal {
                message: format!("row index {i} out of range for {} rows", self.row_count()),
            })?;
            rows.push(row.clone());
        }
        Ok(Self {
            schema: self.schema.clone(),
            rows,
        })
    }

    /// Select the named columns, in the given order.
    pub fn select_columns(&self, names: &[&str]) -> PrepResult<Self> {
        let indices: Vec<usize> = names
            .iter()
            .map(|name| {
                self.schema
                    .index_of(name)
                    .ok_or_else(|| PrepError::ColumnNotFound {
                        column: (*name).to_string(),
                    })
            })
            .collect::<PrepResult<_>>()?;

        let fields = indices
            .iter()
            .map(|&i| self.schema.fields[i].clone())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(Self {
            schema: Schema::new(fields),
            rows,
        })
    }

    /// Names of the columns whose type matches `predicate`, in schema order.
    pub fn columns_where<F>(&self, predicate: F) -> Vec<String>
    where
        F: Fn(DataType) -> bool,
    {
        self.schema
            .fields
            .iter()
            .filter(|f| predicate(f.data_type))
            .map(|f| f.name.clone())
            .collect()
    }

    /// Drop the named columns, keeping the rest in schema order.
    ///
    /// Names not present in the schema are ignored.
    pub fn drop_columns(&self, names: &[String]) -> Self {
        let keep: Vec<usize> = self
            .schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !names.contains(&f.name))
            .map(|(i, _)| i)
            .collect();

        let fields = keep
            .iter()
            .map(|&i| self.schema.fields[i].clone())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Self {
            schema: Schema::new(fields),
            rows,
        }
    }

    /// Column-wise join of two datasets with identical row counts.
    ///
    /// The result has `self`'s columns followed by `other`'s, row by row.
    pub fn hstack(&self, other: &DataSet) -> PrepResult<Self> {
        if self.row_count() != other.row_count() {
            return Err(PrepError::Internal {
                message: format!(
                    "cannot join datasets with {} and {} rows",
                    self.row_count(),
                    other.row_count()
                ),
            });
        }

        let mut fields = self.schema.fields.clone();
        fields.extend(other.schema.fields.iter().cloned());

        let rows = self
            .rows
            .iter()
            .zip(other.rows.iter())
            .map(|(a, b)| a.iter().chain(b.iter()).cloned().collect())
            .collect();
        Ok(Self {
            schema: Schema::new(fields),
            rows,
        })
    }

    /// Per-column count of [`Value::Null`] cells, in schema order.
    pub fn null_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.column_count()];
        for row in &self.rows {
            for (i, value) in row.iter().enumerate() {
                if value.is_null() {
                    counts[i] += 1;
                }
            }
        }
        counts
    }

    /// Deep memory estimate in bytes: the enum footprint of every cell plus
    /// the heap bytes behind string cells.
    pub fn memory_usage(&self) -> usize {
        let cell = std::mem::size_of::<Value>();
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .map(|value| match value {
                Value::Utf8(s) => cell + s.len(),
                _ => cell,
            })
            .sum()
    }
}
