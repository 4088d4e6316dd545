//! Robust scaling step: `(x - median) / IQR` per requested column.

use std::collections::HashMap;

use crate::error::{PrepError, PrepResult};
use crate::types::{DataSet, DataType, Value};

use super::Transform;

/// Fitted parameters for one scaled column.
#[derive(Debug, Clone, Copy)]
struct ColumnParams {
    center: f64,
    scale: f64,
}

/// Rescale the listed numeric columns using median and interquartile range.
///
/// Fit computes per-column median and IQR (linear interpolation between
/// order statistics) over non-null values; a zero IQR falls back to 1.0 so
/// constant columns center without dividing by zero. Apply rewrites the
/// listed columns as `Float64`; nulls and all other columns pass through.
pub struct RobustScale {
    columns: Vec<String>,
    params: HashMap<String, ColumnParams>,
    is_fitted: bool,
}

impl RobustScale {
    /// Create an unfitted scaler for the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            params: HashMap::new(),
            is_fitted: false,
        }
    }
}

impl Transform for RobustScale {
    fn name(&self) -> &'static str {
        "scale"
    }

    fn fit(&mut self, ds: &DataSet) -> PrepResult<()> {
        for column in &self.columns {
            let idx = ds
                .schema
                .index_of(column)
                .ok_or_else(|| PrepError::ColumnNotFound {
                    column: column.clone(),
                })?;
            let dtype = ds.schema.fields[idx].data_type;
            if !dtype.is_numeric() {
                return Err(PrepError::ColumnNotNumeric {
                    column: column.clone(),
                    dtype: dtype.name(),
                });
            }

            let mut values: Vec<f64> = ds
                .rows
                .iter()
                .filter_map(|row| row[idx].as_f64())
                .collect();
            if values.is_empty() {
                return Err(PrepError::EmptyColumn {
                    column: column.clone(),
                });
            }
            values.sort_by(f64::total_cmp);

            let center = quantile(&values, 0.5);
            let iqr = quantile(&values, 0.75) - quantile(&values, 0.25);
            let scale = if iqr == 0.0 { 1.0 } else { iqr };
            self.params.insert(column.clone(), ColumnParams { center, scale });
        }

        self.is_fitted = true;
        Ok(())
    }

    fn apply(&self, ds: &DataSet) -> PrepResult<DataSet> {
        if !self.is_fitted {
            return Err(PrepError::Internal {
                message: "scale step applied before fit".to_string(),
            });
        }

        let mut targets: Vec<(usize, ColumnParams)> = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let idx = ds
                .schema
                .index_of(column)
                .ok_or_else(|| PrepError::ColumnNotFound {
                    column: column.clone(),
                })?;
            targets.push((idx, self.params[column]));
        }

        let mut schema = ds.schema.clone();
        for (idx, _) in &targets {
            schema.fields[*idx].data_type = DataType::Float64;
        }

        let rows = ds
            .rows
            .iter()
            .map(|row| {
                let mut out = row.clone();
                for (idx, params) in &targets {
                    if let Some(v) = out[*idx].as_f64() {
                        out[*idx] = Value::Float64((v - params.center) / params.scale);
                    }
                }
                out
            })
            .collect();

        Ok(DataSet::new(schema, rows))
    }
}

/// Quantile with linear interpolation between the two nearest order
/// statistics (numpy's default method), over an already-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = q * (n - 1) as f64;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}
