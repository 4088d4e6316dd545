//! Preprocessing transforms and the pipeline that chains them.
//!
//! Every step is a [`Transform`]: it is fitted on a dataset (learning
//! per-column parameters such as median/IQR or a category vocabulary) and
//! then applied to produce a new dataset. Fit state is owned by the step
//! instance; pipelines are built per request and discarded.
//!
//! Step order is fixed — NaN removal, then scaling, then one-hot encoding —
//! and callers choose steps only by inclusion. Any step failure aborts the
//! whole pipeline; no partially transformed dataset is ever returned.

pub mod one_hot;
pub mod remove_nan;
pub mod scale;

pub use one_hot::OneHotEncode;
pub use remove_nan::RemoveNan;
pub use scale::RobustScale;

use crate::error::PrepResult;
use crate::types::DataSet;

/// A named fit-then-apply preprocessing step.
pub trait Transform {
    /// Step name, used in logs.
    fn name(&self) -> &'static str;

    /// Learn parameters from `ds`. Must be called before [`Transform::apply`].
    fn fit(&mut self, ds: &DataSet) -> PrepResult<()>;

    /// Produce a new dataset using the fitted parameters.
    fn apply(&self, ds: &DataSet) -> PrepResult<DataSet>;

    /// Fit on `ds`, then apply to it.
    fn fit_apply(&mut self, ds: &DataSet) -> PrepResult<DataSet> {
        self.fit(ds)?;
        self.apply(ds)
    }
}

/// An ordered chain of transform steps.
pub struct Pipeline {
    steps: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// Build a pipeline from the three optional steps, in the fixed order:
    /// remove_nan → scale → one_hot_encode.
    pub fn from_steps(
        remove_nan: bool,
        scale_columns: Option<Vec<String>>,
        one_hot_encode: bool,
    ) -> Self {
        let mut steps: Vec<Box<dyn Transform>> = Vec::new();
        if remove_nan {
            steps.push(Box::new(RemoveNan));
        }
        if let Some(columns) = scale_columns {
            if !columns.is_empty() {
                steps.push(Box::new(RobustScale::new(columns)));
            }
        }
        if one_hot_encode {
            steps.push(Box::new(OneHotEncode::new()));
        }
        Self { steps }
    }

    /// Number of steps in the chain.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no steps (identity transform).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fit and apply each step in order, feeding each step the previous
    /// step's output. An empty pipeline returns the input unchanged.
    pub fn run(&mut self, ds: &DataSet) -> PrepResult<DataSet> {
        let mut current = ds.clone();
        for step in &mut self.steps {
            tracing::debug!(step = step.name(), rows = current.row_count(), "fitting step");
            current = step.fit_apply(&current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::Pipeline;
    use crate::ingest::dataset_from_records;
    use crate::types::{DataType, Value};
    use serde_json::json;

    fn mixed_dataset() -> crate::types::DataSet {
        let records = json!([
            {"a": 1, "b": "x"},
            {"a": 2, "b": "y"},
            {"a": null, "b": "x"},
        ]);
        dataset_from_records(records.as_array().unwrap()).unwrap()
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let ds = mixed_dataset();
        let out = Pipeline::from_steps(false, None, false).run(&ds).unwrap();
        assert_eq!(out, ds);
    }

    #[test]
    fn empty_scale_column_list_adds_no_step() {
        let pipeline = Pipeline::from_steps(false, Some(Vec::new()), false);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn remove_nan_then_encode_runs_in_order() {
        let ds = mixed_dataset();
        let mut pipeline = Pipeline::from_steps(true, None, true);
        assert_eq!(pipeline.len(), 2);

        let out = pipeline.run(&ds).unwrap();
        // The null row is dropped before the encoder fits, so both observed
        // categories still come from the surviving rows.
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.column_names(), vec!["a", "b_x", "b_y"]);
    }

    #[test]
    fn failing_step_aborts_the_whole_run() {
        let ds = mixed_dataset();
        let mut pipeline = Pipeline::from_steps(true, Some(vec!["missing".to_string()]), true);
        assert!(pipeline.run(&ds).is_err());
    }

    #[test]
    fn spec_example_remove_nan_and_one_hot() {
        let ds = mixed_dataset();

        let cleaned = Pipeline::from_steps(true, None, false).run(&ds).unwrap();
        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(cleaned.null_counts(), vec![0, 0]);

        let encoded = Pipeline::from_steps(false, None, true).run(&ds).unwrap();
        assert_eq!(encoded.row_count(), 3);
        assert_eq!(encoded.column_names(), vec!["a", "b_x", "b_y"]);
        assert!(encoded
            .schema
            .fields
            .iter()
            .all(|f| !f.data_type.is_categorical()));
        // Row 0 was {"a": 1, "b": "x"}.
        assert_eq!(encoded.rows[0][1], Value::Int64(1));
        assert_eq!(encoded.rows[0][2], Value::Int64(0));
        // Numeric column untouched, including its null.
        assert_eq!(encoded.schema.fields[0].data_type, DataType::Int64);
        assert!(encoded.rows[2][0].is_null());
    }
}
