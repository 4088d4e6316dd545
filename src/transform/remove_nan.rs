//! Row filtering step: drop every row containing a missing value.

use crate::error::PrepResult;
use crate::types::DataSet;

use super::Transform;

/// Stateless step that drops all rows with any [`crate::types::Value::Null`].
pub struct RemoveNan;

impl Transform for RemoveNan {
    fn name(&self) -> &'static str {
        "remove_nan"
    }

    fn fit(&mut self, _ds: &DataSet) -> PrepResult<()> {
        Ok(())
    }

    fn apply(&self, ds: &DataSet) -> PrepResult<DataSet> {
        Ok(ds.drop_null_rows())
    }
}
