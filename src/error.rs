use thiserror::Error;

/// Convenience result type for dataset operations.
pub type PrepResult<T> = Result<T, PrepError>;

/// Error type shared by ingestion, profiling, splitting, and transforms.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A record in the request payload is not a flat JSON object.
    #[error("malformed record at row {row}: {message}")]
    MalformedRecord { row: usize, message: String },

    /// A referenced column does not exist in the dataset.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// An operation required a numeric column but got something else.
    #[error("column '{column}' is not numeric (dtype is {dtype})")]
    ColumnNotNumeric { column: String, dtype: &'static str },

    /// An operation required data but the column/dataset had none.
    #[error("column '{column}' has no non-null values to fit on")]
    EmptyColumn { column: String },

    /// A split could not be carried out with the requested parameters.
    #[error("sampling error: {message}")]
    Sampling { message: String },

    /// Invariant violation inside the library (bad index, ragged join).
    #[error("internal error: {message}")]
    Internal { message: String },
}
