//! `dataset-prep-api` is a small HTTP service for preparing tabular datasets
//! sent as JSON records.
//!
//! It exposes three stateless operations over an in-memory
//! [`types::DataSet`]:
//!
//! - **profile** ([`profile::profile`]): shape, column names, per-column
//!   dtypes and missing-value counts, and an estimated memory footprint;
//! - **split** ([`split::train_val_test_split`]): a seeded, optionally
//!   stratified 60/20/20 train/validation/test partition;
//! - **transform** ([`transform::Pipeline`]): a fixed-order chain of
//!   fit-then-apply preprocessing steps — NaN-row removal, robust scaling
//!   of chosen numeric columns, one-hot encoding of categorical columns.
//!
//! ## Quick example: run a pipeline
//!
//! ```rust
//! use dataset_prep_api::ingest::dataset_from_records;
//! use dataset_prep_api::transform::Pipeline;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), dataset_prep_api::PrepError> {
//! let records = json!([
//!     {"age": 34, "city": "oslo"},
//!     {"age": null, "city": "bergen"},
//! ]);
//! let ds = dataset_from_records(records.as_array().unwrap())?;
//!
//! let mut pipeline = Pipeline::from_steps(true, None, true);
//! let out = pipeline.run(&ds)?;
//! assert_eq!(out.column_names(), vec!["age", "city_oslo"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory dataset types
//! - [`ingest`]: JSON records ↔ [`types::DataSet`] conversion
//! - [`profile`]: dataset summary snapshots
//! - [`split`]: seeded train/validation/test partitioning
//! - [`transform`]: preprocessing steps and the pipeline runner
//! - [`server`]: axum router, handlers, and configuration
//! - [`error`]: error types used across the crate

pub mod error;
pub mod ingest;
pub mod profile;
pub mod server;
pub mod split;
pub mod transform;
pub mod types;

pub use error::{PrepError, PrepResult};
