//! HTTP request handlers.
//!
//! Each handler is a one-shot, stateless computation: parse the JSON
//! records into a [`crate::types::DataSet`], run the requested operation,
//! and serialize the result. Nothing is cached or shared across requests.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use tracing::info;

use crate::ingest::{dataset_from_records, records_from_dataset};
use crate::profile::{profile, DatasetProfile};
use crate::split::{train_val_test_split, SplitOptions};
use crate::transform::Pipeline;

use super::error::ApiError;
use super::payload::{
    HealthResponse, InfoRequest, SplitRequest, SplitResponse, TransformRequest, TransformResponse,
};

/// Fixed cap on record arrays returned in responses.
const PREVIEW_ROW_CAP: usize = 100;

type Body<T> = Result<Json<T>, JsonRejection>;

fn require_data<T>(body: Body<T>, data_len: impl Fn(&T) -> usize) -> Result<T, ApiError> {
    let Json(req) = body?;
    if data_len(&req) == 0 {
        return Err(ApiError::BadRequest("No data provided".to_string()));
    }
    Ok(req)
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "dataset preprocessing service is running",
    })
}

/// `POST /dataset/info`
pub async fn dataset_info(body: Body<InfoRequest>) -> Result<Json<DatasetProfile>, ApiError> {
    let req = require_data(body, |r| r.data.len())?;

    let ds = dataset_from_records(&req.data)?;
    info!(rows = ds.row_count(), cols = ds.column_count(), "profiled dataset");
    Ok(Json(profile(&ds)))
}

/// `POST /dataset/split`
pub async fn dataset_split(body: Body<SplitRequest>) -> Result<Json<SplitResponse>, ApiError> {
    let req = require_data(body, |r| r.data.len())?;

    let ds = dataset_from_records(&req.data)?;
    let opts = SplitOptions {
        random_state: req.random_state,
        shuffle: req.shuffle,
        stratify_column: req.stratify_column,
    };
    let split = train_val_test_split(&ds, &opts)?;
    info!(
        train = split.train.row_count(),
        val = split.val.row_count(),
        test = split.test.row_count(),
        stratified = opts.stratify_column.is_some(),
        "split dataset"
    );

    Ok(Json(SplitResponse {
        train_size: split.train.row_count(),
        val_size: split.val.row_count(),
        test_size: split.test.row_count(),
        train_data: records_from_dataset(&split.train, PREVIEW_ROW_CAP),
        val_data: records_from_dataset(&split.val, PREVIEW_ROW_CAP),
        test_data: records_from_dataset(&split.test, PREVIEW_ROW_CAP),
    }))
}

/// `POST /dataset/transform`
pub async fn dataset_transform(
    body: Body<TransformRequest>,
) -> Result<Json<TransformResponse>, ApiError> {
    let req = require_data(body, |r| r.data.len())?;

    let ds = dataset_from_records(&req.data)?;
    let original_shape = ds.shape();

    let mut pipeline = Pipeline::from_steps(req.remove_nan, req.scale_columns, req.one_hot_encode);
    let steps = pipeline.len();
    let transformed = pipeline.run(&ds)?;
    info!(
        steps,
        from = ?original_shape,
        to = ?transformed.shape(),
        "transformed dataset"
    );

    Ok(Json(TransformResponse {
        original_shape,
        transformed_shape: transformed.shape(),
        transformed_data: records_from_dataset(&transformed, PREVIEW_ROW_CAP),
        columns: transformed.column_names(),
    }))
}
