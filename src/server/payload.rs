//! Request and response body shapes for the API.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

fn default_random_state() -> u64 {
    42
}

fn default_shuffle() -> bool {
    true
}

/// Body of `POST /dataset/info`.
#[derive(Debug, Deserialize)]
pub struct InfoRequest {
    #[serde(default)]
    pub data: Vec<JsonValue>,
}

/// Body of `POST /dataset/split`.
#[derive(Debug, Deserialize)]
pub struct SplitRequest {
    #[serde(default)]
    pub data: Vec<JsonValue>,
    #[serde(default = "default_random_state")]
    pub random_state: u64,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default)]
    pub stratify_column: Option<String>,
}

/// Body of `POST /dataset/transform`.
#[derive(Debug, Deserialize)]
pub struct TransformRequest {
    #[serde(default)]
    pub data: Vec<JsonValue>,
    #[serde(default)]
    pub remove_nan: bool,
    #[serde(default)]
    pub scale_columns: Option<Vec<String>>,
    #[serde(default)]
    pub one_hot_encode: bool,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Body of the split response. Record arrays are truncated previews.
#[derive(Debug, Serialize)]
pub struct SplitResponse {
    pub train_size: usize,
    pub val_size: usize,
    pub test_size: usize,
    pub train_data: Vec<serde_json::Map<String, JsonValue>>,
    pub val_data: Vec<serde_json::Map<String, JsonValue>>,
    pub test_data: Vec<serde_json::Map<String, JsonValue>>,
}

/// Body of the transform response. `transformed_data` is a truncated preview.
#[derive(Debug, Serialize)]
pub struct TransformResponse {
    pub original_shape: (usize, usize),
    pub transformed_shape: (usize, usize),
    pub transformed_data: Vec<serde_json::Map<String, JsonValue>>,
    pub columns: Vec<String>,
}
