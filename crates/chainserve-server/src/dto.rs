//! Request and response bodies for the per-pipeline endpoints.
//!
//! Field names follow the LangServe wire format so existing clients work unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// === Invocation Types ===

/// Body of `POST {path}/invoke` and `POST {path}/stream`.
///
/// `config` and `kwargs` are accepted for compatibility; pipelines have no
/// configurable fields so they are not used.
#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    pub input: Value,
    #[serde(default)]
    pub config: Option<Value>,
    #[serde(default)]
    pub kwargs: Option<Value>,
}

/// Metadata attached to a single run.
#[derive(Debug, Serialize)]
pub struct RunMetadata {
    pub run_id: Uuid,
    pub feedback_tokens: Vec<Value>,
}

/// Response from `POST {path}/invoke`.
#[derive(Debug, Serialize)]
pub struct InvokeResponse {
    pub output: String,
    pub metadata: RunMetadata,
}

/// Body of `POST {path}/batch`.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub inputs: Vec<Value>,
    #[serde(default)]
    pub config: Option<Value>,
    #[serde(default)]
    pub kwargs: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct BatchMetadata {
    pub run_ids: Vec<Uuid>,
}

/// Response from `POST {path}/batch`.
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub output: Vec<String>,
    pub metadata: BatchMetadata,
}

// === Stream Event Payloads ===

/// Data of the `metadata` SSE event.
#[derive(Debug, Serialize)]
pub struct StreamMetadata {
    pub run_id: Uuid,
}

/// Data of the `error` SSE event.
#[derive(Debug, Serialize)]
pub struct StreamError {
    pub status_code: u16,
    pub message: String,
}

// === Feedback Types ===

/// Body of `POST {path}/feedback`.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub run_id: Uuid,
    pub key: String,
    #[serde(default)]
    pub score: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A feedback entry as handed to the feedback sink and echoed to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub run_id: Uuid,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Body of `POST {path}/public_trace_link`.
#[derive(Debug, Deserialize)]
pub struct TraceLinkRequest {
    pub run_id: Uuid,
}

/// Response from `POST {path}/public_trace_link`.
#[derive(Debug, Serialize)]
pub struct TraceLinkResponse {
    pub public_url: String,
}
