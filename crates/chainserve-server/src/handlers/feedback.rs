//! Feedback and public trace link endpoints.

use axum::{extract::State, Json};
use serde_json::Value;
use uuid::Uuid;

use crate::dto::{FeedbackRecord, FeedbackRequest, TraceLinkRequest, TraceLinkResponse};
use crate::error::{ApiJson, AppError};
use crate::state::RouteState;

/// Accepts feedback for a run and passes it to the feedback sink.
pub async fn create(
    State(state): State<RouteState>,
    ApiJson(req): ApiJson<FeedbackRequest>,
) -> Result<Json<FeedbackRecord>, AppError> {
    if req.key.trim().is_empty() {
        return Err(AppError::BadRequest("feedback key must not be empty".into()));
    }

    if let Some(score) = &req.score {
        if !matches!(score, Value::Number(_) | Value::Bool(_) | Value::Null) {
            return Err(AppError::Unprocessable("score must be a number or a boolean".into()));
        }
    }

    let record = FeedbackRecord {
        id: Uuid::new_v4(),
        run_id: req.run_id,
        key: req.key,
        score: req.score,
        value: req.value,
        comment: req.comment,
    };

    state.app.feedback.record(&record);
    Ok(Json(record))
}

/// Returns a shareable URL for a run's trace.
pub async fn public_trace_link(
    State(state): State<RouteState>,
    ApiJson(req): ApiJson<TraceLinkRequest>,
) -> Result<Json<TraceLinkResponse>, AppError> {
    let Some(base) = &state.app.trace_base_url else {
        return Err(AppError::BadRequest("public trace links are not configured".into()));
    };

    Ok(Json(TraceLinkResponse {
        public_url: format!("{}/public/{}/r", base, req.run_id),
    }))
}
