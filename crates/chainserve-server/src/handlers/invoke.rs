//! Invoke and batch endpoints.

use axum::{extract::State, Json};
use tracing::{debug, info};
use uuid::Uuid;

use crate::dto::{BatchMetadata, BatchRequest, BatchResponse, InvokeRequest, InvokeResponse, RunMetadata};
use crate::error::{ApiJson, AppError};
use crate::state::RouteState;

/// Runs the pipeline once and returns its output.
pub async fn invoke(
    State(state): State<RouteState>,
    ApiJson(req): ApiJson<InvokeRequest>,
) -> Result<Json<InvokeResponse>, AppError> {
    let run_id = Uuid::new_v4();
    let runnable = &state.binding.runnable;
    info!("Invoke {} (run {})", runnable.name(), run_id);
    if req.config.is_some() || req.kwargs.is_some() {
        debug!("Ignoring config/kwargs for {}", runnable.name());
    }

    let output = runnable.invoke(req.input).await?;

    Ok(Json(InvokeResponse {
        output,
        metadata: RunMetadata { run_id, feedback_tokens: Vec::new() },
    }))
}

/// Runs the pipeline over several inputs; outputs keep input order.
pub async fn batch(
    State(state): State<RouteState>,
    ApiJson(req): ApiJson<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let runnable = &state.binding.runnable;
    info!("Batch {} ({} inputs)", runnable.name(), req.inputs.len());
    if req.config.is_some() || req.kwargs.is_some() {
        debug!("Ignoring config/kwargs for {}", runnable.name());
    }

    let run_ids = req.inputs.iter().map(|_| Uuid::new_v4()).collect();
    let output = runnable.batch(req.inputs).await?;

    Ok(Json(BatchResponse {
        output,
        metadata: BatchMetadata { run_ids },
    }))
}
