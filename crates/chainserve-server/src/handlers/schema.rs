//! Schema description endpoints.

use axum::{extract::State, Json};
use serde_json::Value;

use crate::state::RouteState;

pub async fn input_schema(State(state): State<RouteState>) -> Json<Value> {
    Json(state.binding.runnable.input_schema())
}

pub async fn output_schema(State(state): State<RouteState>) -> Json<Value> {
    Json(state.binding.runnable.output_schema())
}

pub async fn config_schema(State(state): State<RouteState>) -> Json<Value> {
    Json(state.binding.runnable.config_schema())
}
