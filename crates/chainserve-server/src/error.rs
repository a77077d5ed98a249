//! Application error types and Axum response conversion.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chainserve_core::ChainError;
use serde::Serialize;
use tracing::error;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Request body was well-formed JSON of the wrong shape.
    Unprocessable(String),
    /// Any other request body rejection, keeping the extractor's status.
    Rejected { status: StatusCode, message: String },
    Chain(ChainError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP status for a pipeline failure.
pub fn chain_status(err: &ChainError) -> StatusCode {
    match err {
        ChainError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ChainError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ChainError::ModelTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ChainError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Rejected { status, .. } => *status,
            AppError::Chain(e) => chain_status(e),
        }
    }
}

impl From<ChainError> for AppError {
    fn from(err: ChainError) -> Self {
        AppError::Chain(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::Unprocessable(e.body_text()),
            other => AppError::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Unprocessable(msg)
            | AppError::Rejected { message: msg, .. } => msg,
            AppError::Chain(e) => e.to_string(),
        };

        if status.is_server_error() {
            error!("{} {}", status.as_u16(), message);
        }
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// JSON body extractor whose rejections render as [`AppError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
