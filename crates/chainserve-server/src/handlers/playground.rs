//! Embedded interactive test console.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use rust_embed::Embed;

use crate::error::AppError;
use crate::state::RouteState;

#[derive(Embed)]
#[folder = "playground/"]
struct Assets;

/// Serves the console page configured for this binding.
pub async fn index(State(state): State<RouteState>) -> Result<Html<String>, AppError> {
    let page = Assets::get("index.html")
        .ok_or_else(|| AppError::NotFound("playground is not bundled".into()))?;
    let page = String::from_utf8_lossy(&page.data);

    let binding = &state.binding;
    Ok(Html(
        page.replace("__BASE_PATH__", &binding.path)
            .replace("__TITLE__", binding.runnable.name())
            .replace("__PLAYGROUND_TYPE__", binding.options.playground_type.as_str())
            .replace(
                "__FEEDBACK_ENABLED__",
                if binding.options.enable_feedback_endpoint { "true" } else { "false" },
            ),
    ))
}

/// Serves a static console asset; an empty path serves the page itself.
pub async fn asset(state: State<RouteState>, Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/');

    if path.is_empty() || path == "index.html" {
        return index(state).await.into_response();
    }

    let Some(content) = Assets::get(path) else {
        return AppError::NotFound(format!("no playground asset '{}'", path)).into_response();
    };

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.as_ref().to_string())],
        Body::from(content.data.into_owned()),
    )
        .into_response()
}
