//! HTTP route handlers for the chain server.

pub mod feedback;
pub mod invoke;
pub mod playground;
pub mod schema;
pub mod stream;

use axum::response::Redirect;

/// Where `GET /` sends browsers.
pub const ROOT_REDIRECT: &str = "/prompt/playground";

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Redirects the root path to the topic pipeline's playground.
pub async fn root() -> Redirect {
    Redirect::temporary(ROOT_REDIRECT)
}
