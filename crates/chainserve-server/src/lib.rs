//! HTTP front-end exposing chainserve pipelines as REST endpoints.
//!
//! [`build_router`] assembles the full application: the root redirect, a
//! health check, every [`PipelineBinding`] mounted by [`add_routes`], a
//! permissive CORS policy and request tracing. The binary in `main.rs` only
//! loads configuration, builds the model client and serves this router.

mod bindings;
pub mod dto;
pub mod error;
pub mod feedback;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use bindings::default_bindings;
pub use feedback::{FeedbackSink, LogFeedbackSink};
pub use handlers::ROOT_REDIRECT;
pub use routes::add_routes;
pub use state::{AppState, PipelineBinding, PlaygroundType, RouteOptions};

/// Cross-origin policy allowing every origin, method and header, with credentials.
///
/// Wildcards cannot be combined with credentials, so the request's origin,
/// method and headers are echoed back instead.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Builds the application router from shared state and pipeline bindings.
pub fn build_router(app: AppState, bindings: Vec<PipelineBinding>) -> Router {
    let app = Arc::new(app);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = bindings
        .into_iter()
        .fold(Router::new().route("/", get(handlers::root)), |router, binding| {
            add_routes(router, binding, app.clone())
        })
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors_layer())
}
