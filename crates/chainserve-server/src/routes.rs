//! Mounts a pipeline's endpoints under its path.
//!
//! | Sub-path | Method | Enabled |
//! |----------|--------|---------|
//! | `/invoke` | POST | always |
//! | `/batch` | POST | always |
//! | `/stream` | POST | always |
//! | `/input_schema`, `/output_schema`, `/config_schema` | GET | always |
//! | `/playground`, `/playground/{*file}` | GET | always |
//! | `/feedback` | POST | `enable_feedback_endpoint` |
//! | `/public_trace_link` | POST | `enable_public_trace_link_endpoint` |

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::handlers;
use crate::state::{AppState, PipelineBinding, RouteState};

/// Adds every endpoint for `binding` to `router`.
pub fn add_routes(router: Router, binding: PipelineBinding, app: Arc<AppState>) -> Router {
    let path = binding.path.clone();
    let options = binding.options;

    let mut routes = Router::new()
        .route("/invoke", post(handlers::invoke::invoke))
        .route("/batch", post(handlers::invoke::batch))
        .route("/stream", post(handlers::stream::stream))
        .route("/input_schema", get(handlers::schema::input_schema))
        .route("/output_schema", get(handlers::schema::output_schema))
        .route("/config_schema", get(handlers::schema::config_schema))
        .route("/playground", get(handlers::playground::index))
        .route("/playground/", get(handlers::playground::index))
        .route("/playground/{*file}", get(handlers::playground::asset));

    if options.enable_feedback_endpoint {
        routes = routes.route("/feedback", post(handlers::feedback::create));
    }
    if options.enable_public_trace_link_endpoint {
        routes = routes.route("/public_trace_link", post(handlers::feedback::public_trace_link));
    }

    info!(
        "Mounted {} at {} (feedback: {}, trace links: {}, playground: {})",
        binding.runnable.name(),
        path,
        options.enable_feedback_endpoint,
        options.enable_public_trace_link_endpoint,
        options.playground_type.as_str()
    );

    let state = RouteState { binding: Arc::new(binding), app };
    router.nest(&path, routes.with_state(state))
}
