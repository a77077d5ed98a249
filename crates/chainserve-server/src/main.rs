//! HTTP server entry point.
//!
//! Loads configuration, builds the model client, checks that the model is
//! served, mounts the pipelines and serves on `HOST:PORT` (default 0.0.0.0:8000).

use std::sync::Arc;

use anyhow::Result;
use chainserve_config::{ConfigError, ServerConfig};
use chainserve_llm::{verify_model, ChatModel, OllamaClient};
use chainserve_server::{build_router, default_bindings, AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env()?;
    let model = init_model(&config).await?;

    let app = build_router(
        AppState::new(config.trace_base_url.clone()),
        default_bindings(model),
    );

    let addr = config.addr();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Builds the Ollama client and fails startup if the model cannot be resolved.
async fn init_model(config: &ServerConfig) -> Result<Arc<dyn ChatModel>, ConfigError> {
    let model = &config.model;
    let client = OllamaClient::new(&model.model, &model.api_base).with_timeout(config.model_timeout);

    if config.skip_model_check {
        warn!("Skipping model check for {}", model.model);
    } else {
        verify_model(&model.api_base, &model.model)
            .await
            .map_err(|e| ConfigError::ModelUnresolvable {
                model: model.model.clone(),
                api_base: model.api_base.clone(),
                reason: e.to_string(),
            })?;
    }

    info!("Using model {} at {}", model.model, model.api_base);
    Ok(Arc::new(client))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
