//! Chat model client for chainserve.
//!
//! - [`ChatModel`] — Trait every model backend implements
//! - [`OllamaClient`] — Backend for Ollama's native `/api/chat` endpoint
//! - [`ModelResponse`] — Raw model output plus generation metrics
//! - [`list_models`] / [`verify_model`] — Startup discovery via `/api/tags`
//! - `mock::MockChatModel` — Scripted in-process model (`mock` feature)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use chainserve_core::ChatMessage;
//! use chainserve_llm::{ChatModel, OllamaClient};
//!
//! let client = OllamaClient::new("llama3:8b", "http://localhost:11434");
//! let response = client.generate(&[ChatMessage::human("Hello!")]).await?;
//! println!("{:?}", response.content);
//! ```

#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod model;
mod ollama;

pub use model::{ChatModel, ModelResponse, TextStream};
pub use ollama::{list_models, verify_model, OllamaClient, OllamaMetrics};
