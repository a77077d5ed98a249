//! Model backend trait shared by pipelines and tests.

use std::pin::Pin;

use async_trait::async_trait;
use chainserve_core::{ChainError, ChatMessage};
use futures::Stream;

use crate::OllamaMetrics;

/// A stream of generated text chunks.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, ChainError>> + Send>>;

/// Complete response from a model call.
///
/// `content` is `None` when the server answered without a message payload.
#[derive(Debug, Clone, Default)]
pub struct ModelResponse {
    pub model: String,
    pub content: Option<String>,
    pub metrics: OllamaMetrics,
}

impl ModelResponse {
    /// Creates a response carrying only text, with empty metrics.
    pub fn text(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            content: Some(content.into()),
            metrics: OllamaMetrics::default(),
        }
    }
}

/// A chat-completion model that turns an ordered message list into text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier this handle talks to.
    fn model(&self) -> &str;

    /// Generates a complete response.
    async fn generate(&self, messages: &[ChatMessage]) -> Result<ModelResponse, ChainError>;

    /// Generates a response as a stream of text chunks.
    async fn stream(&self, messages: &[ChatMessage]) -> Result<TextStream, ChainError>;
}
