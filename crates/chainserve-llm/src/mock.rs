//! Scripted in-process model for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chainserve_core::{ChainError, ChatMessage};

use crate::model::{ChatModel, ModelResponse, TextStream};

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Echo the content of the last message.
    Echo,
    /// Always answer with this text.
    Fixed(String),
    /// Answer without a text payload.
    Empty,
    /// Fail every call.
    Fail(ChainError),
}

/// A [`ChatModel`] that records every prompt it receives.
#[derive(Debug)]
pub struct MockChatModel {
    reply: MockReply,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockChatModel {
    pub fn new(reply: MockReply) -> Self {
        Self { reply, calls: Mutex::new(Vec::new()) }
    }

    pub fn echo() -> Self {
        Self::new(MockReply::Echo)
    }

    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(MockReply::Fixed(text.into()))
    }

    pub fn failing(err: ChainError) -> Self {
        Self::new(MockReply::Fail(err))
    }

    /// Prompts received so far, in call order.
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    fn record(&self, messages: &[ChatMessage]) -> Result<Option<String>, ChainError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }

        match &self.reply {
            MockReply::Echo => Ok(Some(
                messages.last().map(|m| m.content().to_string()).unwrap_or_default(),
            )),
            MockReply::Fixed(text) => Ok(Some(text.clone())),
            MockReply::Empty => Ok(None),
            MockReply::Fail(err) => Err(err.clone()),
        }
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(&self, messages: &[ChatMessage]) -> Result<ModelResponse, ChainError> {
        let content = self.record(messages)?;
        Ok(ModelResponse { model: "mock".into(), content, ..Default::default() })
    }

    /// Streams the reply one whitespace-separated word at a time.
    async fn stream(&self, messages: &[ChatMessage]) -> Result<TextStream, ChainError> {
        let text = self.record(messages)?.unwrap_or_default();
        let chunks: Vec<Result<String, ChainError>> = text
            .split_inclusive(' ')
            .map(|w| Ok(w.to_string()))
            .collect();
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}
