//! Core domain types and error definitions for chainserve.
//!
//! This crate provides the types shared by every other chainserve crate:
//!
//! - [`ChainError`] — Error type for pipeline and model operations
//! - [`ChatMessage`] — Role-tagged conversation message
//! - [`ModelConfig`] — Chat model identity and endpoint
//!
//! # Example
//!
//! ```rust
//! use chainserve_core::ChatMessage;
//!
//! let msg: ChatMessage = serde_json::from_str(r#"{"type": "human", "content": "Hello!"}"#).unwrap();
//! assert_eq!(msg, ChatMessage::human("Hello!"));
//! assert_eq!(msg.role(), "user");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while running a pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// Request input did not match the pipeline's input type.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The model server could not be reached or refused the request.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model server did not answer in time.
    #[error("Model timed out: {0}")]
    ModelTimeout(String),

    /// The model server answered with something that has no text payload.
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

impl ChainError {
    /// Returns `true` if the error was caused by the caller rather than the model.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ChainError::InvalidInput(_))
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::InvalidInput(err.to_string())
    }
}

/// A single role-tagged message in a conversation.
///
/// Serialized in the LangChain wire shape: `{"type": "human", "content": "..."}`.
/// Unknown fields such as `additional_kwargs` are ignored on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatMessage {
    /// Instruction to the model.
    System { content: String },
    /// Message from the user.
    Human { content: String },
    /// Message previously produced by the model.
    Ai { content: String },
}

impl ChatMessage {
    /// Creates a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System { content: content.into() }
    }

    /// Creates a new human message.
    pub fn human(content: impl Into<String>) -> Self {
        Self::Human { content: content.into() }
    }

    /// Creates a new AI message.
    pub fn ai(content: impl Into<String>) -> Self {
        Self::Ai { content: content.into() }
    }

    /// Text payload of the message.
    pub fn content(&self) -> &str {
        match self {
            Self::System { content } | Self::Human { content } | Self::Ai { content } => content,
        }
    }

    /// Chat-completion role name (`system`, `user` or `assistant`).
    pub fn role(&self) -> &'static str {
        match self {
            Self::System { .. } => "system",
            Self::Human { .. } => "user",
            Self::Ai { .. } => "assistant",
        }
    }
}

/// Configuration for the chat model served behind every pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// The model identifier known to the model server (e.g., "llama3:8b").
    pub model: String,
    /// Base URL of the model server.
    pub api_base: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_wire_shape() {
        let msg = ChatMessage::ai("안녕하세요");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"type": "ai", "content": "안녕하세요"})
        );
    }

    #[test]
    fn message_ignores_extra_fields() {
        let msg: ChatMessage = serde_json::from_value(json!({
            "type": "system",
            "content": "be brief",
            "additional_kwargs": {},
            "example": false
        }))
        .unwrap();
        assert_eq!(msg, ChatMessage::system("be brief"));
    }

    #[test]
    fn message_rejects_unknown_role() {
        let err = serde_json::from_value::<ChatMessage>(json!({"type": "tool", "content": "x"}));
        assert!(err.is_err());
    }

    #[test]
    fn roles_map_to_completion_roles() {
        assert_eq!(ChatMessage::system("a").role(), "system");
        assert_eq!(ChatMessage::human("a").role(), "user");
        assert_eq!(ChatMessage::ai("a").role(), "assistant");
    }

    #[test]
    fn json_errors_are_invalid_input() {
        let err: ChainError = serde_json::from_value::<ChatMessage>(json!({"type": "human"}))
            .unwrap_err()
            .into();
        assert!(matches!(&err, ChainError::InvalidInput(msg) if msg.contains("content")), "{err:?}");
        assert!(err.is_client_error());
    }

    #[test]
    fn only_invalid_input_is_client_error() {
        assert!(ChainError::InvalidInput("x".into()).is_client_error());
        assert!(!ChainError::ModelTimeout("x".into()).is_client_error());
    }
}
